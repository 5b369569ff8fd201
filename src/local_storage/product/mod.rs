pub mod product_local_storage;
pub mod product_tables;

pub use product_local_storage::ProductLocalStorage;
pub use product_tables::ProductTable;
