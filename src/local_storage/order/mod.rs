pub mod order_local_storage;
pub mod order_tables;

pub use order_local_storage::OrderLocalStorage;
pub use order_tables::OrderTable;
