pub mod core_local_storage;
pub mod filter;
pub mod order;
pub mod order_item;
pub mod product;
pub mod schema;
pub mod user;

pub use core_local_storage::CoreLocalStorage;
pub use filter::Filter;
