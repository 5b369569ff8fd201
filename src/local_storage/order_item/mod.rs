pub mod order_item_tables;

pub use order_item_tables::OrderItemTable;
