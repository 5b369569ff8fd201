use crate::local_storage::order::OrderTable;
use crate::local_storage::product::ProductTable;

/// Provides constants and utilities for working with
/// the "order_items" database table.
pub struct OrderItemTable;

impl OrderItemTable {
    /// The name of the database table
    pub const TABLE_NAME: &'static str = "order_items";

    pub const COLUMN_ID: &'static str = "id";

    /// The column name for the id of the order the item belongs to.
    pub const COLUMN_ORDER_ID: &'static str = "order_id";

    /// The column name for the id of the ordered product.
    pub const COLUMN_PRODUCT_ID: &'static str = "product_id";

    pub const COLUMN_QUANTITY: &'static str = "quantity";

    /// The column name for the unit price at the time of ordering.
    pub const COLUMN_PRICE: &'static str = "price";

    pub const REAL_COLUMNS: &'static [&'static str] = &[Self::COLUMN_PRICE];

    pub const COLUMNS: &'static [&'static str] = &[
        Self::COLUMN_ID,
        Self::COLUMN_ORDER_ID,
        Self::COLUMN_PRODUCT_ID,
        Self::COLUMN_QUANTITY,
        Self::COLUMN_PRICE,
    ];

    /// SQL statement for creating the order_items table with the defined schema.
    pub fn create_table() -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                {} INTEGER PRIMARY KEY AUTOINCREMENT,
                {} INTEGER NOT NULL,
                {} INTEGER NOT NULL,
                {} INTEGER NOT NULL,
                {} REAL NOT NULL,
                FOREIGN KEY ({}) REFERENCES {} ({}),
                FOREIGN KEY ({}) REFERENCES {} ({})
            )",
            Self::TABLE_NAME,
            Self::COLUMN_ID,
            Self::COLUMN_ORDER_ID,
            Self::COLUMN_PRODUCT_ID,
            Self::COLUMN_QUANTITY,
            Self::COLUMN_PRICE,
            Self::COLUMN_ORDER_ID,
            OrderTable::TABLE_NAME,
            OrderTable::COLUMN_ID,
            Self::COLUMN_PRODUCT_ID,
            ProductTable::TABLE_NAME,
            ProductTable::COLUMN_ID
        )
    }
}
