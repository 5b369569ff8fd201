use crate::local_storage::user::UserTable;

/// Provides constants and utilities for working with
/// the "orders" database table.
pub struct OrderTable;

impl OrderTable {
    /// The name of the database table
    pub const TABLE_NAME: &'static str = "orders";

    /// The column name for the autoincrement primary key of an order.
    pub const COLUMN_ID: &'static str = "id";

    /// The column name for the id of the user that placed the order.
    pub const COLUMN_CUSTOMER_ID: &'static str = "customer_id";

    /// The column name for the order status ("pending", "shipped", ...).
    pub const COLUMN_STATUS: &'static str = "status";

    /// The column name for the order total (REAL).
    pub const COLUMN_TOTAL: &'static str = "total";

    /// The column name for the timestamp the order was placed.
    pub const COLUMN_DATE: &'static str = "date";

    pub const COLUMN_UPDATED_AT: &'static str = "updated_at";

    pub const REAL_COLUMNS: &'static [&'static str] = &[Self::COLUMN_TOTAL];

    pub const COLUMNS: &'static [&'static str] = &[
        Self::COLUMN_ID,
        Self::COLUMN_CUSTOMER_ID,
        Self::COLUMN_STATUS,
        Self::COLUMN_TOTAL,
        Self::COLUMN_DATE,
        Self::COLUMN_UPDATED_AT,
    ];

    /// SQL statement for creating the orders table with the defined schema.
    pub fn create_table() -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                {} INTEGER PRIMARY KEY AUTOINCREMENT,
                {} INTEGER NOT NULL,
                {} TEXT NOT NULL,
                {} REAL NOT NULL,
                {} TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                {} TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY ({}) REFERENCES {} ({})
            )",
            Self::TABLE_NAME,
            Self::COLUMN_ID,
            Self::COLUMN_CUSTOMER_ID,
            Self::COLUMN_STATUS,
            Self::COLUMN_TOTAL,
            Self::COLUMN_DATE,
            Self::COLUMN_UPDATED_AT,
            Self::COLUMN_CUSTOMER_ID,
            UserTable::TABLE_NAME,
            UserTable::COLUMN_ID
        )
    }
}
