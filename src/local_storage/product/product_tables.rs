/// Provides constants and utilities for working with
/// the "products" database table.
pub struct ProductTable;

impl ProductTable {
    /// The name of the database table
    pub const TABLE_NAME: &'static str = "products";

    /// The column name for the autoincrement primary key of a product.
    pub const COLUMN_ID: &'static str = "id";

    pub const COLUMN_NAME: &'static str = "name";

    pub const COLUMN_DESCRIPTION: &'static str = "description";

    /// The column name for the unit price (REAL).
    pub const COLUMN_PRICE: &'static str = "price";

    /// The column name for the number of units in stock.
    pub const COLUMN_STOCK: &'static str = "stock";

    pub const COLUMN_CATEGORY: &'static str = "category";

    /// The column name for the optional image URL.
    pub const COLUMN_IMAGE: &'static str = "image";

    pub const COLUMN_CREATED_AT: &'static str = "created_at";

    pub const COLUMN_UPDATED_AT: &'static str = "updated_at";

    pub const REAL_COLUMNS: &'static [&'static str] = &[Self::COLUMN_PRICE];

    pub const COLUMNS: &'static [&'static str] = &[
        Self::COLUMN_ID,
        Self::COLUMN_NAME,
        Self::COLUMN_DESCRIPTION,
        Self::COLUMN_PRICE,
        Self::COLUMN_STOCK,
        Self::COLUMN_CATEGORY,
        Self::COLUMN_IMAGE,
        Self::COLUMN_CREATED_AT,
        Self::COLUMN_UPDATED_AT,
    ];

    /// SQL statement for creating the products table with the defined schema.
    pub fn create_table() -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                {} INTEGER PRIMARY KEY AUTOINCREMENT,
                {} TEXT NOT NULL,
                {} TEXT,
                {} REAL NOT NULL,
                {} INTEGER NOT NULL,
                {} TEXT,
                {} TEXT,
                {} TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                {} TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            Self::TABLE_NAME,
            Self::COLUMN_ID,
            Self::COLUMN_NAME,
            Self::COLUMN_DESCRIPTION,
            Self::COLUMN_PRICE,
            Self::COLUMN_STOCK,
            Self::COLUMN_CATEGORY,
            Self::COLUMN_IMAGE,
            Self::COLUMN_CREATED_AT,
            Self::COLUMN_UPDATED_AT
        )
    }
}
