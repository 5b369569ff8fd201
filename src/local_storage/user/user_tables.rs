/// Provides constants and utilities for working with
/// the "users" database table.
pub struct UserTable;

impl UserTable {
    /// The name of the database table
    pub const TABLE_NAME: &'static str = "users";

    /// The column name for the autoincrement primary key of a user.
    pub const COLUMN_ID: &'static str = "id";

    /// The column name for the user's display name.
    pub const COLUMN_NAME: &'static str = "name";

    /// The column name for the user's email address (unique).
    pub const COLUMN_EMAIL: &'static str = "email";

    /// The column name for the user role, stored as text ("admin", "customer").
    pub const COLUMN_ROLE: &'static str = "role";

    /// The column name for the optional avatar URL.
    pub const COLUMN_AVATAR: &'static str = "avatar";

    pub const COLUMN_CREATED_AT: &'static str = "created_at";

    pub const COLUMN_UPDATED_AT: &'static str = "updated_at";

    /// Every column of the table, in schema order.
    pub const COLUMNS: &'static [&'static str] = &[
        Self::COLUMN_ID,
        Self::COLUMN_NAME,
        Self::COLUMN_EMAIL,
        Self::COLUMN_ROLE,
        Self::COLUMN_AVATAR,
        Self::COLUMN_CREATED_AT,
        Self::COLUMN_UPDATED_AT,
    ];

    /// SQL statement for creating the users table with the defined schema.
    pub fn create_table() -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                {} INTEGER PRIMARY KEY AUTOINCREMENT,
                {} TEXT NOT NULL,
                {} TEXT UNIQUE NOT NULL,
                {} TEXT NOT NULL,
                {} TEXT,
                {} TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                {} TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            Self::TABLE_NAME,
            Self::COLUMN_ID,
            Self::COLUMN_NAME,
            Self::COLUMN_EMAIL,
            Self::COLUMN_ROLE,
            Self::COLUMN_AVATAR,
            Self::COLUMN_CREATED_AT,
            Self::COLUMN_UPDATED_AT
        )
    }
}
