use thiserror::Error;

/// Error returned by every storage operation.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("No columns given for {operation} on {table}")]
    EmptyData {
        operation: &'static str,
        table: String,
    },

    #[error("Missing WHERE clause for {operation} on {table}")]
    MissingWhereClause {
        operation: &'static str,
        table: String,
    },

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown column {column} in table {table}")]
    UnknownColumn { table: String, column: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Preference file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum LocalizationError {
    #[error("Translation resource is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No translation resources for language {0}")]
    MissingLanguage(&'static str),
}
