use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{error, info};

use crate::error::Result;
use crate::local_storage::schema;

pub mod seed;

pub type DbPool = Pool<Sqlite>;

/// Open (creating if absent) the database file and set up the schema.
///
/// The pool holds exactly one connection that is never recycled, so every
/// statement runs on the same SQLite connection.
pub async fn init_db_pool(database_path: &str, foreign_keys: bool) -> Result<DbPool> {
    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
        .foreign_keys(foreign_keys);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .inspect_err(|e| error!(database_path, error = %e, "Error opening database"))?;

    setup_database(&pool).await?;
    info!(database_path, foreign_keys, "Database initialized successfully");

    Ok(pool)
}

/// Set up the database schema. Safe to run against an existing database.
pub async fn setup_database(pool: &DbPool) -> Result<()> {
    for statement in schema::create_statements() {
        sqlx::query(&statement)
            .execute(pool)
            .await
            .inspect_err(|e| error!(error = %e, "Error initializing database"))?;
    }

    Ok(())
}
