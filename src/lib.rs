pub mod config;
pub mod db;
pub mod error;
pub mod local_storage;
pub mod localization;
pub mod models;
pub mod preferences;

#[cfg(test)]
mod test;

pub use error::{Result, StorageError};
pub use local_storage::{CoreLocalStorage, Filter};
