//! String key/value preferences (theme, language) kept outside the database.

pub mod json_file;
pub mod theme;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::PreferenceError;

pub use json_file::JsonFilePreferenceStore;
pub use theme::{ColorScheme, Palette, Theme, ThemeSettings, ThemeType};

pub const THEME_PREFERENCE_KEY: &str = "theme-preference";
pub const LANGUAGE_PREFERENCE_KEY: &str = "user-language";

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;

    async fn remove(&self, key: &str) -> Result<(), PreferenceError>;
}

/// Process-local store, nothing is persisted.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}
