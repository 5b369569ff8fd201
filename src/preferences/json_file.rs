use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::PreferenceError;
use crate::preferences::PreferenceStore;

/// Preferences persisted as one JSON object in a file.
///
/// The file is read on first access (a missing file is an empty store) and
/// rewritten in full on every change.
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    values: Mutex<Option<BTreeMap<String, String>>>,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            values: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        let contents = serde_json::to_vec_pretty(values)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for JsonFilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let mut cached = self.values.lock().await;
        if cached.is_none() {
            *cached = Some(self.load().await?);
        }

        Ok(cached.as_ref().and_then(|values| values.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut cached = self.values.lock().await;
        let values = match cached.take() {
            Some(values) => values,
            None => self.load().await?,
        };

        let mut updated = values.clone();
        updated.insert(key.to_string(), value.to_string());
        let saved = self.save(&updated).await;
        // The cache only moves forward once the file holds the change.
        *cached = Some(if saved.is_ok() { updated } else { values });
        saved
    }

    async fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        let mut cached = self.values.lock().await;
        let values = match cached.take() {
            Some(values) => values,
            None => self.load().await?,
        };

        if !values.contains_key(key) {
            *cached = Some(values);
            return Ok(());
        }

        let mut updated = values.clone();
        updated.remove(key);
        let saved = self.save(&updated).await;
        *cached = Some(if saved.is_ok() { updated } else { values });
        saved
    }
}
