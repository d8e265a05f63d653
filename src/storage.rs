use crate::errors::AppError;
use serde_json::{Map, Value};
use std::{collections::BTreeMap, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error, warn};

/// String key-value store persisted as one JSON object. Reads and writes
/// never fail from the caller's point of view: problems are logged and the
/// store carries on with what it has in memory.
#[derive(Debug, Default)]
pub struct KeyValueStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
    /// Set while memory holds changes the last write failed to persist.
    unsaved: bool,
}

impl KeyValueStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path).await;
        debug!(path = %path.display(), keys = entries.len(), "opened store");
        Self {
            path: Some(path),
            entries,
            unsaved: false,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub async fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if self.entries.get(key) == Some(&value) && !self.unsaved {
            return;
        }
        self.entries.insert(key.to_string(), value);
        self.flush().await;
    }

    pub async fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() || self.unsaved {
            self.flush().await;
        }
    }

    async fn flush(&mut self) {
        let Some(path) = &self.path else {
            return;
        };
        match persist_entries(path, &self.entries).await {
            Ok(()) => self.unsaved = false,
            Err(err) => {
                error!("failed to write store file {}: {}", path.display(), err.message);
                self.unsaved = true;
            }
        }
    }
}

async fn load_entries(path: &Path) -> BTreeMap<String, String> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(err) => {
            error!("failed to read store file: {err}");
            return BTreeMap::new();
        }
    };

    let object: Map<String, Value> = match serde_json::from_slice(&bytes) {
        Ok(object) => object,
        Err(err) => {
            error!("failed to parse store file: {err}");
            return BTreeMap::new();
        }
    };

    object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, text)),
            other => {
                warn!(%key, "ignoring non-string store value: {other}");
                None
            }
        })
        .collect()
}

/// Writes a sibling temp file and renames it over the store, so a crash
/// mid-write leaves either the old file or the new one.
async fn persist_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(entries).map_err(AppError::internal)?;
    let tmp = temp_path(path);
    fs::write(&tmp, payload).await.map_err(AppError::internal)?;
    if let Err(err) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(AppError::internal(err));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
