//! Named key-value stores persisted as JSON files.
//!
//! Each store is a single file in the data directory holding a flat
//! string-keyed map of JSON values. Every write rewrites the whole file
//! through a temp-file rename, so a crashed write never leaves a
//! half-serialized blob behind.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::StoreError;

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    updated_at: DateTime<Utc>,
    entries: BTreeMap<String, Value>,
}

/// One named store backed by one JSON file.
#[derive(Debug)]
pub(crate) struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    /// Opens the store named `name` under `dir`. The file is created lazily
    /// on first write.
    pub(crate) fn open(dir: &Path, name: &str) -> Self {
        KeyValueStore {
            path: dir.join(format!("{name}.json")),
        }
    }

    /// Reads the value under `key`. A missing file, unreadable file, or
    /// corrupt blob all read as "no value".
    pub(crate) async fn get(&self, key: &str) -> Option<Value> {
        let raw = tokio::fs::read(&self.path).await.ok()?;
        let file: StoreFile = match serde_json::from_slice(&raw) {
            Ok(file) => file,
            Err(e) => {
                warn!(
                    "Ignoring corrupt store file {}: {}",
                    self.path.display(),
                    e
                );
                return None;
            }
        };
        file.entries.get(key).cloned()
    }

    /// Writes `value` under `key`, rewriting the whole file atomically.
    pub(crate) async fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = match tokio::fs::read(&self.path).await {
            Ok(raw) => serde_json::from_slice::<StoreFile>(&raw)
                .map(|f| f.entries)
                .unwrap_or_default(),
            Err(_) => BTreeMap::new(),
        };
        entries.insert(key.to_string(), value);

        let file = StoreFile {
            updated_at: Utc::now(),
            entries,
        };
        let serialized = serde_json::to_vec_pretty(&file)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &serialized).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
