//! Durable persistence for user-submitted places and favorites.
//!
//! Two independent named stores back this module: one holds the serialized
//! user-place list under a single key, the other a set of string-encoded
//! favorite identifiers. Read faults never surface as errors; a corrupt or
//! missing blob loads as empty so the catalog keeps working.

use std::collections::HashSet;
use std::path::Path;

use log::warn;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::{FAVORITES_KEY, FAVORITES_STORE, USER_PLACES_KEY, USER_PLACES_STORE};
use crate::kv::KeyValueStore;
use crate::place::Place;

/// Failure writing to a persisted store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem fault while writing the store file.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload could not be serialized.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted list of user-submitted places.
///
/// The whole list is serialized as one blob under a fixed key and rewritten
/// on every mutation. A mutex serializes each read-modify-write so
/// concurrent callers cannot interleave `save`/`delete` sequences.
#[derive(Debug)]
pub struct PlaceStore {
    kv: KeyValueStore,
    write_lock: Mutex<()>,
}

impl PlaceStore {
    /// Opens the user-place store under `data_dir`.
    pub fn open(data_dir: &Path) -> Self {
        PlaceStore {
            kv: KeyValueStore::open(data_dir, USER_PLACES_STORE),
            write_lock: Mutex::new(()),
        }
    }

    /// Inserts or replaces (by identifier) `place` in the persisted list.
    pub async fn save(&self, place: &Place) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut places = self.read_list().await;
        match places.iter_mut().find(|p| p.id == place.id) {
            Some(slot) => *slot = place.clone(),
            None => places.push(place.clone()),
        }
        self.write_list(&places).await
    }

    /// Returns all persisted user places, in storage order.
    pub async fn load_all(&self) -> Vec<Place> {
        self.read_list().await
    }

    /// Removes every entry with identifier `id` and rewrites the list.
    /// Returns true only when at least one entry was actually removed.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut places = self.read_list().await;
        let before = places.len();
        places.retain(|p| p.id != id);
        if places.len() == before {
            return Ok(false);
        }
        self.write_list(&places).await?;
        Ok(true)
    }

    async fn read_list(&self) -> Vec<Place> {
        let Some(value) = self.kv.get(USER_PLACES_KEY).await else {
            return Vec::new();
        };
        match serde_json::from_value(value) {
            Ok(places) => places,
            Err(e) => {
                warn!("Ignoring corrupt user place list: {e}");
                Vec::new()
            }
        }
    }

    async fn write_list(&self, places: &[Place]) -> Result<(), StoreError> {
        self.kv
            .put(USER_PLACES_KEY, serde_json::to_value(places)?)
            .await
    }
}

/// Persisted set of favorite place identifiers.
///
/// Identifiers are stored string-encoded; entries that fail to parse back
/// to an integer are skipped on read.
#[derive(Debug)]
pub struct FavoritesStore {
    kv: KeyValueStore,
    write_lock: Mutex<()>,
}

impl FavoritesStore {
    /// Opens the favorites store under `data_dir`.
    pub fn open(data_dir: &Path) -> Self {
        FavoritesStore {
            kv: KeyValueStore::open(data_dir, FAVORITES_STORE),
            write_lock: Mutex::new(()),
        }
    }

    /// Adds `id` to the favorites set. Adding an id twice is a no-op.
    pub async fn add(&self, id: i64) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut encoded = self.read_encoded().await;
        let token = id.to_string();
        if !encoded.contains(&token) {
            encoded.push(token);
            self.write_encoded(&encoded).await?;
        }
        Ok(())
    }

    /// Removes `id` from the favorites set. Returns true only when the id
    /// was present.
    pub async fn remove(&self, id: i64) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut encoded = self.read_encoded().await;
        let before = encoded.len();
        let token = id.to_string();
        encoded.retain(|t| t != &token);
        if encoded.len() == before {
            return Ok(false);
        }
        self.write_encoded(&encoded).await?;
        Ok(true)
    }

    /// True when `id` is in the favorites set.
    pub async fn contains(&self, id: i64) -> bool {
        self.ids().await.contains(&id)
    }

    /// All favorite identifiers currently persisted.
    pub async fn ids(&self) -> HashSet<i64> {
        self.read_encoded()
            .await
            .iter()
            .filter_map(|token| match token.parse() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!("Skipping unparseable favorite id {token:?}");
                    None
                }
            })
            .collect()
    }

    async fn read_encoded(&self) -> Vec<String> {
        let Some(value) = self.kv.get(FAVORITES_KEY).await else {
            return Vec::new();
        };
        match serde_json::from_value(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("Ignoring corrupt favorites set: {e}");
                Vec::new()
            }
        }
    }

    async fn write_encoded(&self, encoded: &[String]) -> Result<(), StoreError> {
        self.kv
            .put(FAVORITES_KEY, serde_json::to_value(encoded)?)
            .await
    }
}
