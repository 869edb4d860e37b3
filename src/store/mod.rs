//! Keyed blob store
//!
//! Every named value lives inside one JSON object held by a single [`Slot`].
//! Durability is best-effort: single tab, single session, not a database.
//! Read and write failures never reach the caller; they degrade to "no data"
//! and callers must cope with empty state at any time.

pub mod slot;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::rc::Rc;

use crate::error::Result;

pub use slot::{FileSlot, MemorySlot, Slot};

/// Handle to the shared blob slot (cheap to clone)
#[derive(Clone)]
pub struct BlobStore {
    slot: Rc<dyn Slot>,
}

impl BlobStore {
    pub fn new(slot: impl Slot + 'static) -> Self {
        Self {
            slot: Rc::new(slot),
        }
    }

    /// Store `value` under `key`, keeping every other key intact
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            tracing::error!("Error saving {}: {}", key, e);
        }
    }

    /// Previously saved value, or `None` when absent or unreadable
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_load(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Error loading {}: {}", key, e);
                None
            }
        }
    }

    /// Wipe the entire slot, all keys included
    pub fn clear(&self) {
        if let Err(e) = self.slot.write(String::new()) {
            tracing::error!("Error clearing storage: {}", e);
        }
    }

    fn try_save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Discarding unreadable storage contents: {}", e);
                Map::new()
            }
        };
        entries.insert(key.to_string(), serde_json::to_value(value)?);
        self.slot
            .write(serde_json::to_string(&Value::Object(entries))?)?;
        tracing::debug!("Data saved: {}", key);
        Ok(())
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut entries = self.read_entries()?;
        match entries.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        match self.slot.read() {
            None => Ok(Map::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Map::new()),
            Some(raw) => Ok(serde_json::from_str(&raw)?),
        }
    }
}
