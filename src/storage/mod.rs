//! Persistence Adapter
//!
//! The tracker keeps its state in a synchronous, string-valued key-value
//! store (`window.localStorage` in the browser):
//! - `kanjis` - JSON array of kanji records
//! - `default_kanji_version` - catalog version last applied
//! - `rowCount` - grid column count (view only)
//!
//! `KeyValueStore` is the seam; `BrowserStore` wraps `web_sys::Storage` and
//! `MemoryStore` backs tests and non-browser hosts.

pub mod reconcile;
pub mod version;

pub use reconcile::*;
pub use version::*;

use std::collections::HashMap;

use crate::config::TrackerConfig;
use crate::console::console_warn;
use crate::error::StorageError;
use crate::kanji::Kanji;

// =============================================================================
// Store seam
// =============================================================================

/// Synchronous string key-value store
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: pre-populate a key
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// `window.localStorage`
pub struct BrowserStore {
    storage: web_sys::Storage,
}

impl BrowserStore {
    /// Open the page's local storage
    pub fn local() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let storage = window
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            message: js_message(&e),
        })
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: js_message(&e),
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: js_message(&e),
        })
    }
}

// =============================================================================
// Typed accessors
// =============================================================================

/// Load the stored kanji list.
///
/// `Ok(None)` when nothing is stored; `Err(Corrupt)` when the value is not a
/// JSON array. Entries that are not valid records, or have level 0, are
/// dropped and the rest of the list is kept.
pub fn load_kanjis<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<Option<Vec<Kanji>>, StorageError> {
    let Some(raw) = store.get_item(key)? else {
        return Ok(None);
    };
    let entries: Vec<serde_json::Value> = serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
        key: key.to_string(),
        message: e.to_string(),
    })?;

    let total = entries.len();
    let kanjis: Vec<Kanji> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<Kanji>(entry).ok())
        .filter(|k| k.lvl >= 1)
        .collect();

    if kanjis.len() < total {
        console_warn!(
            "[KanjiStorage] Dropped {} invalid entries from '{}'",
            total - kanjis.len(),
            key
        );
    }
    Ok(Some(kanjis))
}

/// Persist the kanji list as JSON
pub fn save_kanjis<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, kanjis: &[Kanji]) -> Result<(), StorageError> {
    let json = serde_json::to_string(kanjis)?;
    store.set_item(key, &json)
}

/// Stored grid row count; missing, unparsable or zero falls back to the default
pub fn load_row_count<S: KeyValueStore + ?Sized>(store: &S, config: &TrackerConfig) -> Result<u32, StorageError> {
    let stored = store
        .get_item(&config.storage_keys.row_count)?
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|n| *n > 0);
    Ok(config.clamp_row_count(stored.unwrap_or(config.default_row_count)))
}

/// Persist the grid row count (clamped); returns the value written
pub fn save_row_count<S: KeyValueStore + ?Sized>(
    store: &mut S,
    config: &TrackerConfig,
    count: u32,
) -> Result<u32, StorageError> {
    let count = config.clamp_row_count(count);
    store.set_item(&config.storage_keys.row_count, &count.to_string())?;
    Ok(count)
}
