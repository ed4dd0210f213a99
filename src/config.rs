// kanjicore/src/config.rs
//
// Configuration types for the tracker

use serde::{Deserialize, Serialize};

use crate::link::LinkMode;

/// Keys used in the local key-value store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// JSON array of kanji records
    pub kanjis: String,

    /// Default catalog version last applied
    pub version: String,

    /// Grid column count (view only)
    pub row_count: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            kanjis: "kanjis".to_string(),
            version: "default_kanji_version".to_string(),
            row_count: "rowCount".to_string(),
        }
    }
}

/// Tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Where state lives in the key-value store
    pub storage_keys: StorageKeys,

    /// Kanji per grid row when nothing valid is stored
    pub default_row_count: u32,

    /// Lower bound for the grid row count
    pub min_row_count: u32,

    /// Import mode stamped on share links when the caller gives none
    pub share_mode: LinkMode,

    /// How long transient notifications stay visible (view hint)
    pub popup_ms: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_keys: StorageKeys::default(),
            default_row_count: 10,
            min_row_count: 1,
            share_mode: LinkMode::Merge,
            popup_ms: 2000,
        }
    }
}

impl TrackerConfig {
    /// Builder: set storage keys
    pub fn with_storage_keys(mut self, keys: StorageKeys) -> Self {
        self.storage_keys = keys;
        self
    }

    /// Builder: set default row count
    pub fn with_default_row_count(mut self, count: u32) -> Self {
        self.default_row_count = count.max(self.min_row_count);
        self
    }

    /// Builder: set share mode
    pub fn with_share_mode(mut self, mode: LinkMode) -> Self {
        self.share_mode = mode;
        self
    }

    /// Clamp a requested row count into the allowed range
    pub fn clamp_row_count(&self, count: u32) -> u32 {
        count.max(self.min_row_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let keys = StorageKeys::default();
        assert_eq!(keys.kanjis, "kanjis");
        assert_eq!(keys.version, "default_kanji_version");
        assert_eq!(keys.row_count, "rowCount");
    }

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.default_row_count, 10);
        assert_eq!(config.share_mode, LinkMode::Merge);
    }

    #[test]
    fn test_partial_config_from_json() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{ "default_row_count": 12, "share_mode": "add" }"#).unwrap();
        assert_eq!(config.default_row_count, 12);
        assert_eq!(config.share_mode, LinkMode::Add);
        assert_eq!(config.storage_keys, StorageKeys::default());
    }

    #[test]
    fn test_row_count_clamped() {
        let config = TrackerConfig::default().with_default_row_count(0);
        assert_eq!(config.default_row_count, 1);
        assert_eq!(config.clamp_row_count(0), 1);
        assert_eq!(config.clamp_row_count(7), 7);
    }
}
