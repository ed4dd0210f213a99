//! Startup reconciliation
//!
//! Runs once per page load, before anything renders:
//! 1. Decode records and the import mode from the location search string
//! 2. Load stored records, falling back to the default catalog when absent
//!    or corrupt
//! 3. Merge `base ++ link records` under the mode's policy, where `base` is
//!    a fresh default catalog in reset mode and the stored list otherwise
//! 4. Persist the result and the catalog version marker
//!
//! `should_update` is computed from the marker found *before* the write.

use serde::{Deserialize, Serialize};

use super::{load_kanjis, needs_update, save_kanjis, KeyValueStore};
use crate::config::StorageKeys;
use crate::console::{console_log, console_warn};
use crate::error::StorageError;
use crate::kanji::{default_kanjis, remove_duplicates, Kanji, DEFAULT_KANJI_VERSION};
use crate::link::{DecodedLink, LinkMode};

/// Shown to the user when stored data had to be discarded
pub const RECOVERY_WARNING: &str = "There was an issue getting your previous data! Resetting!";

/// Where the pre-merge collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseSource {
    /// Previously persisted list
    Stored,
    /// Nothing stored yet; default catalog
    FirstRun,
    /// Stored list was unreadable; default catalog
    Recovered,
    /// Reset link; fresh default catalog
    Reset,
}

/// Outcome of startup reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// The live collection
    pub kanjis: Vec<Kanji>,
    /// Catalog changed since the stored marker (or no valid marker)
    pub should_update: bool,
    pub mode: Option<LinkMode>,
    pub base: BaseSource,
    /// Number of records decoded from the link
    pub imported: usize,
    /// Leave the query string in the address bar
    pub keep_query: bool,
    /// User-visible warning, if stored data was lost
    pub warning: Option<String>,
}

/// Reconcile stored state, defaults and link records, then persist
pub fn reconcile<S: KeyValueStore + ?Sized>(
    store: &mut S,
    keys: &StorageKeys,
    search: &str,
) -> Result<Reconciled, StorageError> {
    let started = instant::Instant::now();

    let link = DecodedLink::from_search(search);
    let policy = LinkMode::policy_for(link.mode);
    let resets = link.mode.map_or(false, |m| m.starts_from_default());

    let stored_version = store.get_item(&keys.version)?;
    let should_update = needs_update(stored_version.as_deref(), DEFAULT_KANJI_VERSION);

    let (stored, mut base, warning) = match load_kanjis(store, &keys.kanjis) {
        Ok(Some(kanjis)) => (Some(kanjis), BaseSource::Stored, None),
        Ok(None) => (None, BaseSource::FirstRun, None),
        Err(StorageError::Corrupt { key, message }) => {
            console_warn!("[KanjiStorage] Discarding corrupt '{}': {}", key, message);
            (None, BaseSource::Recovered, Some(RECOVERY_WARNING.to_string()))
        }
        Err(e) => return Err(e),
    };

    let base_kanjis = match stored {
        Some(kanjis) if !resets => kanjis,
        Some(_) => {
            base = BaseSource::Reset;
            default_kanjis()
        }
        None => default_kanjis(),
    };

    let imported = link.kanjis.len();
    let kanjis = remove_duplicates(base_kanjis.into_iter().chain(link.kanjis), &policy);

    // Two independent writes; a stale marker only re-raises `should_update`
    save_kanjis(store, &keys.kanjis, &kanjis)?;
    store.set_item(&keys.version, DEFAULT_KANJI_VERSION)?;

    console_log!(
        "[KanjiStorage] Loaded {} kanji (base: {:?}, mode: {}, {} from link) in {}us",
        kanjis.len(),
        base,
        link.mode.map(|m| m.to_string()).unwrap_or_else(|| "none".to_string()),
        imported,
        started.elapsed().as_micros()
    );

    Ok(Reconciled {
        kanjis,
        should_update,
        mode: link.mode,
        base,
        imported,
        keep_query: link.mode.map_or(false, |m| m.keeps_query()),
        warning,
    })
}
