//! KanjiStore: the live collection
//!
//! Holds the reconciled collection and applies view mutations. Persistence
//! is injected as a callback and runs after every successful mutation, so
//! the store itself never touches storage.

use crate::console::console_error;
use crate::error::{FormError, StorageError, TrackerError};
use crate::filter::KanjiFilter;
use crate::kanji::{default_kanjis, AddRequest, Kanji, KanjiPatch, KanjiStatus};

/// Persistence callback, invoked with the full collection after a mutation
pub type Persist = Box<dyn FnMut(&[Kanji]) -> Result<(), StorageError>>;

pub struct KanjiStore {
    kanjis: Vec<Kanji>,
    should_update: bool,
    persist: Persist,
}

impl std::fmt::Debug for KanjiStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KanjiStore")
            .field("kanjis", &self.kanjis.len())
            .field("should_update", &self.should_update)
            .finish()
    }
}

impl KanjiStore {
    pub fn new(kanjis: Vec<Kanji>, should_update: bool, persist: Persist) -> Self {
        Self {
            kanjis,
            should_update,
            persist,
        }
    }

    /// Store that persists nowhere
    pub fn detached(kanjis: Vec<Kanji>) -> Self {
        Self::new(kanjis, false, Box::new(|_: &[Kanji]| -> Result<(), StorageError> { Ok(()) }))
    }

    pub fn kanjis(&self) -> &[Kanji] {
        &self.kanjis
    }

    pub fn get(&self, kanji: &str) -> Option<&Kanji> {
        self.kanjis.iter().find(|k| k.kanji == kanji)
    }

    pub fn len(&self) -> usize {
        self.kanjis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kanjis.is_empty()
    }

    pub fn should_update(&self) -> bool {
        self.should_update
    }

    pub fn set_should_update(&mut self, should_update: bool) {
        self.should_update = should_update;
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        (self.persist)(&self.kanjis).map_err(|e| {
            console_error!("[KanjiStore] Failed to persist {} kanji: {}", self.kanjis.len(), e);
            e
        })
    }

    /// Replace the whole collection with `mutation(current)`
    pub fn mutate_kanjis<F>(&mut self, mutation: F) -> Result<(), StorageError>
    where
        F: FnOnce(Vec<Kanji>) -> Vec<Kanji>,
    {
        let current = std::mem::take(&mut self.kanjis);
        self.kanjis = mutation(current);
        self.persist()
    }

    /// Apply a partial update. Returns false (and persists nothing) when the
    /// character is not in the collection.
    pub fn update_kanji(&mut self, kanji: &str, patch: &KanjiPatch) -> Result<bool, StorageError> {
        let Some(found) = self.kanjis.iter_mut().find(|k| k.kanji == kanji) else {
            return Ok(false);
        };
        patch.apply(found);
        self.persist()?;
        Ok(true)
    }

    /// Advance a record's status: new -> learning -> completed -> new
    pub fn cycle_status(&mut self, kanji: &str) -> Result<Option<KanjiStatus>, StorageError> {
        let Some(next) = self.get(kanji).map(|k| k.status.next()) else {
            return Ok(None);
        };
        self.update_kanji(kanji, &KanjiPatch::status(next))?;
        Ok(Some(next))
    }

    /// Append a record unless its character is already present
    pub fn add_kanji(&mut self, kanji: Kanji) -> Result<bool, StorageError> {
        Ok(self.add_kanjis(std::iter::once(kanji))? == 1)
    }

    /// Append every record whose character is not yet present; persists once.
    /// Returns how many were added.
    pub fn add_kanjis<I>(&mut self, kanjis: I) -> Result<usize, StorageError>
    where
        I: IntoIterator<Item = Kanji>,
    {
        let mut added = 0;
        for kanji in kanjis {
            if self.get(&kanji.kanji).is_none() {
                self.kanjis.push(kanji);
                added += 1;
            }
        }
        if added > 0 {
            self.persist()?;
        }
        Ok(added)
    }

    /// Validate an add-form submission and add its records
    pub fn add_from_form(&mut self, request: &AddRequest) -> Result<usize, TrackerError> {
        let kanjis: Vec<Kanji> = request.validate().map_err(|e: FormError| {
            console_error!("[KanjiStore] Rejected add form: {}", e);
            e
        })?;
        Ok(self.add_kanjis(kanjis)?)
    }

    /// Remove a record; returns false when it was not present
    pub fn remove_kanji(&mut self, kanji: &str) -> Result<bool, StorageError> {
        let before = self.kanjis.len();
        self.kanjis.retain(|k| k.kanji != kanji);
        if self.kanjis.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Replace everything with a fresh default catalog
    pub fn reset_to_default(&mut self) -> Result<(), StorageError> {
        self.mutate_kanjis(|_| default_kanjis())
    }

    /// Records matching a filter string, in collection order
    pub fn filtered(&self, filter: &KanjiFilter) -> Vec<&Kanji> {
        self.kanjis.iter().filter(|k| filter.matches(k)).collect()
    }
}
