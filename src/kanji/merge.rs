//! Dedup/Merge Engine
//!
//! Collapses duplicate characters in a kanji list under an explicit override
//! policy. Single left-to-right scan: the first occurrence fixes the output
//! position, later occurrences are resolved into it with
//! `policy(existing, incoming)`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Kanji;

// =============================================================================
// Override strategies
// =============================================================================

/// Conflict resolution for two records with the same character
pub trait OverrideStrategy {
    fn resolve(&self, existing: &Kanji, incoming: &Kanji) -> Kanji;
}

impl<F> OverrideStrategy for F
where
    F: Fn(&Kanji, &Kanji) -> Kanji,
{
    fn resolve(&self, existing: &Kanji, incoming: &Kanji) -> Kanji {
        self(existing, incoming)
    }
}

/// The three built-in policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverridePolicy {
    /// Incoming fully replaces existing
    OverrideAll,
    /// Existing keeps level/type, adopts incoming status
    MergeStatuses,
    /// Existing kept, incoming discarded
    #[default]
    NoOverride,
}

impl OverrideStrategy for OverridePolicy {
    fn resolve(&self, existing: &Kanji, incoming: &Kanji) -> Kanji {
        match self {
            Self::OverrideAll => incoming.clone(),
            Self::MergeStatuses => Kanji {
                status: incoming.status,
                ..existing.clone()
            },
            Self::NoOverride => existing.clone(),
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Deduplicate `kanjis` by character, resolving conflicts with `strategy`.
///
/// Output order is first-occurrence order. The character of the resolved
/// record always stays the key it was filed under.
pub fn remove_duplicates<I, S>(kanjis: I, strategy: &S) -> Vec<Kanji>
where
    I: IntoIterator<Item = Kanji>,
    S: OverrideStrategy + ?Sized,
{
    let mut out: Vec<Kanji> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for incoming in kanjis {
        let found = index.get(&incoming.kanji).copied();
        match found {
            Some(pos) => {
                let existing = &mut out[pos];
                let resolved = strategy.resolve(existing, &incoming);
                existing.lvl = resolved.lvl;
                existing.kanji_type = resolved.kanji_type;
                existing.status = resolved.status;
            }
            None => {
                index.insert(incoming.kanji.clone(), out.len());
                out.push(incoming);
            }
        }
    }

    out
}
