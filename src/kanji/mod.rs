//! Kanji record model
//!
//! One entry of the user's collection: the character, its curriculum level,
//! whether it belongs to the base or extra list, and learning progress.
//! The serialized shape matches what is kept in local storage:
//! `{ "kanji": "日", "lvl": 1, "type": "base", "status": "new" }`.

pub mod catalog;
pub mod form;
pub mod merge;

pub use catalog::*;
pub use form::*;
pub use merge::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Enumerations
// =============================================================================

/// Learning progress marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KanjiStatus {
    #[default]
    New,
    Learning,
    Completed,
}

impl KanjiStatus {
    pub const ALL: [KanjiStatus; 3] = [Self::New, Self::Learning, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Completed => "completed",
        }
    }

    /// Parse the stored/form spelling
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "learning" => Some(Self::Learning),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Next status on primary activation: new -> learning -> completed -> new
    pub fn next(&self) -> Self {
        match self {
            Self::New => Self::Learning,
            Self::Learning => Self::Completed,
            Self::Completed => Self::New,
        }
    }
}

impl fmt::Display for KanjiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base curriculum or supplementary list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KanjiType {
    #[default]
    Base,
    Extra,
}

impl KanjiType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Extra => "extra",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "base" => Some(Self::Base),
            "extra" => Some(Self::Extra),
            _ => None,
        }
    }
}

impl fmt::Display for KanjiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Kanji
// =============================================================================

/// A single tracked character
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Kanji {
    /// One grapheme, unique within a collection
    pub kanji: String,
    /// Curriculum tier, >= 1
    pub lvl: u32,
    #[serde(rename = "type")]
    pub kanji_type: KanjiType,
    pub status: KanjiStatus,
}

impl Kanji {
    pub fn new(kanji: impl Into<String>, lvl: u32, kanji_type: KanjiType, status: KanjiStatus) -> Self {
        Self {
            kanji: kanji.into(),
            lvl,
            kanji_type,
            status,
        }
    }

    /// True when level, type and status all match `other`
    pub fn same_fields(&self, other: &Kanji) -> bool {
        self.lvl == other.lvl && self.kanji_type == other.kanji_type && self.status == other.status
    }
}

/// Partial update for an existing record; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanjiPatch {
    pub lvl: Option<u32>,
    #[serde(rename = "type")]
    pub kanji_type: Option<KanjiType>,
    pub status: Option<KanjiStatus>,
}

impl KanjiPatch {
    pub fn status(status: KanjiStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn apply(&self, target: &mut Kanji) {
        if let Some(lvl) = self.lvl.filter(|l| *l >= 1) {
            target.lvl = lvl;
        }
        if let Some(kanji_type) = self.kanji_type {
            target.kanji_type = kanji_type;
        }
        if let Some(status) = self.status {
            target.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_cycle() {
        assert_eq!(KanjiStatus::New.next(), KanjiStatus::Learning);
        assert_eq!(KanjiStatus::Learning.next(), KanjiStatus::Completed);
        assert_eq!(KanjiStatus::Completed.next(), KanjiStatus::New);
    }

    #[test]
    fn test_stored_json_shape() {
        let k = Kanji::new("日", 1, KanjiType::Base, KanjiStatus::Learning);
        let json = serde_json::to_value(&k).unwrap();
        assert_eq!(json["kanji"], "日");
        assert_eq!(json["lvl"], 1);
        assert_eq!(json["type"], "base");
        assert_eq!(json["status"], "learning");
    }

    #[test]
    fn test_parse_stored_record() {
        let k: Kanji =
            serde_json::from_str(r#"{"status":"completed","type":"extra","kanji":"烏","lvl":3}"#).unwrap();
        assert_eq!(k, Kanji::new("烏", 3, KanjiType::Extra, KanjiStatus::Completed));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let res: Result<Kanji, _> =
            serde_json::from_str(r#"{"status":"done","type":"base","kanji":"日","lvl":1}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_patch_leaves_missing_fields() {
        let mut k = Kanji::new("日", 1, KanjiType::Base, KanjiStatus::New);
        KanjiPatch::status(KanjiStatus::Completed).apply(&mut k);
        assert_eq!(k, Kanji::new("日", 1, KanjiType::Base, KanjiStatus::Completed));

        let patch: KanjiPatch = serde_json::from_str(r#"{"lvl":4,"type":"extra"}"#).unwrap();
        patch.apply(&mut k);
        assert_eq!(k, Kanji::new("日", 4, KanjiType::Extra, KanjiStatus::Completed));
    }

    #[test]
    fn test_patch_ignores_zero_level() {
        let mut k = Kanji::new("日", 2, KanjiType::Base, KanjiStatus::New);
        KanjiPatch { lvl: Some(0), ..Default::default() }.apply(&mut k);
        assert_eq!(k.lvl, 2);
    }

    #[test]
    fn test_parse_spellings() {
        assert_eq!(KanjiType::parse("extra"), Some(KanjiType::Extra));
        assert_eq!(KanjiType::parse("Extra"), None);
        assert_eq!(KanjiStatus::parse("learning"), Some(KanjiStatus::Learning));
        assert_eq!(KanjiStatus::parse("lrn"), None);
    }
}
