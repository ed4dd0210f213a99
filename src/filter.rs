//! Grid filter
//!
//! A record is shown when ANY of these hold for the filter text:
//! - the text is empty
//! - the text contains the record's character
//! - some `lvl<N>` in the text (any case) equals the record's level
//! - `base` / `extra` appears and matches the type
//! - `new`, `learning`/`lrn`, `completed`/`cpl` appears and matches the status
//!
//! Keywords are plain substring checks, so `lvl2 extra` shows every level-2
//! record and every extra record.

use regex::Regex;
use std::sync::OnceLock;

use crate::kanji::{Kanji, KanjiStatus, KanjiType};

static LEVEL_RE: OnceLock<Regex> = OnceLock::new();

fn level_re() -> &'static Regex {
    LEVEL_RE.get_or_init(|| Regex::new(r"(?i)lvl(\d+)").unwrap())
}

/// Parsed filter text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanjiFilter {
    text: String,
    levels: Vec<u32>,
    types: Vec<KanjiType>,
    statuses: Vec<KanjiStatus>,
}

impl KanjiFilter {
    pub fn parse(text: &str) -> Self {
        let levels = level_re()
            .captures_iter(text)
            .filter_map(|cap| cap[1].parse::<u32>().ok())
            .collect();

        let mut types = Vec::new();
        if text.contains("base") {
            types.push(KanjiType::Base);
        }
        if text.contains("extra") {
            types.push(KanjiType::Extra);
        }

        let mut statuses = Vec::new();
        if text.contains("new") {
            statuses.push(KanjiStatus::New);
        }
        if text.contains("learning") || text.contains("lrn") {
            statuses.push(KanjiStatus::Learning);
        }
        if text.contains("completed") || text.contains("cpl") {
            statuses.push(KanjiStatus::Completed);
        }

        Self {
            text: text.to_string(),
            levels,
            types,
            statuses,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn matches(&self, kanji: &Kanji) -> bool {
        self.text.is_empty()
            || self.text.contains(kanji.kanji.as_str())
            || self.levels.contains(&kanji.lvl)
            || self.types.contains(&kanji.kanji_type)
            || self.statuses.contains(&kanji.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(c: &str, lvl: u32, t: KanjiType, s: KanjiStatus) -> Kanji {
        Kanji::new(c, lvl, t, s)
    }

    #[test]
    fn test_empty_matches_all() {
        let f = KanjiFilter::parse("");
        assert!(f.matches(&k("日", 1, KanjiType::Base, KanjiStatus::New)));
        assert!(f.matches(&k("烏", 9, KanjiType::Extra, KanjiStatus::Completed)));
    }

    #[test]
    fn test_character_substring() {
        let f = KanjiFilter::parse("森林");
        assert!(f.matches(&k("森", 1, KanjiType::Base, KanjiStatus::New)));
        assert!(f.matches(&k("林", 1, KanjiType::Base, KanjiStatus::New)));
        assert!(!f.matches(&k("木", 1, KanjiType::Base, KanjiStatus::New)));
    }

    #[test]
    fn test_level_or_type() {
        let f = KanjiFilter::parse("lvl2 extra");
        assert!(f.matches(&k("日", 2, KanjiType::Base, KanjiStatus::New)));
        assert!(f.matches(&k("月", 5, KanjiType::Extra, KanjiStatus::New)));
        assert!(!f.matches(&k("火", 1, KanjiType::Base, KanjiStatus::New)));
    }

    #[test]
    fn test_multiple_levels_case_insensitive() {
        let f = KanjiFilter::parse("LVL1 lvl12");
        assert!(f.matches(&k("日", 1, KanjiType::Base, KanjiStatus::Learning)));
        assert!(f.matches(&k("月", 12, KanjiType::Base, KanjiStatus::Learning)));
        assert!(!f.matches(&k("火", 2, KanjiType::Base, KanjiStatus::Learning)));
    }

    #[test]
    fn test_status_aliases() {
        let lrn = KanjiFilter::parse("lrn");
        assert!(lrn.matches(&k("a", 1, KanjiType::Base, KanjiStatus::Learning)));
        assert!(!lrn.matches(&k("a", 1, KanjiType::Base, KanjiStatus::Completed)));

        let cpl = KanjiFilter::parse("cpl");
        assert!(cpl.matches(&k("a", 1, KanjiType::Base, KanjiStatus::Completed)));

        let new = KanjiFilter::parse("new");
        assert!(new.matches(&k("a", 1, KanjiType::Base, KanjiStatus::New)));
        assert!(!new.matches(&k("a", 1, KanjiType::Base, KanjiStatus::Learning)));
    }

    #[test]
    fn test_unrelated_text_matches_nothing() {
        let f = KanjiFilter::parse("xyz");
        assert!(!f.matches(&k("日", 1, KanjiType::Base, KanjiStatus::New)));
    }
}
