//! Import mode flag
//!
//! Tells the receiving session how to fold link records into its own state:
//! - `t=a` add: keep existing, only add unknown kanji
//! - `t=r` reset: start from the default catalog, link overrides it
//! - `t=m` merge: keep existing level/type, take link statuses
//! - `t=p` preview: like add, but the URL is left in place
//!
//! Older links carry the flag as `f=`, and full words are accepted too.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::kanji::OverridePolicy;

static MODE_RE: OnceLock<Regex> = OnceLock::new();

fn mode_re() -> &'static Regex {
    MODE_RE.get_or_init(|| {
        Regex::new(r"(?i)(?:^|[?&])[tf]=(add|reset|merge|preview|force|a|r|m|p)(?:&|#|$)").unwrap()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    Add,
    Reset,
    Merge,
    Preview,
}

impl LinkMode {
    /// Single-letter flag written into share links
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Add => "a",
            Self::Reset => "r",
            Self::Merge => "m",
            Self::Preview => "p",
        }
    }

    /// Parse a flag value (letter or word, any case)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "a" | "add" => Some(Self::Add),
            "r" | "reset" => Some(Self::Reset),
            "m" | "merge" => Some(Self::Merge),
            "p" | "preview" | "force" => Some(Self::Preview),
            _ => None,
        }
    }

    /// Find the mode flag in a location search string
    pub fn from_search(search: &str) -> Option<Self> {
        mode_re()
            .captures(search)
            .and_then(|cap| Self::parse(&cap[1]))
    }

    /// Merge policy for link records against the base collection
    pub fn policy(&self) -> OverridePolicy {
        match self {
            Self::Add | Self::Preview => OverridePolicy::NoOverride,
            Self::Reset => OverridePolicy::OverrideAll,
            Self::Merge => OverridePolicy::MergeStatuses,
        }
    }

    /// Policy for an optional mode; no flag means no override
    pub fn policy_for(mode: Option<Self>) -> OverridePolicy {
        mode.map(|m| m.policy()).unwrap_or(OverridePolicy::NoOverride)
    }

    /// Reset rebuilds from the default catalog instead of stored state
    pub fn starts_from_default(&self) -> bool {
        matches!(self, Self::Reset)
    }

    /// Preview leaves the link in the address bar so it can be reopened
    pub fn keeps_query(&self) -> bool {
        matches!(self, Self::Preview)
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Reset => "reset",
            Self::Merge => "merge",
            Self::Preview => "preview",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_search_letters() {
        assert_eq!(LinkMode::from_search("?n=&c=&l=&t=a"), Some(LinkMode::Add));
        assert_eq!(LinkMode::from_search("?t=r&n=(木,1)"), Some(LinkMode::Reset));
        assert_eq!(LinkMode::from_search("?n=&t=M"), Some(LinkMode::Merge));
        assert_eq!(LinkMode::from_search("?t=p"), Some(LinkMode::Preview));
    }

    #[test]
    fn test_from_search_legacy_key_and_words() {
        assert_eq!(LinkMode::from_search("?f=reset"), Some(LinkMode::Reset));
        assert_eq!(LinkMode::from_search("?n=&f=force"), Some(LinkMode::Preview));
        assert_eq!(LinkMode::from_search("?t=merge&c="), Some(LinkMode::Merge));
    }

    #[test]
    fn test_unrecognized_or_absent() {
        assert_eq!(LinkMode::from_search(""), None);
        assert_eq!(LinkMode::from_search("?n=(木,1)"), None);
        assert_eq!(LinkMode::from_search("?t=x"), None);
        assert_eq!(LinkMode::from_search("?t=adding"), None);
        assert_eq!(LinkMode::from_search("?at=a"), None);
    }

    #[test]
    fn test_policies() {
        assert_eq!(LinkMode::Add.policy(), OverridePolicy::NoOverride);
        assert_eq!(LinkMode::Preview.policy(), OverridePolicy::NoOverride);
        assert_eq!(LinkMode::Reset.policy(), OverridePolicy::OverrideAll);
        assert_eq!(LinkMode::Merge.policy(), OverridePolicy::MergeStatuses);
        assert_eq!(LinkMode::policy_for(None), OverridePolicy::NoOverride);
    }

    #[test]
    fn test_flags_parse_back() {
        for mode in [LinkMode::Add, LinkMode::Reset, LinkMode::Merge, LinkMode::Preview] {
            assert_eq!(LinkMode::parse(mode.flag()), Some(mode));
            assert_eq!(LinkMode::parse(&mode.to_string()), Some(mode));
        }
    }
}
