//! Catalog version marker
//!
//! `MAJOR.MINOR.PATCH`, optional leading `v`, optional `-pre` / `+build`
//! suffix (ignored for ordering).

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CatalogVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl CatalogVersion {
    /// Strict parse; anything that is not three numeric parts is invalid
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix('v').unwrap_or(s);
        let core = s.split(['-', '+']).next()?;

        let mut parts = core.split('.');
        let mut next = || -> Option<u32> {
            let part = parts.next()?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse().ok()
        };
        let version = Self {
            major: next()?,
            minor: next()?,
            patch: next()?,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(version)
    }
}

impl fmt::Display for CatalogVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// True when the stored marker is missing, invalid, or older than `current`
pub fn needs_update(stored: Option<&str>, current: &str) -> bool {
    let Some(stored) = stored.and_then(CatalogVersion::parse) else {
        return true;
    };
    match CatalogVersion::parse(current) {
        Some(current) => current.cmp(&stored) == Ordering::Greater,
        None => false,
    }
}
