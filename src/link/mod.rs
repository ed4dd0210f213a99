//! Link Codec
//!
//! Packs the part of a collection that differs from the default catalog into
//! a share link on the page's own origin:
//!
//! `https://host/?n=<new>&c=<completed>&l=<learning>&t=<mode>`
//!
//! Each bucket uses the grammar in `grammar.rs`. Records identical to the
//! default catalog are left out to keep links short, so they are not
//! round-tripped.

pub mod grammar;
pub mod mode;

pub use grammar::*;
pub use mode::*;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use url::Url;

use crate::console::console_warn;
use crate::error::LinkError;
use crate::kanji::{Kanji, KanjiStatus};

pub const NEW_PARAM: &str = "n";
pub const COMPLETED_PARAM: &str = "c";
pub const LEARNING_PARAM: &str = "l";
pub const MODE_PARAM: &str = "t";

static PARAM_RE: OnceLock<Regex> = OnceLock::new();

fn param_re() -> &'static Regex {
    // Group 1: bucket name, Group 2: raw (still URL-encoded) value
    PARAM_RE.get_or_init(|| Regex::new(r"(?i)(?:^|[?&])([ncl])=([^?&]*)").unwrap())
}

// =============================================================================
// Types
// =============================================================================

/// Encoded buckets, one per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkBuckets {
    pub new: String,
    pub completed: String,
    pub learning: String,
}

impl LinkBuckets {
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.completed.is_empty() && self.learning.is_empty()
    }
}

/// Everything carried by an opened link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedLink {
    /// Records in `n`, then `c`, then `l` order
    pub kanjis: Vec<Kanji>,
    pub mode: Option<LinkMode>,
}

impl DecodedLink {
    pub fn from_search(search: &str) -> Self {
        Self {
            kanjis: decode_query(search),
            mode: LinkMode::from_search(search),
        }
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Records that are missing from, or differ in any field from, `defaults`
pub fn diff_against_default<'a>(kanjis: &'a [Kanji], defaults: &[Kanji]) -> Vec<&'a Kanji> {
    let by_char: HashMap<&str, &Kanji> = defaults.iter().map(|k| (k.kanji.as_str(), k)).collect();

    kanjis
        .iter()
        .filter(|k| match by_char.get(k.kanji.as_str()) {
            Some(default) => !default.same_fields(k),
            None => true,
        })
        .collect()
}

/// Diff against `defaults` and encode one bucket per status
pub fn encode_buckets(kanjis: &[Kanji], defaults: &[Kanji]) -> LinkBuckets {
    let changed = diff_against_default(kanjis, defaults);
    let bucket = |status: KanjiStatus| encode_bucket(changed.iter().copied().filter(|k| k.status == status));

    LinkBuckets {
        new: bucket(KanjiStatus::New),
        completed: bucket(KanjiStatus::Completed),
        learning: bucket(KanjiStatus::Learning),
    }
}

/// Build a share link rooted at `origin` (e.g. `https://host`)
pub fn share_link(
    origin: &str,
    kanjis: &[Kanji],
    defaults: &[Kanji],
    mode: LinkMode,
) -> Result<String, LinkError> {
    let mut url = Url::parse(origin).map_err(|e| LinkError::InvalidOrigin {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(LinkError::InvalidOrigin {
            origin: origin.to_string(),
            message: "not a hierarchical URL".to_string(),
        });
    }

    let buckets = encode_buckets(kanjis, defaults);

    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut()
        .append_pair(NEW_PARAM, &buckets.new)
        .append_pair(COMPLETED_PARAM, &buckets.completed)
        .append_pair(LEARNING_PARAM, &buckets.learning)
        .append_pair(MODE_PARAM, mode.flag());

    Ok(url.to_string())
}

// =============================================================================
// Decoding
// =============================================================================

fn status_for_param(name: &str) -> Option<KanjiStatus> {
    match name {
        NEW_PARAM => Some(KanjiStatus::New),
        COMPLETED_PARAM => Some(KanjiStatus::Completed),
        LEARNING_PARAM => Some(KanjiStatus::Learning),
        _ => None,
    }
}

/// Raw value of the first `n`, `c` or `l` parameter with the given name
fn raw_param<'a>(search: &'a str, name: &str) -> Option<&'a str> {
    param_re()
        .captures_iter(search)
        .find(|cap| cap[1].eq_ignore_ascii_case(name))
        .and_then(|cap| cap.get(2))
        .map(|m| m.as_str())
}

/// Decode every record carried by a location search string (`?n=...`).
/// Malformed or absent buckets contribute nothing.
pub fn decode_query(search: &str) -> Vec<Kanji> {
    let mut out = Vec::new();

    for name in [NEW_PARAM, COMPLETED_PARAM, LEARNING_PARAM] {
        let Some(raw) = raw_param(search, name) else {
            continue;
        };
        let Some(status) = status_for_param(name) else {
            continue;
        };
        match urlencoding::decode(raw) {
            Ok(bucket) => out.extend(decode_bucket(&bucket, status)),
            Err(e) => console_warn!("[LinkCodec] Ignoring undecodable '{}' bucket: {}", name, e),
        }
    }

    out
}
