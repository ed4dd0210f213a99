//! Bucket grammar
//!
//! A bucket is a run of groups, one per `(type, level)`:
//! - `(勉強,2)` - base kanji 勉 and 強 at level 2
//! - `[失態,4]` - extra kanji 失 and 態 at level 4
//!
//! The opening bracket alone decides the type; the closing bracket may be
//! either. Existing shared links depend on this exact grammar.
//!
//! A group's characters never span a bracket, so a malformed group is
//! dropped on its own and the next group still decodes. Brackets and `,`
//! are reserved and cannot appear as record characters.

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

use crate::kanji::{Kanji, KanjiStatus, KanjiType};

static GROUP_RE: OnceLock<Regex> = OnceLock::new();

/// Graphemes with meaning in the bucket grammar
pub const RESERVED_GRAPHEMES: [&str; 5] = ["(", ")", "[", "]", ","];

pub fn is_reserved(grapheme: &str) -> bool {
    RESERVED_GRAPHEMES.contains(&grapheme)
}

fn group_re() -> &'static Regex {
    // Group 1: opening bracket, Group 2: characters, Group 3: level
    GROUP_RE.get_or_init(|| Regex::new(r"(\(|\[)([^()\[\]]*?),(\d+)(?:\)|\])").unwrap())
}

// =============================================================================
// Encoding
// =============================================================================

/// Render one bucket. Base groups come first, then extra groups; within a
/// type, groups appear in the order their level was first seen.
///
/// Records whose character is a reserved grapheme (see [`is_reserved`]) do
/// not survive a round trip; the add form rejects them.
pub fn encode_bucket<'a, I>(kanjis: I) -> String
where
    I: IntoIterator<Item = &'a Kanji>,
{
    let mut base: Vec<(u32, String)> = Vec::new();
    let mut extra: Vec<(u32, String)> = Vec::new();

    for k in kanjis {
        let groups = match k.kanji_type {
            KanjiType::Base => &mut base,
            KanjiType::Extra => &mut extra,
        };
        match groups.iter().position(|(lvl, _)| *lvl == k.lvl) {
            Some(i) => groups[i].1.push_str(&k.kanji),
            None => groups.push((k.lvl, k.kanji.clone())),
        }
    }

    let mut out = String::new();
    for (lvl, chars) in &base {
        out.push_str(&format!("({},{})", chars, lvl));
    }
    for (lvl, chars) in &extra {
        out.push_str(&format!("[{},{}]", chars, lvl));
    }
    out
}

// =============================================================================
// Decoding
// =============================================================================

/// Parse an already URL-decoded bucket. Every grapheme of a group becomes a
/// record with `status`. Groups whose level is not a positive integer are
/// dropped; anything unmatched is ignored.
pub fn decode_bucket(bucket: &str, status: KanjiStatus) -> Vec<Kanji> {
    let mut out = Vec::new();

    for cap in group_re().captures_iter(bucket) {
        let kanji_type = match &cap[1] {
            "(" => KanjiType::Base,
            _ => KanjiType::Extra,
        };
        let lvl = match cap[3].parse::<u32>() {
            Ok(l) if l >= 1 => l,
            _ => continue,
        };
        for g in cap[2].graphemes(true) {
            if g.chars().all(char::is_whitespace) || is_reserved(g) {
                continue;
            }
            out.push(Kanji::new(g, lvl, kanji_type, status));
        }
    }

    out
}
