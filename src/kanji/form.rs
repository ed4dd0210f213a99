//! Add-form validation
//!
//! Turns a raw form submission into records. All-or-nothing: a rejected
//! submission yields no records.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use super::{Kanji, KanjiStatus, KanjiType};
use crate::error::FormError;
use crate::link::is_reserved;

/// Add-form fields exactly as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddRequest {
    /// One or more characters to add
    pub kanjis: Option<String>,
    pub lvl: Option<String>,
    #[serde(rename = "type")]
    pub kanji_type: Option<String>,
    pub status: Option<String>,
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, FormError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(FormError::MissingField(field)),
    }
}

impl AddRequest {
    /// Validate and expand into one record per grapheme
    pub fn validate(&self) -> Result<Vec<Kanji>, FormError> {
        let kanjis = required(&self.kanjis, "kanjis")?;
        let kanji_type = required(&self.kanji_type, "type")?;
        let status = required(&self.status, "status")?;
        let lvl = required(&self.lvl, "lvl")?;

        let lvl = match lvl.trim().parse::<u32>() {
            Ok(l) if l >= 1 => l,
            _ => return Err(FormError::InvalidLevel(lvl.to_string())),
        };
        let kanji_type =
            KanjiType::parse(kanji_type).ok_or_else(|| FormError::InvalidType(kanji_type.to_string()))?;
        let status =
            KanjiStatus::parse(status).ok_or_else(|| FormError::InvalidStatus(status.to_string()))?;

        let graphemes: Vec<&str> = kanjis
            .graphemes(true)
            .filter(|g| !g.chars().all(char::is_whitespace))
            .collect();
        if let Some(reserved) = graphemes.iter().find(|g| is_reserved(g)) {
            return Err(FormError::ReservedCharacter(reserved.to_string()));
        }

        Ok(graphemes
            .into_iter()
            .map(|g| Kanji::new(g, lvl, kanji_type, status))
            .collect())
    }
}
