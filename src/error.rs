//! Error types
//!
//! None of these are fatal: every state transition can be re-derived from
//! the default catalog.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures talking to the key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,

    #[error("failed to read '{key}': {message}")]
    Read { key: String, message: String },

    #[error("failed to write '{key}': {message}")]
    Write { key: String, message: String },

    /// Stored value exists but is not a valid kanji list
    #[error("stored value for '{key}' is corrupt: {message}")]
    Corrupt { key: String, message: String },

    #[error("failed to serialize kanji list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures building a share link
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid link origin '{origin}': {message}")]
    InvalidOrigin { origin: String, message: String },
}

/// Rejected add-form submissions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("level must be a positive integer, got '{0}'")]
    InvalidLevel(String),

    #[error("type must be 'base' or 'extra', got '{0}'")]
    InvalidType(String),

    #[error("status must be 'new', 'learning' or 'completed', got '{0}'")]
    InvalidStatus(String),

    #[error("'{0}' is reserved by the share-link format")]
    ReservedCharacter(String),
}

/// Any error surfaced by the tracker
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<TrackerError> for JsValue {
    fn from(e: TrackerError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

impl From<StorageError> for JsValue {
    fn from(e: StorageError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
