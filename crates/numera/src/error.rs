//! Error types for numera setup operations.
//!
//! Extraction itself never fails: parsers return `None` when no entity is
//! found. Errors only arise while building an [`Extractor`](crate::Extractor)
//! from locale tables or while parsing caller-supplied reference instants.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NumeraError {
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Invalid locale data for '{locale}': {source}")]
    InvalidLocaleData {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown category '{name}' in locale '{locale}'")]
    UnknownCategory { locale: String, name: String },

    #[error("Invalid reference instant: {0}")]
    InvalidReference(String),
}

pub type Result<T> = std::result::Result<T, NumeraError>;
