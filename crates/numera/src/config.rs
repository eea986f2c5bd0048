//! Locale tables.
//!
//! A locale binding pairs a grammar (Rust code under [`crate::locale`]) with a
//! word table (data). Tables are JSON documents deserialized into
//! [`LocaleConfig`]; the built-in ones are embedded at compile time, and
//! [`LocaleConfig::from_json`] accepts a caller-supplied table for an existing
//! grammar.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::duration::DurationUnit;
use crate::error::{NumeraError, Result};
use crate::numeral::Numeral;

const SPANISH_TABLE: &str = include_str!("locale/es/tables.json");

/// Word tables for one locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Locale id such as `es-ES`. The language part selects the grammar.
    pub locale: String,
    /// Characters that separate tokens, in addition to Unicode whitespace.
    #[serde(default)]
    pub spaces: String,
    /// Characters that always form a token on their own (`%`, `-`, `.`).
    #[serde(default)]
    pub characters_as_word: String,
    /// Endings stripped to find the singular form of an unknown word.
    #[serde(default)]
    pub plural_endings: Vec<String>,
    /// Endings turning a cardinal into an ordinal ("trece" + "avo").
    #[serde(default)]
    pub ordinal_suffixes: Vec<String>,
    /// Letters appended to an ordinal stem to recover the cardinal
    /// ("treint" + "a").
    #[serde(default)]
    pub ordinal_stem_completions: Vec<String>,
    /// Words that lex as several tokens sharing one span.
    #[serde(default)]
    pub compound_words: BTreeMap<String, Vec<String>>,
    /// Category name to the words carrying it.
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
    /// Words with a numeric value.
    #[serde(default)]
    pub numbers: Vec<NumberEntry>,
    /// Duration unit words.
    #[serde(default)]
    pub durations: Vec<DurationEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberEntry {
    pub value: NumberValue,
    #[serde(default)]
    pub ordinal: bool,
    #[serde(default)]
    pub categories: Vec<String>,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    Integer(i64),
    Decimal(f64),
}

impl NumberValue {
    pub fn to_numeral(self, ordinal: bool) -> Numeral {
        match self {
            NumberValue::Integer(v) => Numeral::integer(v).with_ordinal(ordinal),
            NumberValue::Decimal(v) => Numeral::decimal(v),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationEntry {
    pub unit: DurationUnit,
    pub words: Vec<String>,
    /// Abbreviations only recognized directly after a number ("3 h").
    #[serde(default)]
    pub restricted: Vec<String>,
}

impl LocaleConfig {
    /// The embedded Spanish table.
    pub fn spanish() -> Result<Self> {
        Self::from_json("es", SPANISH_TABLE)
    }

    /// Parses a table. `locale` only labels errors; the table's own
    /// `locale` field is kept.
    ///
    /// # Errors
    ///
    /// Returns [`NumeraError::InvalidLocaleData`] if the JSON does not match
    /// the table schema.
    pub fn from_json(locale: &str, json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| NumeraError::InvalidLocaleData {
            locale: locale.to_string(),
            source,
        })
    }

    /// Language part of [`LocaleConfig::locale`], lowercased (`es-ES` -> `es`).
    pub fn language(&self) -> String {
        language_of(&self.locale)
    }
}

/// Lowercased language subtag of a locale id. Accepts `-` and `_`.
pub(crate) fn language_of(id: &str) -> String {
    id.split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanish_table_loads() {
        let config = LocaleConfig::spanish().unwrap();
        assert_eq!(config.language(), "es");
        assert!(config.categories.contains_key("ignore"));
        assert!(config.numbers.iter().any(|n| n.words.iter().any(|w| w == "mil")));
        assert!(config
            .durations
            .iter()
            .any(|d| d.unit == DurationUnit::Hour && d.restricted.iter().any(|w| w == "h")));
    }

    #[test]
    fn test_number_value_untagged() {
        let entry: NumberEntry =
            serde_json::from_str(r#"{"value": 0.5, "words": ["medio"]}"#).unwrap();
        assert_eq!(entry.value, NumberValue::Decimal(0.5));
        let entry: NumberEntry =
            serde_json::from_str(r#"{"value": 12, "ordinal": true, "words": ["duodécimo"]}"#)
                .unwrap();
        assert_eq!(entry.value, NumberValue::Integer(12));
        assert!(entry.value.to_numeral(entry.ordinal).is_ordinal());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = LocaleConfig::from_json("xx", "{ not json").unwrap_err();
        assert!(matches!(err, NumeraError::InvalidLocaleData { .. }));
        assert!(err.to_string().contains("'xx'"));
    }

    #[test]
    fn test_language_of() {
        assert_eq!(language_of("es-ES"), "es");
        assert_eq!(language_of("ES_es"), "es");
        assert_eq!(language_of("es"), "es");
    }
}
