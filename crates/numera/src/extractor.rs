//! Text-level extraction.
//!
//! An [`Extractor`] owns a compiled lexer and a locale binding. Each
//! `extract_*` method tokenizes the text, then tries the grammar at every
//! token position from left to right:
//!
//! - the singular forms return the first entity found anywhere in the text;
//! - the plural forms split the whole text into [`Segment`]s, alternating
//!   untouched text with entities.
//!
//! The reference instant for dates and times is always an argument. Nothing
//! here reads a clock.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::config::{language_of, LocaleConfig};
use crate::duration::Duration;
use crate::error::{NumeraError, Result};
use crate::grammar::date_time::DateTimeResult;
use crate::grammar::NumberMode;
use crate::lexer::Lexer;
use crate::locale::{parser_for, LocaleParser};
use crate::numeral::Numeral;
use crate::stream::{Parsed, TokenStream};
use crate::token::Token;

/// Reference instant formats accepted by [`parse_reference`].
const REFERENCE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Options for [`Extractor::extract_numeral`] and [`Extractor::extract_numerals`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// How words like "cuarto" are read.
    pub mode: NumberMode,
}

/// A piece of the input text: either untouched text or an extracted entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment<T> {
    Text {
        text: String,
    },
    Entity {
        value: T,
        /// The source text the entity was parsed from.
        text: String,
        /// Byte offsets into the input.
        start: usize,
        end: usize,
    },
}

impl<T> Segment<T> {
    pub fn entity(&self) -> Option<&T> {
        match self {
            Segment::Entity { value, .. } => Some(value),
            Segment::Text { .. } => None,
        }
    }
}

pub struct Extractor {
    locale: String,
    lexer: Lexer,
    parser: Box<dyn LocaleParser>,
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl Extractor {
    /// An extractor using the embedded table of a built-in locale.
    ///
    /// `locale` is matched on its language part, case-insensitively: `es`,
    /// `es-ES` and `es_es` all select Spanish.
    ///
    /// # Errors
    ///
    /// Returns [`NumeraError::UnsupportedLocale`] if no binding exists for
    /// the language.
    ///
    /// # Examples
    ///
    /// ```
    /// use numera::{ExtractOptions, Extractor, Numeral};
    ///
    /// let extractor = Extractor::for_locale("es-ES").unwrap();
    /// let n = extractor.extract_numeral("mil doscientos treinta y cuatro", &ExtractOptions::default());
    /// assert_eq!(n, Some(Numeral::integer(1234)));
    /// ```
    pub fn for_locale(locale: &str) -> Result<Self> {
        match language_of(locale).as_str() {
            "es" => Self::new(&LocaleConfig::spanish()?),
            _ => Err(NumeraError::UnsupportedLocale(locale.to_string())),
        }
    }

    /// An extractor for a caller-supplied table. The table's `locale` field
    /// selects the grammar.
    ///
    /// # Errors
    ///
    /// Returns [`NumeraError::UnsupportedLocale`] if no binding exists for
    /// the table's language, or [`NumeraError::UnknownCategory`] if the table
    /// names a category that does not exist.
    pub fn new(config: &LocaleConfig) -> Result<Self> {
        let parser = parser_for(&config.language())
            .ok_or_else(|| NumeraError::UnsupportedLocale(config.locale.clone()))?;
        let lexer = Lexer::new(config)?;
        debug!(locale = %config.locale, "extractor ready");
        Ok(Self {
            locale: config.locale.clone(),
            lexer,
            parser,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The categorized tokens of `text`.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.lexer.tokenize(text)
    }

    // ── Numerals ────────────────────────────────────────────────────────

    /// The first numeral in `text`.
    pub fn extract_numeral(&self, text: &str, options: &ExtractOptions) -> Option<Numeral> {
        self.first("numeral", text, |ts| self.parser.numeral(ts, options.mode))
    }

    /// `text` split into text and numerals.
    pub fn extract_numerals(&self, text: &str, options: &ExtractOptions) -> Vec<Segment<Numeral>> {
        self.segments("numeral", text, |ts| self.parser.numeral(ts, options.mode))
    }

    // ── Durations ───────────────────────────────────────────────────────

    /// The first duration in `text`.
    pub fn extract_duration(&self, text: &str) -> Option<Duration> {
        self.first("duration", text, |ts| self.parser.duration(ts))
    }

    /// `text` split into text and durations.
    pub fn extract_durations(&self, text: &str) -> Vec<Segment<Duration>> {
        self.segments("duration", text, |ts| self.parser.duration(ts))
    }

    // ── Dates and times ─────────────────────────────────────────────────

    /// The first date and/or time in `text`, relative to `reference`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use numera::{DateTimeResult, Extractor};
    ///
    /// let extractor = Extractor::for_locale("es").unwrap();
    /// let reference = NaiveDate::from_ymd_opt(2023, 8, 15)
    ///     .unwrap()
    ///     .and_hms_opt(14, 30, 0)
    ///     .unwrap();
    /// let found = extractor.extract_date_time("mañana a las tres de la tarde", reference);
    /// let expected = NaiveDate::from_ymd_opt(2023, 8, 16)
    ///     .unwrap()
    ///     .and_hms_opt(15, 0, 0)
    ///     .unwrap();
    /// assert_eq!(found, Some(DateTimeResult::DateTime(expected)));
    /// ```
    pub fn extract_date_time(
        &self,
        text: &str,
        reference: NaiveDateTime,
    ) -> Option<DateTimeResult> {
        self.first("date_time", text, |ts| self.parser.date_time(ts, reference))
    }

    /// `text` split into text and dates/times, relative to `reference`.
    pub fn extract_date_times(
        &self,
        text: &str,
        reference: NaiveDateTime,
    ) -> Vec<Segment<DateTimeResult>> {
        self.segments("date_time", text, |ts| self.parser.date_time(ts, reference))
    }

    // ── Scanning ────────────────────────────────────────────────────────

    fn first<T>(
        &self,
        kind: &'static str,
        text: &str,
        parse: impl for<'a> Fn(TokenStream<'a>) -> Parsed<'a, T>,
    ) -> Option<T> {
        let tokens = self.lexer.tokenize(text);
        let mut ts = TokenStream::new(&tokens);
        while !ts.finished() {
            if let Some((value, end)) = parse(ts) {
                debug!(
                    locale = %self.locale,
                    kind,
                    tokens = tokens.len(),
                    start = ts.position(),
                    end = end.position(),
                    "entity found"
                );
                return Some(value);
            }
            ts = ts.advance(1);
        }
        debug!(locale = %self.locale, kind, tokens = tokens.len(), "no entity found");
        None
    }

    fn segments<T>(
        &self,
        kind: &'static str,
        text: &str,
        parse: impl for<'a> Fn(TokenStream<'a>) -> Parsed<'a, T>,
    ) -> Vec<Segment<T>> {
        let tokens = self.lexer.tokenize(text);
        let mut segments = Vec::new();
        let mut text_start = 0;
        let mut ts = TokenStream::new(&tokens);

        while !ts.finished() {
            let found = parse(ts).filter(|(_, end)| end.position() > ts.position());
            let Some((value, end)) = found else {
                ts = ts.advance(1);
                continue;
            };

            // compound pieces share their word's span
            let start = ts.at(0).start.max(text_start);
            let stop = end.at(-1).end.max(start);
            push_text(&mut segments, &text[text_start..start]);
            segments.push(Segment::Entity {
                value,
                text: text[start..stop].to_string(),
                start,
                end: stop,
            });
            text_start = stop;
            ts = end;
        }
        push_text(&mut segments, &text[text_start..]);

        debug!(
            locale = %self.locale,
            kind,
            tokens = tokens.len(),
            entities = segments.iter().filter(|s| s.entity().is_some()).count(),
            "segmented"
        );
        segments
    }
}

fn push_text<T>(segments: &mut Vec<Segment<T>>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::Text {
            text: text.to_string(),
        });
    }
}

/// Parses a local reference instant such as `2023-08-15T14:30:00`.
///
/// # Errors
///
/// Returns [`NumeraError::InvalidReference`] if `input` matches none of the
/// accepted `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]` forms.
pub fn parse_reference(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    REFERENCE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| NumeraError::InvalidReference(input.to_string()))
}

// ── Tests ───────────────────────────────────────────────────────────────────
