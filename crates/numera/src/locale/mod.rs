//! Locale bindings.
//!
//! A binding is the grammar half of a locale: Rust code composing the generic
//! parsers in [`crate::grammar`] with the locale's word order and idioms. The
//! word half lives in the locale's JSON table (see [`crate::config`]).

pub mod es;

use chrono::NaiveDateTime;

use crate::duration::Duration;
use crate::grammar::date_time::DateTimeResult;
use crate::grammar::NumberMode;
use crate::numeral::Numeral;
use crate::stream::{Parsed, TokenStream};

/// Entry points an [`Extractor`](crate::Extractor) needs from a binding.
pub trait LocaleParser: Send + Sync {
    fn numeral<'a>(&self, ts: TokenStream<'a>, mode: NumberMode) -> Parsed<'a, Numeral>;

    fn duration<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, Duration>;

    /// A date and/or time relative to `now`.
    fn date_time<'a>(
        &self,
        ts: TokenStream<'a>,
        now: NaiveDateTime,
    ) -> Parsed<'a, DateTimeResult>;
}

/// The binding for a language, if there is one.
pub(crate) fn parser_for(language: &str) -> Option<Box<dyn LocaleParser>> {
    match language {
        "es" => Some(Box::new(es::SpanishParser::default())),
        _ => None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
