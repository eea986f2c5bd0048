//! Locale-independent grammar building blocks.
//!
//! Every parser here is a pure function of a [`TokenStream`]: it returns the
//! parsed value and the cursor after it, or `None` without consuming
//! anything. Locale bindings compose these pieces through the
//! [`NumeralGrammar`] trait.

pub mod date_time;
pub mod duration;
pub mod numbers;

use serde::{Deserialize, Serialize};

use crate::numeral::Numeral;
use crate::stream::{Parsed, TokenStream};

/// How to resolve words that can be read either as ordinals or as fraction
/// denominators ("un cuarto": the fourth, or a quarter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberMode {
    /// Read "cuarto" as the ordinal 4th.
    PreferOrdinal,
    /// Read "un cuarto" as 1/4, falling back to ordinals only when no
    /// cardinal reading exists.
    #[default]
    PreferFraction,
    /// Never produce ordinals; an ordinal-only phrase yields `None`.
    NoOrdinal,
}

/// The numeral grammar a locale plugs into the generic date/time and
/// duration parsers.
pub trait NumeralGrammar {
    /// A full numeral: integers, decimals, fractions, ordinals, multipliers.
    fn numeral<'a>(&self, ts: TokenStream<'a>, mode: NumberMode) -> Parsed<'a, Numeral>;

    /// An integer without sign, point or fraction.
    fn integer<'a>(&self, ts: TokenStream<'a>, allow_ordinal: bool) -> Parsed<'a, Numeral>;

    /// A signed cardinal integer within `from..=to`.
    fn integer_in_range<'a>(&self, ts: TokenStream<'a>, from: i64, to: i64) -> Parsed<'a, i64> {
        numbers::extract_one_integer_in_range(ts, from, to, |ts| {
            numbers::sign_before_number(ts, |ts| self.integer(ts, false))
        })
    }
}
