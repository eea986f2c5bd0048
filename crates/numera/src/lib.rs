//! # numera
//!
//! Extraction of numbers, durations, dates and times from spoken-language
//! text, as produced by a speech recognizer.
//!
//! Text is split into categorized tokens by a table-driven lexer, then parsed
//! by small backtracking grammars. Every parser is a pure function of a
//! [`TokenStream`] cursor that either returns a value and the advanced
//! cursor, or `None` without consuming anything. Alternatives are tried in
//! priority order, and ambiguous readings are settled by keeping the one
//! that consumes the most tokens.
//!
//! ## Modules
//!
//! - [`token`] — token categories and tokens
//! - [`stream`] — the backtrackable cursor and its combinators
//! - [`lexer`] — text to categorized tokens
//! - [`config`] — locale word tables (JSON)
//! - [`numeral`] — integer/decimal values with an ordinal flag
//! - [`duration`] — calendar + exact durations
//! - [`grammar`] — locale-independent numeral, duration and date/time parsers
//! - [`locale`] — locale bindings (Spanish)
//! - [`extractor`] — text-level extraction entry points
//! - [`error`] — error types
//!
//! ## Example
//!
//! ```
//! use numera::{ExtractOptions, Extractor, Numeral};
//!
//! let extractor = Extractor::for_locale("es").unwrap();
//! let options = ExtractOptions::default();
//! assert_eq!(
//!     extractor.extract_numeral("dos millones quinientos mil", &options),
//!     Some(Numeral::integer(2_500_000))
//! );
//! assert_eq!(
//!     extractor.extract_numeral("tres punto uno cuatro", &options),
//!     Some(Numeral::decimal(3.14))
//! );
//! ```

pub mod config;
pub mod duration;
pub mod error;
pub mod extractor;
pub mod grammar;
pub mod lexer;
pub mod locale;
pub mod numeral;
pub mod stream;
pub mod token;

pub use config::LocaleConfig;
pub use duration::{Duration, DurationUnit};
pub use error::NumeraError;
pub use extractor::{parse_reference, ExtractOptions, Extractor, Segment};
pub use grammar::date_time::DateTimeResult;
pub use grammar::NumberMode;
pub use numeral::Numeral;
pub use stream::{Parsed, TokenStream};
pub use token::{Category, Token};
