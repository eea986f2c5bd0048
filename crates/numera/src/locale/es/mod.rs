//! Spanish (`es`).

pub mod date_time;
pub mod numbers;

use chrono::NaiveDateTime;

use crate::duration::Duration;
use crate::grammar::date_time::DateTimeResult;
use crate::grammar::duration::duration;
use crate::grammar::{NumberMode, NumeralGrammar};
use crate::locale::LocaleParser;
use crate::numeral::Numeral;
use crate::stream::{Parsed, TokenStream};

pub use date_time::SpanishDateTimeExtractor;
pub use numbers::SpanishNumeralExtractor;

#[derive(Debug, Clone, Copy, Default)]
pub struct SpanishParser {
    numbers: SpanishNumeralExtractor,
}

impl LocaleParser for SpanishParser {
    fn numeral<'a>(&self, ts: TokenStream<'a>, mode: NumberMode) -> Parsed<'a, Numeral> {
        self.numbers.numeral(ts, mode)
    }

    fn duration<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, Duration> {
        duration(&self.numbers, ts)
    }

    fn date_time<'a>(
        &self,
        ts: TokenStream<'a>,
        now: NaiveDateTime,
    ) -> Parsed<'a, DateTimeResult> {
        SpanishDateTimeExtractor::new(&self.numbers, now).date_time(ts)
    }
}
