//! Spanish numeral grammar.

use crate::grammar::numbers::{number_big_raw, number_made_of_groups, sign_before_number};
use crate::grammar::{NumberMode, NumeralGrammar};
use crate::numeral::Numeral;
use crate::stream::{Parsed, TokenStream};
use crate::token::Category;

/// Integers, decimals ("tres coma cinco", "3,5"), fractions ("dos tercios",
/// "uno entre cuatro"), ordinals ("vigésimo primero", "21º") and suffix
/// multipliers ("dos docenas", "50%") in short scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanishNumeralExtractor;

impl NumeralGrammar for SpanishNumeralExtractor {
    fn numeral<'a>(&self, ts: TokenStream<'a>, mode: NumberMode) -> Parsed<'a, Numeral> {
        match mode {
            NumberMode::PreferOrdinal => {
                let (n, cur) = self
                    .suffix_multiplier(ts)
                    .or_else(|| self.sign_point(ts, true))?;
                Some(self.divide_by_denominator_if_possible(n, cur))
            }
            NumberMode::PreferFraction => {
                match self
                    .suffix_multiplier(ts)
                    .or_else(|| self.sign_point(ts, false))
                {
                    Some((n, cur)) => Some(self.divide_by_denominator_if_possible(n, cur)),
                    None => self.sign_point(ts, true),
                }
            }
            NumberMode::NoOrdinal => {
                let (n, cur) = self
                    .suffix_multiplier(ts)
                    .or_else(|| self.sign_point(ts, false))?;
                Some(self.divide_by_denominator_if_possible(n, cur))
            }
        }
    }

    fn integer<'a>(&self, ts: TokenStream<'a>, allow_ordinal: bool) -> Parsed<'a, Numeral> {
        if ts.has(0, Category::IGNORE) {
            return None;
        }
        let Some((mut n, mut cur)) = number_made_of_groups(ts, allow_ordinal) else {
            return number_big_raw(ts, allow_ordinal);
        };
        if n.is_ordinal() || !n.less_than(1000) || !cur.at(-1).is_raw_number() {
            return Some((n, cur));
        }

        // "1.234.567": raw chunks of three digits after thousand separators
        let mut folded = false;
        while cur.has(0, Category::THOUSAND_SEPARATOR) && is_three_digit_chunk(cur, 1) {
            let chunk = cur.at(1).number.unwrap_or(Numeral::integer(0));
            n = n * Numeral::integer(1000) + chunk;
            cur = cur.advance(2);
            folded = true;
        }
        if folded && cur.has(0, Category::ORDINAL_SUFFIX) {
            if !allow_ordinal {
                return None;
            }
            return Some((n.with_ordinal(true), cur.advance(1)));
        }
        Some((n, cur))
    }
}

impl SpanishNumeralExtractor {
    /// A lone multiplier word: "media" is 0.5, "docena" 12.
    fn suffix_multiplier<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, Numeral> {
        if !ts.has(0, Category::SUFFIX_MULTIPLIER) {
            return None;
        }
        Some((ts.at(0).number?, ts.advance(1)))
    }

    fn sign_point<'a>(&self, ts: TokenStream<'a>, allow_ordinal: bool) -> Parsed<'a, Numeral> {
        sign_before_number(ts, |ts| self.point(ts, allow_ordinal))
    }

    /// An integer, optionally extended by a decimal point and its digits or
    /// by a fraction separator and a denominator.
    fn point<'a>(&self, ts: TokenStream<'a>, allow_ordinal: bool) -> Parsed<'a, Numeral> {
        let (n, cur) = self.integer(ts, allow_ordinal)?;
        if n.is_ordinal() {
            return Some((n, cur));
        }

        if cur.has(0, Category::POINT) {
            return Some(Self::decimal_part(n, cur));
        }

        if cur.has(0, Category::FRACTION_SEPARATOR) {
            let separator_len = if cur.has(1, Category::FRACTION_SEPARATOR_SECONDARY) {
                2
            } else {
                1
            };
            let denominator = self
                .integer(cur.advance(separator_len), false)
                .filter(|(d, _)| !d.is_integer() || d.integer_value() != 0);
            if let Some((denominator, after)) = denominator {
                return Some((n / denominator, after));
            }
        }

        Some((n, cur))
    }

    /// Digits after a point: a multi-digit raw number is read digit by digit,
    /// otherwise single digit words or single raw digits are accumulated.
    /// `cur` is on the point token; without digits after it `n` is returned
    /// as is and the point is not consumed.
    fn decimal_part(n: Numeral, cur: TokenStream<'_>) -> (Numeral, TokenStream<'_>) {
        let is_digit_after_point = |ts: TokenStream<'_>, offset: isize| {
            ts.has(offset, Category::DIGIT_AFTER_POINT)
                || (ts.at(offset).is_raw_number()
                    && !ts.has(offset + 1, Category::ORDINAL_SUFFIX))
        };
        if !is_digit_after_point(cur, 1) {
            return (n, cur);
        }

        let mut cur = cur.advance(1);
        let mut total = n;
        let mut scale = 10.0_f64;

        let first = cur.at(0);
        if first.is_raw_number() && first.value.len() > 1 {
            for digit in first.value.bytes().map(|b| f64::from(b - b'0')) {
                total = total + Numeral::decimal(digit / scale);
                scale *= 10.0;
            }
            return (total, cur.advance(1));
        }

        loop {
            let token = cur.at(0);
            let single_raw_digit = token.is_raw_number() && token.value.len() == 1;
            if !(token.has(Category::DIGIT_AFTER_POINT) || single_raw_digit)
                || (single_raw_digit && cur.has(1, Category::ORDINAL_SUFFIX))
            {
                break;
            }
            let Some(digit) = token.number else {
                break;
            };
            total = total + Numeral::decimal(digit.decimal_value() / scale);
            scale *= 10.0;
            cur = cur.advance(1);
        }
        (total, cur)
    }

    /// "dos quintos" is 2/5, "tres medios" 3/2, "dos docenas" 24.
    fn divide_by_denominator_if_possible<'a>(
        &self,
        n: Numeral,
        cur: TokenStream<'a>,
    ) -> (Numeral, TokenStream<'a>) {
        if n.is_ordinal() || n.is_decimal() || cur.has(0, Category::IGNORE) {
            return (n, cur);
        }

        match self.integer(cur, true) {
            Some((denominator, after)) => {
                if denominator.is_ordinal() && denominator.more_than(2) {
                    (n / denominator, after)
                } else {
                    (n, cur)
                }
            }
            None if cur.has(0, Category::SUFFIX_MULTIPLIER) => {
                let Some(multiplier) = cur.at(0).number else {
                    return (n, cur);
                };
                let after = cur.advance(1);
                let reciprocal = 1.0 / multiplier.decimal_value();
                if multiplier.is_decimal() && reciprocal.is_finite() && reciprocal.fract() == 0.0 {
                    (n / Numeral::integer(reciprocal as i64), after)
                } else {
                    (n * multiplier, after)
                }
            }
            None => (n, cur),
        }
    }
}

fn is_three_digit_chunk(ts: TokenStream<'_>, offset: isize) -> bool {
    let token = ts.at(offset);
    token.is_raw_number() && token.value.len() == 3
}

// ── Tests ───────────────────────────────────────────────────────────────────
