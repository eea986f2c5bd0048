//! Locale-independent date and time building blocks.
//!
//! [`DateTimeHelpers`] holds the reference instant and the locale's numeral
//! grammar, and exposes the small parsers every locale binding composes:
//! weekday and month names, minutes and seconds, am/pm and era markers, and
//! the relative "next Tuesday" / "last March" idioms.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::duration::{Duration, DurationUnit};
use crate::grammar::NumeralGrammar;
use crate::stream::{Parsed, TokenStream};
use crate::token::Category;

pub const HOURS_IN_DAY: u32 = 24;

/// Day-part hours at or after noon are afternoon hours.
pub fn is_moment_of_day_pm(hour: u32) -> bool {
    hour >= 12
}

// ── Result ──────────────────────────────────────────────────────────────────

/// What a date/time expression resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DateTimeResult {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl DateTimeResult {
    /// Fills the missing half from `reference`: a date takes the reference
    /// time of day, a time takes the reference date.
    pub fn resolve(&self, reference: NaiveDateTime) -> NaiveDateTime {
        match *self {
            Self::Date(date) => date.and_time(reference.time()),
            Self::Time(time) => reference.date().and_time(time),
            Self::DateTime(date_time) => date_time,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match *self {
            Self::Date(date) => Some(date),
            Self::Time(_) => None,
            Self::DateTime(date_time) => Some(date_time.date()),
        }
    }

    pub fn time(&self) -> Option<NaiveTime> {
        match *self {
            Self::Date(_) => None,
            Self::Time(time) => Some(time),
            Self::DateTime(date_time) => Some(date_time.time()),
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Which way a relative idiom points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Future,
    Past,
}

impl Direction {
    fn flip(self) -> Self {
        match self {
            Self::Future => Self::Past,
            Self::Past => Self::Future,
        }
    }
}

/// Marker categories for [`DateTimeHelpers::marker`].
struct MarkerCategories {
    before: Category,
    after: Category,
    identifier: Category,
    before_combined: Category,
    after_combined: Category,
}

const AMPM: MarkerCategories = MarkerCategories {
    before: Category::AMPM_BEFORE,
    after: Category::AMPM_AFTER,
    identifier: Category::AMPM_IDENTIFIER,
    before_combined: Category::AMPM_BEFORE_COMBINED,
    after_combined: Category::AMPM_AFTER_COMBINED,
};

const BCAD: MarkerCategories = MarkerCategories {
    before: Category::BCAD_BEFORE,
    after: Category::BCAD_AFTER,
    identifier: Category::BCAD_IDENTIFIER,
    before_combined: Category::BCAD_BEFORE_COMBINED,
    after_combined: Category::BCAD_AFTER_COMBINED,
};

pub struct DateTimeHelpers<'g, G: ?Sized> {
    grammar: &'g G,
    now: NaiveDateTime,
}

impl<'g, G: NumeralGrammar + ?Sized> DateTimeHelpers<'g, G> {
    pub fn new(grammar: &'g G, now: NaiveDateTime) -> Self {
        Self { grammar, now }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Weekday name, Monday = 0.
    pub fn day_of_week<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, u32> {
        self.named_value(ts, Category::DAY_OF_WEEK, 0, 6)
    }

    /// Month name, January = 1.
    pub fn month_name<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, u32> {
        self.named_value(ts, Category::MONTH_NAME, 1, 12)
    }

    fn named_value<'a>(
        &self,
        ts: TokenStream<'a>,
        category: Category,
        from: u32,
        to: u32,
    ) -> Parsed<'a, u32> {
        let token = ts.at(0);
        if !token.has(category) {
            return None;
        }
        let value = u32::try_from(token.number?.integer_value()).ok()?;
        (from..=to).contains(&value).then(|| (value, ts.advance(1)))
    }

    /// 0 to 59, optionally followed by a minute unit word.
    pub fn minute<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, u32> {
        self.sexagesimal(ts, DurationUnit::Minute)
    }

    /// 0 to 59, optionally followed by a second unit word.
    pub fn second<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, u32> {
        self.sexagesimal(ts, DurationUnit::Second)
    }

    fn sexagesimal<'a>(&self, ts: TokenStream<'a>, unit: DurationUnit) -> Parsed<'a, u32> {
        let (value, cur) = self.grammar.integer_in_range(ts, 0, 59)?;
        let value = u32::try_from(value).ok()?;
        let skip = cur.index_of_without_category(Category::DATE_TIME_IGNORE, 0);
        if cur.at(skip as isize).unit == Some(unit) {
            return Some((value, cur.advance(skip + 1)));
        }
        Some((value, cur))
    }

    /// `true` for post meridiem.
    pub fn ampm<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, bool> {
        Self::marker(ts, &AMPM)
    }

    /// `true` for anno Domini, `false` for before Christ.
    pub fn bcad<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, bool> {
        Self::marker(ts, &BCAD)
    }

    /// A combined marker ("pm"), or a before/after word followed by the
    /// identifier word with date/time filler in between ("p. m.").
    fn marker<'a>(ts: TokenStream<'a>, categories: &MarkerCategories) -> Parsed<'a, bool> {
        if ts.has(0, categories.before_combined) {
            return Some((false, ts.advance(1)));
        }
        if ts.has(0, categories.after_combined) {
            return Some((true, ts.advance(1)));
        }

        let is_after = if ts.has(0, categories.before) {
            false
        } else if ts.has(0, categories.after) {
            true
        } else {
            return None;
        };
        let identifier = ts.index_of_without_category(Category::DATE_TIME_IGNORE, 1);
        ts.has(identifier as isize, categories.identifier)
            .then(|| (is_after, ts.advance(identifier + 1)))
    }

    /// "today": a day offset of zero.
    pub fn relative_today<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, i64> {
        ts.has(0, Category::TODAY).then(|| (0, ts.advance(1)))
    }

    /// Runs `inner` after a leading relative indicator ("en", "hace") or
    /// before a trailing one ("pasado", "después"). A negative indicator
    /// applies `negate` to the result. Without any indicator this fails.
    pub fn relative_indicator<'a, T>(
        &self,
        ts: TokenStream<'a>,
        inner: impl FnOnce(TokenStream<'a>) -> Parsed<'a, T>,
        negate: impl FnOnce(T) -> T,
    ) -> Parsed<'a, T> {
        if ts.has(0, Category::PRE_RELATIVE_INDICATOR) {
            let negative = ts.has(0, Category::NEGATIVE);
            let skip = ts.index_of_without_category(Category::DATE_TIME_IGNORE, 1);
            let (value, cur) = inner(ts.advance(skip))?;
            return Some((if negative { negate(value) } else { value }, cur));
        }

        let (value, cur) = inner(ts)?;
        let skip = cur.index_of_without_category(Category::DATE_TIME_IGNORE, 0);
        if !cur.has(skip as isize, Category::POST_RELATIVE_INDICATOR) {
            return None;
        }
        let negative = cur.has(skip as isize, Category::NEGATIVE);
        Some((if negative { negate(value) } else { value }, cur.advance(skip + 1)))
    }

    /// Signed day offset of "el próximo jueves", "hace dos lunes",
    /// "tres martes después". Going forward the same weekday counts as a
    /// week away; an optional count adds whole weeks.
    pub fn relative_day_of_week_duration<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, i64> {
        let ((count, day, direction), cur) = self.relative_indicator(
            ts,
            |cur| {
                let (count, cur) = match self.grammar.integer_in_range(cur, 1, 1000) {
                    Some((count, after)) => {
                        let skip = after.index_of_without_category(Category::DATE_TIME_IGNORE, 0);
                        (count, after.advance(skip))
                    }
                    None => (1, cur),
                };
                let (day, cur) = self.day_of_week(cur)?;
                Some(((count, i64::from(day), Direction::Future), cur))
            },
            |(count, day, direction)| (count, day, direction.flip()),
        )?;

        let today = i64::from(self.now.weekday().num_days_from_monday());
        let weeks = 7 * (count - 1);
        let days = match direction {
            Direction::Future => first_cyclic_distance(day - today, 7) + weeks,
            Direction::Past => -(first_cyclic_distance(today - day, 7) + weeks),
        };
        Some((days, cur))
    }

    /// Month offset of "el próximo septiembre", "febrero pasado". The
    /// current month counts as a year away.
    pub fn relative_month_duration<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, Duration> {
        let ((month, direction), cur) = self.relative_indicator(
            ts,
            |cur| {
                let (month, cur) = self.month_name(cur)?;
                Some(((i64::from(month), Direction::Future), cur))
            },
            |(month, direction)| (month, direction.flip()),
        )?;

        let current = i64::from(self.now.month());
        let months = match direction {
            Direction::Future => first_cyclic_distance(month - current, 12),
            Direction::Past => -first_cyclic_distance(current - month, 12),
        };
        Some((Duration::from_months(months), cur))
    }
}

/// `difference` folded into `1..=period`.
fn first_cyclic_distance(difference: i64, period: i64) -> i64 {
    match difference.rem_euclid(period) {
        0 => period,
        distance => distance,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
