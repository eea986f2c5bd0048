//! Spanish date and time composition.
//!
//! A date/time expression fills up to two slots, a date and a time of day.
//! [`SpanishDateTimeExtractor::date_time`] runs a date-first and a time-first
//! reading from the same position and keeps the one that consumed more
//! tokens, so "mañana a las tres de la tarde" resolves both slots while
//! "a las tres" alone stays a time.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use tracing::trace;

use crate::duration::Duration;
use crate::grammar::date_time::{
    is_moment_of_day_pm, DateTimeHelpers, DateTimeResult, HOURS_IN_DAY,
};
use crate::grammar::duration::duration;
use crate::grammar::{NumberMode, NumeralGrammar};
use crate::locale::es::numbers::SpanishNumeralExtractor;
use crate::stream::{Parsed, TokenStream};
use crate::token::Category;

/// Largest year accepted by [`SpanishDateTimeExtractor::date`].
const MAX_YEAR: i64 = 999_999_999;

pub struct SpanishDateTimeExtractor<'g> {
    numbers: &'g SpanishNumeralExtractor,
    helpers: DateTimeHelpers<'g, SpanishNumeralExtractor>,
}

impl<'g> SpanishDateTimeExtractor<'g> {
    pub fn new(numbers: &'g SpanishNumeralExtractor, now: NaiveDateTime) -> Self {
        Self {
            numbers,
            helpers: DateTimeHelpers::new(numbers, now),
        }
    }

    fn now(&self) -> NaiveDateTime {
        self.helpers.now()
    }

    // ── Composition ─────────────────────────────────────────────────────

    /// A date, a time, or both.
    pub fn date_time<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, DateTimeResult> {
        let date_first = |ts: TokenStream<'a>| {
            let parsed = self.date_time_from(ts, false);
            trace!(end = ?parsed.map(|(_, cur)| cur.position()), "date-first reading");
            parsed
        };
        let time_first = |ts: TokenStream<'a>| {
            let parsed = self.date_time_from(ts, true);
            trace!(end = ?parsed.map(|(_, cur)| cur.position()), "time-first reading");
            parsed
        };
        ts.first_which_uses_most_tokens(&[&date_first, &time_first])
    }

    fn date_time_from<'a>(
        &self,
        ts: TokenStream<'a>,
        time_first: bool,
    ) -> Parsed<'a, DateTimeResult> {
        let mut date: Option<NaiveDate> = None;
        let mut time: Option<NaiveTime> = None;
        let mut cur = ts;

        if !time_first {
            if let Some((day, next)) = self.relative_special_day(cur) {
                date = Some(day);
                cur = next;
            } else if let Some((offset, next)) = cur.first_some(&[
                &|ts| self.relative_duration(ts),
                &|ts| self.helpers.relative_month_duration(ts),
            ]) {
                let instant = offset.apply_as_offset(self.now())?;
                // Month and year offsets with no day part still count as a date.
                if offset.is_calendar_only() {
                    date = Some(instant.date());
                } else if offset.is_sub_day_only() {
                    time = Some(instant.time());
                } else {
                    return Some((DateTimeResult::DateTime(instant), next));
                }
                cur = next;
            } else if let Some((day, next)) = self.date(cur) {
                date = Some(day);
                cur = next;
            }
        }

        if time.is_none() {
            let consumed = cur.position() != ts.position();
            if let Some((found, next)) =
                cur.try_or_skip(Category::DATE_TIME_IGNORE, consumed, |c| self.time_with_ampm(c))
            {
                time = Some(found);
                cur = next;
            }
        }

        if date.is_none() && time.is_some() {
            if let Some((found, next)) = self.date_after_time(cur) {
                date = Some(found);
                cur = next;
            }
        }

        let result = match (date, time) {
            (Some(date), Some(time)) => DateTimeResult::DateTime(date.and_time(time)),
            (Some(date), None) => DateTimeResult::Date(date),
            (None, Some(time)) => DateTimeResult::Time(time),
            (None, None) => return None,
        };
        Some((result, cur))
    }

    /// A date following an already parsed time: a relative duration that
    /// only moves the calendar, or a special day, or an absolute date.
    fn date_after_time<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, NaiveDate> {
        if let Some((offset, next)) =
            ts.try_or_skip(Category::DATE_TIME_IGNORE, true, |c| self.relative_duration(c))
        {
            if !offset.is_calendar_only() {
                return None;
            }
            let instant = offset.apply_as_offset(self.now())?;
            return Some((instant.date(), next));
        }

        ts.try_or_skip(Category::DATE_TIME_IGNORE, true, |c| {
            c.first_some(&[&|ts| self.relative_special_day(ts), &|ts| self.date(ts)])
        })
    }

    // ── Time ────────────────────────────────────────────────────────────

    /// A time with its am/pm reading resolved from an explicit marker or a
    /// moment of day ("las tres de la tarde", "por la noche a las once").
    pub fn time_with_ampm<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, NaiveTime> {
        if let Some((time, cur)) = self.time(ts) {
            let pm = cur
                .try_or_skip(Category::DATE_TIME_IGNORE, true, |c| self.helpers.ampm(c))
                .or_else(|| {
                    cur.try_or_skip(Category::DATE_TIME_IGNORE, true, |c| {
                        self.moment_of_day(c)
                            .map(|(hour, next)| (is_moment_of_day_pm(hour), next))
                    })
                });
            return Some(match pm {
                Some((pm, next)) => (with_ampm(time, pm), next),
                None => (time, cur),
            });
        }

        let (moment, cur) = self.moment_of_day(ts)?;
        match cur.try_or_skip(Category::DATE_TIME_IGNORE, true, |c| self.time(c)) {
            Some((time, next)) => Some((with_ampm(time, is_moment_of_day_pm(moment)), next)),
            None => Some((NaiveTime::from_hms_opt(moment, 0, 0)?, cur)),
        }
    }

    /// Hour, then an optional minute, then an optional second.
    pub fn time<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, NaiveTime> {
        let (hour, cur) = ts.first_some(&[
            &|ts| self.noon_midnight_like(ts),
            &|ts| self.hour(ts),
        ])?;

        let minute = cur.try_or_skip(Category::DATE_TIME_IGNORE, true, |c| {
            c.first_some(&[&|ts| self.special_minute(ts), &|ts| self.helpers.minute(ts)])
        });
        let Some((minute, cur)) = minute else {
            return Some((NaiveTime::from_hms_opt(hour, 0, 0)?, cur));
        };

        let (second, cur) = cur
            .try_or_skip(Category::DATE_TIME_IGNORE, true, |c| self.helpers.second(c))
            .unwrap_or((0, cur));
        Some((NaiveTime::from_hms_opt(hour, minute, second)?, cur))
    }

    /// 0 to 24 after optional "a las", normalized to `0..24`.
    pub fn hour<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, u32> {
        let start = ts.advance(ts.index_of_without_category(Category::PRE_HOUR, 0));
        let (hour, cur) = self
            .numbers
            .integer_in_range(start, 0, i64::from(HOURS_IN_DAY))?;
        let hour = u32::try_from(hour).ok()?;
        Some((hour % HOURS_IN_DAY, cur))
    }

    /// Minutes spelled as a fraction of an hour: "y media" is 30, "y
    /// cuarto" 15, "un tercio" 20.
    pub fn special_minute<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, u32> {
        if let Some((n, cur)) = self.numbers.numeral(ts, NumberMode::NoOrdinal) {
            if !(n.is_decimal() && n.more_than(0) && n.less_than(1)) {
                return None;
            }
            let minute = (n.decimal_value() * 60.0).round() as u32;
            return (minute < 60).then_some((minute, cur));
        }

        let token = ts.at(0);
        if !token.has(Category::ORDINAL) {
            return None;
        }
        let denominator = token
            .number
            .filter(|n| n.is_integer() && n.more_than(2))?
            .integer_value();
        (60 % denominator == 0).then(|| ((60 / denominator) as u32, ts.advance(1)))
    }

    pub fn noon_midnight_like<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, u32> {
        self.special_hour(ts, Category::NOON_MIDNIGHT_LIKE)
    }

    pub fn moment_of_day<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, u32> {
        self.special_hour(ts, Category::MOMENT_OF_DAY)
    }

    /// A named hour of `category`, or "medio día" / "media noche", after an
    /// optional "este"/"a" or a relative word shifting it by an hour
    /// ("antes del almuerzo" is 11).
    fn special_hour<'a>(&self, ts: TokenStream<'a>, category: Category) -> Parsed<'a, u32> {
        let (shift, cur) = if !ts.has(0, Category::PRE_SPECIAL_HOUR) {
            (0, ts)
        } else if ts.has(0, Category::PRE_RELATIVE_INDICATOR) {
            let shift = if ts.has(0, Category::NEGATIVE) { -1 } else { 1 };
            (
                shift,
                ts.advance(ts.index_of_without_category(Category::DATE_TIME_IGNORE, 1)),
            )
        } else {
            (0, ts.advance(1))
        };

        let token = cur.at(0);
        if token.has(category) {
            let hour = token.number?.integer_value();
            return Some((shifted_hour(hour, shift), cur.advance(1)));
        }
        if cur.has(0, Category::MIDDLE) {
            if cur.has(1, Category::DAY_WORD) {
                return Some((shifted_hour(12, shift), cur.advance(2)));
            }
            if cur.has(1, Category::NIGHT_WORD) {
                return Some((shifted_hour(0, shift), cur.advance(2)));
            }
        }
        None
    }

    // ── Date ────────────────────────────────────────────────────────────

    /// "hoy", "ayer", "pasado mañana", "el próximo jueves".
    fn relative_special_day<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, NaiveDate> {
        let (days, cur) = ts.first_some(&[
            &|ts| self.relative_yesterday(ts),
            &|ts| self.helpers.relative_today(ts),
            &|ts| self.relative_tomorrow(ts),
            &|ts| self.helpers.relative_day_of_week_duration(ts),
        ])?;
        let date = self
            .now()
            .date()
            .checked_add_signed(TimeDelta::try_days(days)?)?;
        Some((date, cur))
    }

    /// "ayer" is -1; each leading "ante" adds a day ("anteayer", "antes de
    /// ayer" are -2). A bare "ayer" also takes one trailing adder ("ayer antes").
    pub fn relative_yesterday<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, i64> {
        let (adders, cur) = count_adders(ts, Category::YESTERDAY_ADDER);
        if !cur.has(0, Category::YESTERDAY) {
            return None;
        }
        let cur = cur.advance(1);
        let next = cur.index_of_without_category(Category::DATE_TIME_IGNORE, 0);
        if adders == 0 && cur.has(next as isize, Category::YESTERDAY_ADDER) {
            return Some((-2, cur.advance(next + 1)));
        }
        Some((-(adders + 1), cur))
    }

    /// "mañana" is 1; each leading "pasado" adds a day.
    pub fn relative_tomorrow<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, i64> {
        let (adders, cur) = count_adders(ts, Category::TOMORROW_ADDER);
        cur.has(0, Category::TOMORROW)
            .then(|| (adders + 1, cur.advance(1)))
    }

    /// An absolute date: weekday and/or day of month, month, year, era.
    ///
    /// A weekday alone is its next occurrence, today included. A day without
    /// month falls in the current month; a month without year in the current
    /// year; a year without month takes the current month and day 1.
    pub fn date<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, NaiveDate> {
        let today = self.now().date();

        let (weekday, cur) = match self.helpers.day_of_week(ts) {
            Some((weekday, next)) => (Some(weekday), next),
            None => (None, ts),
        };

        let (day, cur) = match cur.try_or_skip(Category::DATE_TIME_IGNORE, weekday.is_some(), |c| {
            self.numbers.integer_in_range(c, 1, 31)
        }) {
            Some((day, next)) => (u32::try_from(day).ok(), next),
            None => (None, cur),
        };

        if let (Some(weekday), None) = (weekday, day) {
            let ahead = i64::from(weekday) - i64::from(today.weekday().num_days_from_monday());
            let date = today.checked_add_signed(TimeDelta::try_days(ahead.rem_euclid(7))?)?;
            return Some((date, cur));
        }

        let (month, cur) = match cur.try_or_skip(Category::DATE_TIME_IGNORE, day.is_some(), |c| {
            c.first_some(&[
                &|ts| self.helpers.month_name(ts),
                &|ts| {
                    self.numbers
                        .integer_in_range(ts, 1, 12)
                        .and_then(|(m, next)| Some((u32::try_from(m).ok()?, next)))
                },
            ])
        }) {
            Some((month, next)) => (Some(month), next),
            None => (None, cur),
        };

        if month.is_none() {
            if let Some(day) = day {
                return Some((NaiveDate::from_ymd_opt(today.year(), today.month(), day)?, cur));
            }
        }

        let year = cur.try_or_skip(Category::DATE_TIME_IGNORE, month.is_some(), |c| {
            self.numbers.integer_in_range(c, 0, MAX_YEAR)
        });
        let Some((year, cur)) = year else {
            let month = month?;
            let date = NaiveDate::from_ymd_opt(today.year(), month, day.unwrap_or(1))?;
            return Some((date, cur));
        };

        let (year, cur) = match cur.try_or_skip(Category::DATE_TIME_IGNORE, true, |c| self.helpers.bcad(c)) {
            Some((false, next)) => (-year, next),
            Some((true, next)) => (year, next),
            None => (year, cur),
        };

        let date = NaiveDate::from_ymd_opt(
            i32::try_from(year).ok()?,
            month.unwrap_or(today.month()),
            day.unwrap_or(1),
        )?;
        Some((date, cur))
    }

    /// "en dos semanas", "tres días atrás", "hace un mes".
    pub fn relative_duration<'a>(&self, ts: TokenStream<'a>) -> Parsed<'a, Duration> {
        self.helpers
            .relative_indicator(ts, |c| duration(self.numbers, c), Duration::negate)
    }
}

/// Counts consecutive `category` words with date/time filler between them.
fn count_adders(ts: TokenStream<'_>, category: Category) -> (i64, TokenStream<'_>) {
    let mut count = 0;
    let mut cur = ts;
    while cur.has(0, category) {
        count += 1;
        cur = cur.advance(cur.index_of_without_category(Category::DATE_TIME_IGNORE, 1));
    }
    (count, cur)
}

fn shifted_hour(hour: i64, shift: i64) -> u32 {
    (hour + shift).rem_euclid(i64::from(HOURS_IN_DAY)) as u32
}

/// PM moves hours 1 to 11 into the afternoon; 0 and afternoon hours stay.
fn with_ampm(time: NaiveTime, pm: bool) -> NaiveTime {
    let hour = time.hour();
    if !pm || hour == 0 || hour >= 12 {
        return time;
    }
    time.with_hour((hour + 12) % HOURS_IN_DAY).unwrap_or(time)
}

// ── Tests ───────────────────────────────────────────────────────────────────
