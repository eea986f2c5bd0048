//! Calendar-aware durations.
//!
//! A [`Duration`] keeps years, months and days apart from the exact sub-day
//! part, because "in 2 months" has to move the calendar month rather than add
//! a fixed number of seconds. The parts are only collapsed when a caller asks
//! for a [`TimeDelta`] via [`Duration::to_time_delta`].

use std::fmt;

use chrono::{Months, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::numeral::Numeral;

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const SECONDS_PER_DAY: i64 = 86_400;
const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;
/// Mean Gregorian month (365.2425 / 12 days).
const SECONDS_PER_MEAN_MONTH: i64 = 2_629_746;
const SECONDS_PER_MEAN_YEAR: i64 = SECONDS_PER_MEAN_MONTH * 12;
const DAYS_PER_MEAN_MONTH: f64 = SECONDS_PER_MEAN_MONTH as f64 / SECONDS_PER_DAY as f64;

// ── Units ───────────────────────────────────────────────────────────────────

/// A unit word in the locale tables ("hora", "semana", "siglo", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
    Decade,
    Century,
    Millennium,
}

impl DurationUnit {
    /// One of this unit as a [`Duration`].
    pub fn to_duration(self) -> Duration {
        match self {
            Self::Nanosecond => Duration::from_nanos(1),
            Self::Microsecond => Duration::from_nanos(1_000),
            Self::Millisecond => Duration::from_nanos(1_000_000),
            Self::Second => Duration::from_nanos(NANOS_PER_SECOND),
            Self::Minute => Duration::from_nanos(60 * NANOS_PER_SECOND),
            Self::Hour => Duration::from_nanos(3_600 * NANOS_PER_SECOND),
            Self::Day => Duration::from_days(1),
            Self::Week => Duration::from_days(7),
            Self::Month => Duration::from_months(1),
            Self::Year => Duration::from_years(1),
            Self::Decade => Duration::from_years(10),
            Self::Century => Duration::from_years(100),
            Self::Millennium => Duration::from_years(1_000),
        }
    }
}

// ── Duration ────────────────────────────────────────────────────────────────

/// A signed offset with independent calendar (years, months, days) and exact
/// (nanosecond) components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Duration {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub nanos: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration {
        years: 0,
        months: 0,
        days: 0,
        nanos: 0,
    };

    pub const fn from_years(years: i64) -> Self {
        Self {
            years,
            ..Self::ZERO
        }
    }

    pub const fn from_months(months: i64) -> Self {
        Self {
            months,
            ..Self::ZERO
        }
    }

    pub const fn from_days(days: i64) -> Self {
        Self { days, ..Self::ZERO }
    }

    pub const fn from_nanos(nanos: i64) -> Self {
        Self {
            nanos,
            ..Self::ZERO
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Only years, months or days are set.
    pub fn is_calendar_only(&self) -> bool {
        self.nanos == 0 && (self.years != 0 || self.months != 0 || self.days != 0)
    }

    /// Only the exact sub-day part is set.
    pub fn is_sub_day_only(&self) -> bool {
        self.nanos != 0 && self.years == 0 && self.months == 0 && self.days == 0
    }

    pub fn plus(self, other: Duration) -> Duration {
        Duration {
            years: self.years.saturating_add(other.years),
            months: self.months.saturating_add(other.months),
            days: self.days.saturating_add(other.days),
            nanos: self.nanos.saturating_add(other.nanos),
        }
    }

    pub fn negate(self) -> Duration {
        Duration {
            years: self.years.saturating_neg(),
            months: self.months.saturating_neg(),
            days: self.days.saturating_neg(),
            nanos: self.nanos.saturating_neg(),
        }
    }

    /// Scales every component by `factor`.
    ///
    /// Integer factors scale exactly. Fractional results cascade into the next
    /// smaller component: a fraction of a year becomes months, a fraction of a
    /// month becomes days (mean Gregorian month) and a fraction of a day
    /// becomes nanoseconds. "Half a year" is therefore 6 months, not 182 days.
    pub fn multiply(self, factor: Numeral) -> Duration {
        if factor.is_integer() {
            let k = factor.integer_value();
            return Duration {
                years: self.years.saturating_mul(k),
                months: self.months.saturating_mul(k),
                days: self.days.saturating_mul(k),
                nanos: self.nanos.saturating_mul(k),
            };
        }

        let f = factor.decimal_value();
        let years = self.years as f64 * f;
        let months = self.months as f64 * f + years.fract() * 12.0;
        let days = self.days as f64 * f + months.fract() * DAYS_PER_MEAN_MONTH;
        let nanos = self.nanos as f64 * f + days.fract() * NANOS_PER_DAY as f64;
        Duration {
            years: years.trunc() as i64,
            months: months.trunc() as i64,
            days: days.trunc() as i64,
            nanos: nanos.round() as i64,
        }
    }

    /// Applies this duration to `reference`: months (clamped to the end of
    /// the target month), then days, then the exact part.
    ///
    /// Returns `None` when the result is outside chrono's supported range.
    pub fn apply_as_offset(&self, reference: NaiveDateTime) -> Option<NaiveDateTime> {
        let total_months = self.years.checked_mul(12)?.checked_add(self.months)?;
        let months = Months::new(u32::try_from(total_months.unsigned_abs()).ok()?);
        let shifted = if total_months >= 0 {
            reference.checked_add_months(months)?
        } else {
            reference.checked_sub_months(months)?
        };

        shifted
            .checked_add_signed(TimeDelta::try_days(self.days)?)?
            .checked_add_signed(TimeDelta::nanoseconds(self.nanos))
    }

    /// Flattens into an exact [`TimeDelta`] using mean year and month lengths.
    pub fn to_time_delta(&self) -> Option<TimeDelta> {
        let seconds = self
            .years
            .checked_mul(SECONDS_PER_MEAN_YEAR)?
            .checked_add(self.months.checked_mul(SECONDS_PER_MEAN_MONTH)?)?
            .checked_add(self.days.checked_mul(SECONDS_PER_DAY)?)?;
        TimeDelta::try_seconds(seconds)?.checked_add(&TimeDelta::nanoseconds(self.nanos))
    }
}

/// Human-readable form, e.g. "1 year, 2 days, 4 hours, 30 minutes".
/// Negative durations are prefixed with `-` and zero prints "0 seconds".
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = if self.years < 0
            || self.months < 0
            || self.days < 0
            || (self.years == 0 && self.months == 0 && self.days == 0 && self.nanos < 0)
        {
            f.write_str("-")?;
            self.negate()
        } else {
            *self
        };

        let abs_nanos = d.nanos.unsigned_abs();
        let total_seconds = abs_nanos / NANOS_PER_SECOND as u64;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        let sub_second = abs_nanos % NANOS_PER_SECOND as u64;

        let mut parts = Vec::new();
        push_part(&mut parts, d.years.unsigned_abs(), "year");
        push_part(&mut parts, d.months.unsigned_abs(), "month");
        push_part(&mut parts, d.days.unsigned_abs(), "day");
        push_part(&mut parts, hours, "hour");
        push_part(&mut parts, minutes, "minute");
        if sub_second > 0 {
            let secs = seconds as f64 + sub_second as f64 / NANOS_PER_SECOND as f64;
            parts.push(format!("{secs} seconds"));
        } else if seconds > 0 || parts.is_empty() {
            parts.push(format!(
                "{} second{}",
                seconds,
                if seconds == 1 { "" } else { "s" }
            ));
        }
        f.write_str(&parts.join(", "))
    }
}

fn push_part(parts: &mut Vec<String>, amount: u64, unit: &str) {
    if amount > 0 {
        parts.push(format!(
            "{} {}{}",
            amount,
            unit,
            if amount == 1 { "" } else { "s" }
        ));
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
