//! Numeric values produced by the numeral grammar.
//!
//! A [`Numeral`] is either an exact integer or a decimal, plus an `ordinal`
//! flag. The two flags are exclusive: only integers can be ordinals, so
//! marking a decimal as ordinal is a no-op. Arithmetic stays in integers while
//! the result is exact and representable, and degrades to decimals otherwise.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy)]
enum Value {
    Integer(i64),
    Decimal(f64),
}

/// A signed number with independent ordinal/decimal flags.
#[derive(Debug, Clone, Copy)]
pub struct Numeral {
    value: Value,
    ordinal: bool,
}

impl Numeral {
    /// An exact integer, not ordinal.
    pub const fn integer(value: i64) -> Self {
        Self {
            value: Value::Integer(value),
            ordinal: false,
        }
    }

    /// A decimal value. Decimals are never ordinal.
    pub const fn decimal(value: f64) -> Self {
        Self {
            value: Value::Decimal(value),
            ordinal: false,
        }
    }

    /// Returns a copy with the ordinal flag set. Ignored for decimals.
    pub fn with_ordinal(self, ordinal: bool) -> Self {
        Self {
            value: self.value,
            ordinal: ordinal && self.is_integer(),
        }
    }

    pub fn is_ordinal(&self) -> bool {
        self.ordinal
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self.value, Value::Decimal(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.value, Value::Integer(_))
    }

    /// The value truncated towards zero.
    pub fn integer_value(&self) -> i64 {
        match self.value {
            Value::Integer(v) => v,
            Value::Decimal(v) => v as i64,
        }
    }

    pub fn decimal_value(&self) -> f64 {
        match self.value {
            Value::Integer(v) => v as f64,
            Value::Decimal(v) => v,
        }
    }

    pub fn less_than(&self, other: i64) -> bool {
        match self.value {
            Value::Integer(v) => v < other,
            Value::Decimal(v) => v < other as f64,
        }
    }

    pub fn more_than(&self, other: i64) -> bool {
        match self.value {
            Value::Integer(v) => v > other,
            Value::Decimal(v) => v > other as f64,
        }
    }

    /// `true` for integers and for decimals with no fractional part.
    pub fn is_whole(&self) -> bool {
        match self.value {
            Value::Integer(_) => true,
            Value::Decimal(v) => v.is_finite() && v.fract() == 0.0,
        }
    }
}

impl From<i64> for Numeral {
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl From<f64> for Numeral {
    fn from(value: f64) -> Self {
        Self::decimal(value)
    }
}

impl Add for Numeral {
    type Output = Numeral;

    fn add(self, rhs: Numeral) -> Numeral {
        match (self.value, rhs.value) {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_add(b)
                .map(Numeral::integer)
                .unwrap_or_else(|| Numeral::decimal(a as f64 + b as f64)),
            _ => Numeral::decimal(self.decimal_value() + rhs.decimal_value()),
        }
    }
}

impl Mul for Numeral {
    type Output = Numeral;

    fn mul(self, rhs: Numeral) -> Numeral {
        match (self.value, rhs.value) {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_mul(b)
                .map(Numeral::integer)
                .unwrap_or_else(|| Numeral::decimal(a as f64 * b as f64)),
            _ => Numeral::decimal(self.decimal_value() * rhs.decimal_value()),
        }
    }
}

impl Div for Numeral {
    type Output = Numeral;

    fn div(self, rhs: Numeral) -> Numeral {
        match (self.value, rhs.value) {
            (Value::Integer(a), Value::Integer(b)) if a.checked_rem(b) == Some(0) => a
                .checked_div(b)
                .map(Numeral::integer)
                .unwrap_or_else(|| Numeral::decimal(a as f64 / b as f64)),
            _ => Numeral::decimal(self.decimal_value() / rhs.decimal_value()),
        }
    }
}

/// Negation keeps the ordinal flag ("menos doceavo" is the -12th).
impl Neg for Numeral {
    type Output = Numeral;

    fn neg(self) -> Numeral {
        let value = match self.value {
            Value::Integer(v) => v
                .checked_neg()
                .map(Value::Integer)
                .unwrap_or(Value::Decimal(-(v as f64))),
            Value::Decimal(v) => Value::Decimal(-v),
        };
        Numeral {
            value,
            ordinal: self.ordinal && matches!(value, Value::Integer(_)),
        }
    }
}

/// Flags must match; values compare exactly between integers and with a
/// relative tolerance of 1e-9 otherwise, so that digit-by-digit decimal
/// accumulation compares equal to the literal it spells.
impl PartialEq for Numeral {
    fn eq(&self, other: &Self) -> bool {
        if self.ordinal != other.ordinal {
            return false;
        }
        match (self.value, other.value) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            _ => approx_eq(self.decimal_value(), other.decimal_value()),
        }
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= scale * 1e-9
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for Numeral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Numeral", 3)?;
        match self.value {
            Value::Integer(v) => state.serialize_field("value", &v)?,
            Value::Decimal(v) => state.serialize_field("value", &v)?,
        }
        state.serialize_field("ordinal", &self.ordinal)?;
        state.serialize_field("decimal", &self.is_decimal())?;
        state.end()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_division_stays_exact() {
        let n = Numeral::integer(36) / Numeral::integer(12);
        assert!(n.is_integer());
        assert_eq!(n.integer_value(), 3);
    }

    #[test]
    fn test_inexact_division_becomes_decimal() {
        let n = Numeral::integer(3) / Numeral::integer(4);
        assert!(n.is_decimal());
        assert_eq!(n, Numeral::decimal(0.75));
    }

    #[test]
    fn test_division_by_zero_is_decimal_infinity() {
        let n = Numeral::integer(5) / Numeral::integer(0);
        assert!(n.is_decimal());
        assert!(n.decimal_value().is_infinite());
    }

    #[test]
    fn test_min_div_minus_one_is_decimal() {
        let n = Numeral::integer(i64::MIN) / Numeral::integer(-1);
        assert!(n.is_decimal());
        assert!((n.decimal_value() - 9.223_372_036_854_776e18).abs() < 1e4);
    }

    #[test]
    fn test_overflow_degrades_to_decimal() {
        let n = Numeral::integer(i64::MAX) * Numeral::integer(10);
        assert!(n.is_decimal());
        assert!(n.decimal_value() > 9.0e19);

        let n = Numeral::integer(i64::MAX) + Numeral::integer(1);
        assert!(n.is_decimal());
    }

    #[test]
    fn test_decimal_is_never_ordinal() {
        let n = Numeral::decimal(2.5).with_ordinal(true);
        assert!(!n.is_ordinal());
        assert!(n.is_decimal());
    }

    #[test]
    fn test_arithmetic_drops_ordinal() {
        let n = Numeral::integer(20).with_ordinal(true) + Numeral::integer(6);
        assert!(!n.is_ordinal());
    }

    #[test]
    fn test_negation_keeps_ordinal() {
        let n = -Numeral::integer(12).with_ordinal(true);
        assert!(n.is_ordinal());
        assert_eq!(n.integer_value(), -12);
    }

    #[test]
    fn test_equality_tolerates_accumulated_decimals() {
        let accumulated = Numeral::integer(3)
            + Numeral::integer(1) * Numeral::decimal(0.1)
            + Numeral::integer(4) * Numeral::decimal(0.01);
        assert_eq!(accumulated, Numeral::decimal(3.14));
        assert_ne!(accumulated, Numeral::decimal(3.15));
    }

    #[test]
    fn test_equality_checks_ordinal_flag() {
        assert_ne!(Numeral::integer(1), Numeral::integer(1).with_ordinal(true));
        assert_eq!(Numeral::integer(1), Numeral::decimal(1.0));
    }

    #[test]
    fn test_comparisons() {
        assert!(Numeral::integer(999).less_than(1000));
        assert!(!Numeral::integer(1000).less_than(1000));
        assert!(Numeral::decimal(2.5).more_than(2));
        assert!(Numeral::decimal(4.0).is_whole());
        assert!(!Numeral::decimal(0.5).is_whole());
    }

    #[test]
    fn test_serialize_shape() {
        let json = serde_json::to_value(Numeral::integer(7).with_ordinal(true)).unwrap();
        assert_eq!(json["value"], 7);
        assert_eq!(json["ordinal"], true);
        assert_eq!(json["decimal"], false);
    }
}
