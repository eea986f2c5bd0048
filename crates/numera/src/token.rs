//! Categorized tokens produced by the lexer and consumed by the grammars.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::duration::{Duration, DurationUnit};
use crate::numeral::Numeral;

bitflags! {
    /// Closed set of token categories referenced by the grammars.
    ///
    /// Locale tables name these in snake_case (`"suffix_multiplier"`); see
    /// [`Category::from_table_name`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Category: u64 {
        // numbers
        const IGNORE = 1 << 0;
        const NUMBER = 1 << 1;
        const RAW = 1 << 2;
        const DIGIT = 1 << 3;
        const TEEN = 1 << 4;
        const TENS = 1 << 5;
        const HUNDRED = 1 << 6;
        const GROUPING = 1 << 7;
        const ORDINAL = 1 << 8;
        const ORDINAL_SUFFIX = 1 << 9;
        const POINT = 1 << 10;
        const DIGIT_AFTER_POINT = 1 << 11;
        const FRACTION_SEPARATOR = 1 << 12;
        const FRACTION_SEPARATOR_SECONDARY = 1 << 13;
        const THOUSAND_SEPARATOR = 1 << 14;
        const SIGN = 1 << 15;
        const NEGATIVE = 1 << 16;
        const SUFFIX_MULTIPLIER = 1 << 17;

        // durations
        const DURATION = 1 << 18;
        const DURATION_RESTRICTED_AFTER_NUMBER = 1 << 19;
        const OF = 1 << 20;

        // dates and times
        const DATE_TIME_IGNORE = 1 << 21;
        const PRE_HOUR = 1 << 22;
        const PRE_SPECIAL_HOUR = 1 << 23;
        const PRE_RELATIVE_INDICATOR = 1 << 24;
        const POST_RELATIVE_INDICATOR = 1 << 25;
        const NOON_MIDNIGHT_LIKE = 1 << 26;
        const MOMENT_OF_DAY = 1 << 27;
        const MIDDLE = 1 << 28;
        const DAY_WORD = 1 << 29;
        const NIGHT_WORD = 1 << 30;
        const TODAY = 1 << 31;
        const YESTERDAY = 1 << 32;
        const YESTERDAY_ADDER = 1 << 33;
        const TOMORROW = 1 << 34;
        const TOMORROW_ADDER = 1 << 35;
        const DAY_OF_WEEK = 1 << 36;
        const MONTH_NAME = 1 << 37;
        const AMPM_BEFORE = 1 << 38;
        const AMPM_AFTER = 1 << 39;
        const AMPM_IDENTIFIER = 1 << 40;
        const AMPM_BEFORE_COMBINED = 1 << 41;
        const AMPM_AFTER_COMBINED = 1 << 42;
        const BCAD_BEFORE = 1 << 43;
        const BCAD_AFTER = 1 << 44;
        const BCAD_IDENTIFIER = 1 << 45;
        const BCAD_BEFORE_COMBINED = 1 << 46;
        const BCAD_AFTER_COMBINED = 1 << 47;
    }
}

impl Category {
    /// Looks up a category by its snake_case table name.
    pub fn from_table_name(name: &str) -> Option<Category> {
        Category::from_name(&name.to_ascii_uppercase())
    }
}

/// A token of the input text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Text as it appears in the input.
    pub value: String,
    /// Lowercase, accent-folded form used for table lookups.
    pub key: String,
    /// Byte offset of the first character in the input.
    pub start: usize,
    /// Byte offset one past the last character in the input.
    pub end: usize,
    pub categories: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<Numeral>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<DurationUnit>,
}

/// Returned by out-of-range lookups; has no categories and no value.
pub(crate) static EMPTY_TOKEN: Token = Token {
    value: String::new(),
    key: String::new(),
    start: 0,
    end: 0,
    categories: Category::empty(),
    number: None,
    unit: None,
};

impl Token {
    /// `true` if the token has any of the given categories.
    pub fn has(&self, category: Category) -> bool {
        self.categories.intersects(category)
    }

    /// Non-empty and made only of ASCII digits.
    pub fn is_raw_number(&self) -> bool {
        !self.value.is_empty() && self.value.bytes().all(|b| b.is_ascii_digit())
    }

    /// The duration of one unit, when the token names a unit.
    pub fn duration(&self) -> Option<Duration> {
        self.unit.map(DurationUnit::to_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(value: &str) -> Token {
        Token {
            value: value.to_string(),
            key: value.to_lowercase(),
            start: 0,
            end: value.len(),
            categories: Category::empty(),
            number: None,
            unit: None,
        }
    }

    #[test]
    fn test_category_from_table_name() {
        assert_eq!(
            Category::from_table_name("suffix_multiplier"),
            Some(Category::SUFFIX_MULTIPLIER)
        );
        assert_eq!(
            Category::from_table_name("date_time_ignore"),
            Some(Category::DATE_TIME_IGNORE)
        );
        assert_eq!(Category::from_table_name("no_such_category"), None);
    }

    #[test]
    fn test_has_any_of() {
        let mut t = token("y");
        t.categories = Category::IGNORE | Category::DATE_TIME_IGNORE;
        assert!(t.has(Category::IGNORE));
        assert!(t.has(Category::IGNORE | Category::POINT));
        assert!(!t.has(Category::POINT));
    }

    #[test]
    fn test_is_raw_number() {
        assert!(token("2023").is_raw_number());
        assert!(!token("12a").is_raw_number());
        assert!(!token("").is_raw_number());
        assert!(!EMPTY_TOKEN.is_raw_number());
    }

    #[test]
    fn test_unit_duration() {
        let mut t = token("días");
        t.unit = Some(DurationUnit::Day);
        assert_eq!(t.duration(), Some(Duration::from_days(1)));
        assert_eq!(token("x").duration(), None);
    }
}
