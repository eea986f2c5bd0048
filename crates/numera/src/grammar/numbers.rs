//! Generic numeral helpers shared by locale grammars.
//!
//! Numbers are read as a sequence of groups. A group is a value below one
//! thousand optionally followed by a run of strictly increasing grouping
//! words, multiplied together ("dos mil millones" is 2 × 10³ × 10⁶). Each
//! group's multiplier must be smaller than the previous group's, so
//! "un millón doscientos mil" folds into 1 200 000.

use crate::numeral::Numeral;
use crate::stream::{Parsed, TokenStream};
use crate::token::Category;

/// A value below 1000 spelled with digit, teen, tens and hundred words, or a
/// raw number below 1000.
///
/// Filler (`IGNORE`) is skipped between parts but never before the first
/// one. Zero is only accepted on its own. Once an ordinal word is read only
/// ordinal words may follow, and the other way around.
pub fn number_less_than_1000(ts: TokenStream<'_>, allow_ordinal: bool) -> Parsed<'_, Numeral> {
    let first = ts.at(0);
    if first.is_raw_number() {
        let n = first.number.filter(|n| n.is_integer() && n.less_than(1000))?;
        return with_ordinal_suffix(n, ts.advance(1), allow_ordinal);
    }

    let mut cur = ts;
    let mut total: i64 = 0;
    let mut consumed = false;
    let mut ordinal = false;
    let (mut hundred, mut tens, mut teen, mut digit) = (false, false, false, false);

    loop {
        let skip = if consumed {
            cur.index_of_without_category(Category::IGNORE, 0)
        } else {
            0
        };
        let token = cur.at(skip as isize);
        if !token.has(Category::NUMBER) || token.is_raw_number() {
            break;
        }
        let Some(value) = token.number.filter(|n| n.is_integer()) else {
            break;
        };
        let value = value.integer_value();
        let is_ordinal = token.has(Category::ORDINAL);
        if (is_ordinal && !allow_ordinal) || (consumed && is_ordinal != ordinal) {
            break;
        }

        if token.has(Category::DIGIT) {
            if value == 0 {
                if consumed {
                    break;
                }
                return Some((Numeral::integer(0), cur.advance(1)));
            }
            if digit || teen {
                break;
            }
            total += value;
            digit = true;
        } else if token.has(Category::TEEN) {
            if digit || teen || tens {
                break;
            }
            total += value;
            teen = true;
        } else if token.has(Category::TENS) {
            if digit || teen || tens {
                break;
            }
            total += value;
            tens = true;
        } else if token.has(Category::HUNDRED) {
            if value == 100 && digit && !hundred && !tens && !teen && (2..=9).contains(&total) {
                // "tres cientos"
                total *= 100;
                digit = false;
            } else if hundred || tens || teen || digit {
                break;
            } else {
                total += value;
            }
            hundred = true;
        } else {
            break;
        }

        cur = cur.advance(skip + 1);
        consumed = true;
        ordinal = is_ordinal;
    }

    consumed.then(|| (Numeral::integer(total).with_ordinal(ordinal), cur))
}

/// One short-scale group. Returns the group value and its multiplier (1 when
/// no grouping word was read). The multiplier must stay below
/// `last_multiplier`.
pub fn number_group(
    ts: TokenStream<'_>,
    allow_ordinal: bool,
    last_multiplier: i64,
) -> Parsed<'_, (Numeral, i64)> {
    let (base, mut cur) = match number_less_than_1000(ts, allow_ordinal) {
        Some((n, cur)) => (Some(n), cur),
        None => (None, ts),
    };
    if let Some(base) = base.filter(Numeral::is_ordinal) {
        return Some(((base, 1), cur));
    }

    let mut multiplier: i64 = 1;
    let mut previous: i64 = 1;
    let mut ordinal = false;
    loop {
        let token = cur.at(0);
        if !token.has(Category::GROUPING) || token.is_raw_number() {
            break;
        }
        let Some(value) = token.number.filter(|n| n.is_integer()) else {
            break;
        };
        let value = value.integer_value();
        let is_ordinal = token.has(Category::ORDINAL);
        if value <= previous || (is_ordinal && !allow_ordinal) {
            break;
        }
        let Some(next) = multiplier
            .checked_mul(value)
            .filter(|m| *m < last_multiplier)
        else {
            break;
        };
        multiplier = next;
        previous = value;
        cur = cur.advance(1);
        if is_ordinal {
            ordinal = true;
            break;
        }
    }

    if multiplier == 1 {
        return base.map(|base| ((base, 1), cur));
    }
    let value = base.unwrap_or(Numeral::integer(1)) * Numeral::integer(multiplier);
    Some(((value.with_ordinal(ordinal), multiplier), cur))
}

/// Consecutive groups with decreasing multipliers, filler allowed between
/// them. Stops after an ordinal group or a group without grouping word.
pub fn number_made_of_groups(ts: TokenStream<'_>, allow_ordinal: bool) -> Parsed<'_, Numeral> {
    let ((mut total, mut last_multiplier), mut cur) = number_group(ts, allow_ordinal, i64::MAX)?;

    while !total.is_ordinal() && last_multiplier > 1 {
        let skip = cur.index_of_without_category(Category::IGNORE, 0);
        let Some(((value, multiplier), next)) =
            number_group(cur.advance(skip), allow_ordinal, last_multiplier)
        else {
            break;
        };
        total = (total + value).with_ordinal(value.is_ordinal());
        last_multiplier = multiplier;
        cur = next;
    }

    Some((total, cur))
}

/// A raw number of any size, with an optional ordinal suffix ("2023", "1º").
pub fn number_big_raw(ts: TokenStream<'_>, allow_ordinal: bool) -> Parsed<'_, Numeral> {
    let token = ts.at(0);
    if !token.is_raw_number() {
        return None;
    }
    with_ordinal_suffix(token.number?, ts.advance(1), allow_ordinal)
}

/// A trailing ordinal suffix makes `n` ordinal, or rejects it when ordinals
/// are not allowed.
fn with_ordinal_suffix(n: Numeral, cur: TokenStream<'_>, allow_ordinal: bool) -> Parsed<'_, Numeral> {
    if !cur.has(0, Category::ORDINAL_SUFFIX) {
        return Some((n, cur));
    }
    allow_ordinal.then(|| (n.with_ordinal(true), cur.advance(1)))
}

/// Runs `number` after an optional sign word, negating on a negative sign.
pub fn sign_before_number<'a>(
    ts: TokenStream<'a>,
    number: impl FnOnce(TokenStream<'a>) -> Parsed<'a, Numeral>,
) -> Parsed<'a, Numeral> {
    if !ts.has(0, Category::SIGN) {
        return number(ts);
    }
    let negative = ts.has(0, Category::NEGATIVE);
    let (n, cur) = number(ts.advance(1))?;
    Some((if negative { -n } else { n }, cur))
}

/// Runs `number` and keeps the result only if it is an integer in
/// `from..=to`.
pub fn extract_one_integer_in_range<'a>(
    ts: TokenStream<'a>,
    from: i64,
    to: i64,
    number: impl FnOnce(TokenStream<'a>) -> Parsed<'a, Numeral>,
) -> Parsed<'a, i64> {
    let (n, cur) = number(ts)?;
    if !n.is_integer() {
        return None;
    }
    let value = n.integer_value();
    (from..=to).contains(&value).then_some((value, cur))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::spanish;

    fn below_1000(text: &str, allow_ordinal: bool) -> Option<(Numeral, usize)> {
        let tokens = spanish(text);
        number_less_than_1000(TokenStream::new(&tokens), allow_ordinal)
            .map(|(n, cur)| (n, cur.position()))
    }

    fn groups(text: &str, allow_ordinal: bool) -> Option<(Numeral, usize)> {
        let tokens = spanish(text);
        number_made_of_groups(TokenStream::new(&tokens), allow_ordinal)
            .map(|(n, cur)| (n, cur.position()))
    }

    fn int(n: i64) -> Numeral {
        Numeral::integer(n)
    }

    fn ord(n: i64) -> Numeral {
        Numeral::integer(n).with_ordinal(true)
    }

    // ── number_less_than_1000 ───────────────────────────────────────────

    #[test]
    fn test_below_1000_compounds() {
        assert_eq!(below_1000("ciento veintitrés", false), Some((int(123), 2)));
        assert_eq!(
            below_1000("doscientos cuarenta y cinco", false),
            Some((int(245), 4))
        );
        assert_eq!(below_1000("novecientos noventa y nueve", false), Some((int(999), 4)));
    }

    #[test]
    fn test_below_1000_leaves_trailing_filler() {
        assert_eq!(below_1000("treinta y", false), Some((int(30), 1)));
        assert_eq!(below_1000("y tres", false), None);
    }

    #[test]
    fn test_below_1000_zero_only_alone() {
        assert_eq!(below_1000("cero cinco", false), Some((int(0), 1)));
        assert_eq!(below_1000("veinte cero", false), Some((int(20), 1)));
    }

    #[test]
    fn test_below_1000_rejects_invalid_order() {
        assert_eq!(below_1000("diez dos", false), Some((int(10), 1)));
        assert_eq!(below_1000("cinco treinta", false), Some((int(5), 1)));
        assert_eq!(below_1000("veinte ciento", false), Some((int(20), 1)));
    }

    #[test]
    fn test_below_1000_hundred_multiplier() {
        assert_eq!(below_1000("tres cientos", false), Some((int(300), 2)));
        assert_eq!(below_1000("tres cientos doce", false), Some((int(312), 3)));
    }

    #[test]
    fn test_below_1000_ordinals() {
        assert_eq!(below_1000("primero", false), None);
        assert_eq!(below_1000("primero", true), Some((ord(1), 1)));
        assert_eq!(below_1000("vigésimo primero", true), Some((ord(21), 2)));
        assert_eq!(below_1000("décimo quinto", true), Some((ord(15), 2)));
        assert_eq!(below_1000("veinte quinto", true), Some((int(20), 1)));
    }

    #[test]
    fn test_below_1000_raw_with_suffix() {
        assert_eq!(below_1000("12º", true), Some((ord(12), 2)));
        assert_eq!(below_1000("12º", false), None);
        assert_eq!(below_1000("999", false), Some((int(999), 1)));
        assert_eq!(below_1000("1000", false), None);
    }

    // ── groups ──────────────────────────────────────────────────────────

    #[test]
    fn test_groups_short_scale() {
        assert_eq!(
            groups("mil doscientos treinta y cuatro", false),
            Some((int(1234), 5))
        );
        assert_eq!(
            groups("dos millones quinientos mil", false),
            Some((int(2_500_000), 4))
        );
        assert_eq!(groups("dos mil veintitrés", false), Some((int(2023), 3)));
    }

    #[test]
    fn test_groups_multiply_increasing_run() {
        assert_eq!(groups("mil millones", false), Some((int(1_000_000_000), 2)));
        assert_eq!(
            groups("tres billones", false),
            Some((int(3_000_000_000_000), 2))
        );
    }

    #[test]
    fn test_groups_require_decreasing_multipliers() {
        assert_eq!(groups("mil mil", false), Some((int(1000), 1)));
        assert_eq!(groups("un millón mil", false), Some((int(1_001_000), 3)));
    }

    #[test]
    fn test_groups_skip_filler_between_groups() {
        assert_eq!(groups("dos mil y tres", false), Some((int(2003), 4)));
        assert_eq!(groups("dos mil y", false), Some((int(2000), 2)));
    }

    #[test]
    fn test_groups_overflow_to_decimal() {
        let (n, _) = groups("diez trillones", false).unwrap();
        assert!(n.is_decimal());
        assert_eq!(n, Numeral::decimal(1e19));
    }

    #[test]
    fn test_groups_ordinal_grouping() {
        assert_eq!(groups("dos milésimos", true), Some((ord(2000), 2)));
        assert_eq!(groups("dos milésimos", false), Some((int(2), 1)));
    }

    // ── big raw, sign, range ────────────────────────────────────────────

    #[test]
    fn test_big_raw() {
        let tokens = spanish("2023 1º");
        let ts = TokenStream::new(&tokens);
        let (n, cur) = number_big_raw(ts, false).unwrap();
        assert_eq!(n, int(2023));
        let (n, cur) = number_big_raw(cur, true).unwrap();
        assert_eq!(n, ord(1));
        assert!(cur.finished());
        assert!(number_big_raw(ts.advance(1), false).is_none());
    }

    #[test]
    fn test_sign_before_number() {
        let tokens = spanish("menos veinte");
        let (n, cur) =
            sign_before_number(TokenStream::new(&tokens), |ts| number_made_of_groups(ts, false))
                .unwrap();
        assert_eq!(n, int(-20));
        assert_eq!(cur.position(), 2);

        let tokens = spanish("menos hola");
        assert!(
            sign_before_number(TokenStream::new(&tokens), |ts| number_made_of_groups(ts, false))
                .is_none()
        );
    }

    #[test]
    fn test_extract_one_integer_in_range() {
        let tokens = spanish("treinta y dos");
        let ts = TokenStream::new(&tokens);
        let parse = |ts| number_made_of_groups(ts, false);
        assert!(extract_one_integer_in_range(ts, 1, 31, parse).is_none());
        let (value, cur) = extract_one_integer_in_range(ts, 1, 32, parse).unwrap();
        assert_eq!(value, 32);
        assert_eq!(cur.position(), 3);
    }
}
