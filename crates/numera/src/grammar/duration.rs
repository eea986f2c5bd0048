//! Duration grammar: numerals followed by unit words, chained.

use crate::duration::Duration;
use crate::grammar::{NumberMode, NumeralGrammar};
use crate::stream::{Parsed, TokenStream};
use crate::token::Category;

/// Filler allowed between two duration groups ("dos horas, y diez minutos").
const GROUP_SEPARATOR: Category = Category::IGNORE.union(Category::DATE_TIME_IGNORE);

/// One or more duration groups. Filler is only skipped between groups, so
/// the stream must start with a numeral or a unit word.
pub fn duration<'a, G: NumeralGrammar + ?Sized>(
    grammar: &G,
    ts: TokenStream<'a>,
) -> Parsed<'a, Duration> {
    let (mut total, mut cur) = duration_group(grammar, ts)?;
    loop {
        let skip = cur.index_of_without_category(GROUP_SEPARATOR, 0);
        match duration_group(grammar, cur.advance(skip)) {
            Some((group, next)) => {
                total = total.plus(group);
                cur = next;
            }
            None => break,
        }
    }
    Some((total, cur))
}

/// `<numeral> [filler] [of] [filler] <unit>` or a bare, unabbreviated unit.
fn duration_group<'a, G: NumeralGrammar + ?Sized>(
    grammar: &G,
    ts: TokenStream<'a>,
) -> Parsed<'a, Duration> {
    let Some((n, after_number)) = grammar.numeral(ts, NumberMode::NoOrdinal) else {
        let token = ts.at(0);
        if token.has(Category::DURATION_RESTRICTED_AFTER_NUMBER) {
            return None;
        }
        return Some((token.duration()?, ts.advance(1)));
    };

    let mut offset = after_number.index_of_without_category(Category::IGNORE, 0);
    if after_number.has(offset as isize, Category::OF) {
        offset = after_number.index_of_without_category(Category::IGNORE, offset + 1);
    }

    let token = after_number.at(offset as isize);
    if offset > 0 && token.has(Category::DURATION_RESTRICTED_AFTER_NUMBER) {
        return None;
    }
    let unit = token.duration()?;
    Some((unit.multiply(n), after_number.advance(offset + 1)))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::NANOS_PER_SECOND;
    use crate::lexer::spanish;
    use crate::locale::es::SpanishNumeralExtractor;

    const MINUTE: i64 = 60 * NANOS_PER_SECOND;
    const HOUR: i64 = 60 * MINUTE;

    fn parse(text: &str) -> Option<(Duration, usize)> {
        let tokens = spanish(text);
        duration(&SpanishNumeralExtractor, TokenStream::new(&tokens))
            .map(|(d, cur)| (d, cur.position()))
    }

    fn nanos(n: i64) -> Duration {
        Duration::from_nanos(n)
    }

    #[test]
    fn test_number_and_unit() {
        assert_eq!(parse("mil millones de nanosegundos"), Some((nanos(NANOS_PER_SECOND), 4)));
        assert_eq!(parse("18s"), Some((nanos(18 * NANOS_PER_SECOND), 2)));
        assert_eq!(parse("un seg"), Some((nanos(NANOS_PER_SECOND), 2)));
        assert_eq!(parse("veintitrés horas"), Some((nanos(23 * HOUR), 2)));
        assert_eq!(parse("6 meses"), Some((Duration::from_months(6), 2)));
        assert_eq!(parse("quince décadas"), Some((Duration::from_years(150), 2)));
        assert_eq!(parse("1 milenio"), Some((Duration::from_years(1000), 2)));
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(parse("media hora"), Some((nanos(HOUR / 2), 2)));
        assert_eq!(parse("medio día"), Some((nanos(12 * HOUR), 2)));
        assert_eq!(parse("medio año"), Some((Duration::from_months(6), 2)));
        assert_eq!(
            parse("dos décimas de segundo"),
            Some((nanos(NANOS_PER_SECOND / 5), 4))
        );
    }

    #[test]
    fn test_filler_and_of_connector() {
        assert_eq!(parse("diez y semanas y"), Some((Duration::from_days(70), 3)));
        assert_eq!(parse("un par de horas"), Some((nanos(2 * HOUR), 4)));
    }

    #[test]
    fn test_no_duration() {
        assert_eq!(parse("cuatro tres milenios cuatro"), None);
        assert_eq!(parse("y diez y semanas y"), None);
        assert_eq!(parse("cien pruebas"), None);
        assert_eq!(parse("hola milisegundo"), None);
        assert_eq!(parse("hola de s"), None);
        assert_eq!(parse("muchos segundos"), None);
    }

    #[test]
    fn test_abbreviations_only_after_number() {
        assert_eq!(parse("ns μs ms s m h d sem mes año"), None);
        assert_eq!(parse("5 ns ns"), Some((nanos(5), 2)));
        assert_eq!(parse("ms 5 ns ns"), None);
        assert_eq!(parse("tres de h"), None);
    }

    #[test]
    fn test_bare_units() {
        assert_eq!(
            parse("hora minuto milenio"),
            Some((Duration::from_years(1000).plus(nanos(HOUR + MINUTE)), 3))
        );
        assert_eq!(parse("segundos segundo s"), Some((nanos(2 * NANOS_PER_SECOND), 2)));
    }

    #[test]
    fn test_chained_groups() {
        assert_eq!(
            parse("veinte minutos y treinta y seis y segundos porque"),
            Some((nanos(20 * MINUTE + 36 * NANOS_PER_SECOND), 8))
        );
        assert_eq!(
            parse("siete días, 21 horas y doce minutos para llegar"),
            Some((Duration::from_days(7).plus(nanos(21 * HOUR + 12 * MINUTE)), 8))
        );
        assert_eq!(
            parse("tres meses y dos días"),
            Some((Duration::from_months(3).plus(Duration::from_days(2)), 5))
        );
    }
}
