use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::json;

use numera::{
    DateTimeResult, Duration, ExtractOptions, Extractor, LocaleConfig, NumberMode, Numeral,
    Segment,
};

fn spanish() -> Extractor {
    Extractor::for_locale("es").unwrap()
}

/// Tuesday 2023-08-15 14:30.
fn anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 8, 15)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap()
}

fn number(text: &str) -> Option<Numeral> {
    spanish().extract_numeral(text, &ExtractOptions::default())
}

// ── Numbers ─────────────────────────────────────────────────────────────────

#[test]
fn test_numbers_end_to_end() {
    assert_eq!(number("cero"), Some(Numeral::integer(0)));
    assert_eq!(
        number("mil doscientos treinta y cuatro"),
        Some(Numeral::integer(1234))
    );
    assert_eq!(
        number("dos millones quinientos mil"),
        Some(Numeral::integer(2_500_000))
    );
    assert_eq!(number("tres punto uno cuatro"), Some(Numeral::decimal(3.14)));
    assert_eq!(number("un medio"), Some(Numeral::decimal(0.5)));
    assert_eq!(number("menos veinte"), Some(Numeral::integer(-20)));
    assert_eq!(
        number("primero"),
        Some(Numeral::integer(1).with_ordinal(true))
    );
}

#[test]
fn test_ordinal_only_phrase_without_ordinals_is_absent() {
    let options = ExtractOptions {
        mode: NumberMode::NoOrdinal,
    };
    let e = spanish();
    assert_eq!(e.extract_numeral("el vigésimo primero", &options), None);
    assert_eq!(e.extract_numeral("quedó 21º", &options), None);
}

#[test]
fn test_numbers_in_a_sentence() {
    let segments = spanish().extract_numerals(
        "en 2023 vendimos un millón doscientas mil unidades, el 35% más",
        &ExtractOptions::default(),
    );
    let values: Vec<Numeral> = segments.iter().filter_map(Segment::entity).copied().collect();
    assert_eq!(
        values,
        vec![
            Numeral::integer(2023),
            Numeral::integer(1_200_000),
            Numeral::decimal(0.35),
        ]
    );
}

#[test]
fn test_detached_suffix_words_keep_cardinals() {
    let e = spanish();
    let no_ordinal = ExtractOptions {
        mode: NumberMode::NoOrdinal,
    };
    assert_eq!(
        e.extract_numeral("el bus 3 va lleno", &no_ordinal),
        Some(Numeral::integer(3))
    );
    assert_eq!(
        e.extract_numeral("el bus 3 va lleno", &ExtractOptions::default()),
        Some(Numeral::integer(3))
    );
    assert_eq!(
        e.extract_numeral("llegó 3er", &ExtractOptions::default()),
        Some(Numeral::integer(3).with_ordinal(true))
    );
}

// ── Durations ───────────────────────────────────────────────────────────────

#[test]
fn test_durations_end_to_end() {
    let e = spanish();
    let duration = e
        .extract_duration("el vuelo dura once horas y cuarenta y cinco minutos")
        .unwrap();
    assert_eq!(duration.to_string(), "11 hours, 45 minutes");

    assert_eq!(
        e.extract_duration("vuelvo en un par de semanas"),
        Some(Duration::from_days(14))
    );
    assert_eq!(
        e.extract_duration("medio siglo"),
        Some(Duration::from_years(50))
    );
}

// ── Dates and times ─────────────────────────────────────────────────────────

#[test]
fn test_tomorrow_at_three_in_the_afternoon() {
    let found = spanish()
        .extract_date_time("mañana a las tres de la tarde", anchor())
        .unwrap();
    assert_eq!(found.date(), NaiveDate::from_ymd_opt(2023, 8, 16));
    assert_eq!(found.time(), NaiveTime::from_hms_opt(15, 0, 0));
}

#[test]
fn test_result_composition() {
    let e = spanish();

    let date_only = e.extract_date_time("el 3 de julio", anchor()).unwrap();
    assert_eq!(
        date_only.resolve(anchor()),
        NaiveDate::from_ymd_opt(2023, 7, 3)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    );

    let time_only = e.extract_date_time("a mediodía", anchor()).unwrap();
    assert_eq!(
        time_only.resolve(anchor()),
        NaiveDate::from_ymd_opt(2023, 8, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    );
}

#[test]
fn test_relative_expressions() {
    let e = spanish();
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

    assert_eq!(
        e.extract_date_time("lo hice anteayer", anchor()),
        Some(DateTimeResult::Date(date(2023, 8, 13)))
    );
    assert_eq!(
        e.extract_date_time("nos vemos el próximo jueves", anchor()),
        Some(DateTimeResult::Date(date(2023, 8, 17)))
    );
    assert_eq!(
        e.extract_date_time("hace dos semanas", anchor()),
        Some(DateTimeResult::Date(date(2023, 8, 1)))
    );
    assert_eq!(
        e.extract_date_time("dentro de media hora", anchor()),
        Some(DateTimeResult::Time(NaiveTime::from_hms_opt(15, 0, 0).unwrap()))
    );
}

#[test]
fn test_years_and_days_next_to_suffix_words() {
    let e = spanish();
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

    assert_eq!(
        e.extract_date_time("en 1990 era joven", anchor()),
        Some(DateTimeResult::Date(date(1990, 8, 1)))
    );
    assert_eq!(
        e.extract_date_time("el 5 da igual", anchor()),
        Some(DateTimeResult::Date(date(2023, 8, 5)))
    );
}

#[test]
fn test_trailing_yesterday_adder_and_long_ampm() {
    let e = spanish();
    assert_eq!(
        e.extract_date_time("lo vi ayer antes", anchor()),
        Some(DateTimeResult::Date(NaiveDate::from_ymd_opt(2023, 8, 13).unwrap()))
    );
    assert_eq!(
        e.extract_date_time("a las tres post meridiano", anchor()),
        Some(DateTimeResult::Time(NaiveTime::from_hms_opt(15, 0, 0).unwrap()))
    );
}

#[test]
fn test_date_time_result_json() {
    let date = NaiveDate::from_ymd_opt(2023, 8, 16).unwrap();
    assert_eq!(
        serde_json::to_value(DateTimeResult::Date(date)).unwrap(),
        json!({ "kind": "date", "value": "2023-08-16" })
    );
    assert_eq!(
        serde_json::to_value(DateTimeResult::DateTime(date.and_hms_opt(15, 0, 0).unwrap()))
            .unwrap(),
        json!({ "kind": "date_time", "value": "2023-08-16T15:00:00" })
    );
}

// ── Locale tables ───────────────────────────────────────────────────────────

#[test]
fn test_custom_table_for_existing_grammar() {
    let mut config = LocaleConfig::spanish().unwrap();
    config
        .categories
        .get_mut("ignore")
        .unwrap()
        .push("eh".to_string());
    let json = serde_json::to_string(&config).unwrap();
    let custom = Extractor::new(&LocaleConfig::from_json("es-custom", &json).unwrap()).unwrap();

    let options = ExtractOptions::default();
    assert_eq!(
        spanish().extract_numeral("mil eh doscientos", &options),
        Some(Numeral::integer(1000))
    );
    assert_eq!(
        custom.extract_numeral("mil eh doscientos", &options),
        Some(Numeral::integer(1200))
    );
}
