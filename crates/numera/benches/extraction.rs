use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};

use numera::{ExtractOptions, Extractor};

const SENTENCE: &str = "el pedido de dos mil trescientas cuarenta y cinco unidades llega \
                        pasado mañana a las tres y cuarto de la tarde, tras un viaje de \
                        once horas y media";

fn bench_tokenize(c: &mut Criterion) {
    let extractor = Extractor::for_locale("es").unwrap();
    c.bench_function("tokenize", |b| {
        b.iter(|| extractor.tokenize(black_box(SENTENCE)))
    });
}

fn bench_numerals(c: &mut Criterion) {
    let extractor = Extractor::for_locale("es").unwrap();
    let options = ExtractOptions::default();
    c.bench_function("extract_numerals", |b| {
        b.iter(|| extractor.extract_numerals(black_box(SENTENCE), &options))
    });
}

fn bench_durations(c: &mut Criterion) {
    let extractor = Extractor::for_locale("es").unwrap();
    c.bench_function("extract_durations", |b| {
        b.iter(|| extractor.extract_durations(black_box(SENTENCE)))
    });
}

fn bench_date_times(c: &mut Criterion) {
    let extractor = Extractor::for_locale("es").unwrap();
    let now = NaiveDate::from_ymd_opt(2023, 8, 15)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    c.bench_function("extract_date_times", |b| {
        b.iter(|| extractor.extract_date_times(black_box(SENTENCE), now))
    });
}

fn bench_load_locale(c: &mut Criterion) {
    c.bench_function("load_spanish", |b| {
        b.iter(|| Extractor::for_locale(black_box("es")).unwrap())
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_numerals,
    bench_durations,
    bench_date_times,
    bench_load_locale
);
criterion_main!(benches);
