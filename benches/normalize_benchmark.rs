use criterion::{criterion_group, criterion_main, Criterion};
use pumpsync::services::{parse_bolus_entry, BolusEntry};
use pumpsync::TimeNormalizer;
use serde_json::Value;
use std::fs;
use std::hint::black_box;

fn benchmark_time_normalizer(c: &mut Criterion) {
    let normalizer = TimeNormalizer::default();

    let mut group = c.benchmark_group("time_normalizer");
    group.bench_function("epoch", |b| {
        b.iter(|| normalizer.parse_epoch(black_box(1615878000)))
    });
    group.bench_function("dotnet_date", |b| {
        b.iter(|| normalizer.parse_dotnet_date(black_box("/Date(1638663490000-0000)/")))
    });
    group.bench_function("local_iso", |b| {
        b.iter(|| normalizer.parse_local_iso(black_box("2021-10-12T00:01:12")))
    });
    group.finish();
}

fn benchmark_bolus(c: &mut Criterion) {
    let normalizer = TimeNormalizer::default();

    let fixture_content =
        fs::read_to_string("tests/fixtures/bolus_entries.json").expect("Failed to read fixture");
    let fixtures: Value = serde_json::from_str(&fixture_content).expect("Failed to parse fixture");

    let standard: BolusEntry =
        serde_json::from_value(fixtures["std_correction"].clone()).expect("Invalid bolus");
    let extended: BolusEntry =
        serde_json::from_value(fixtures["extended_complete"].clone()).expect("Invalid bolus");

    let mut group = c.benchmark_group("bolus");
    group.bench_function("standard", |b| {
        b.iter(|| parse_bolus_entry(&normalizer, black_box(&standard)))
    });
    group.bench_function("extended", |b| {
        b.iter(|| parse_bolus_entry(&normalizer, black_box(&extended)))
    });
    group.bench_function("decode_and_parse", |b| {
        b.iter(|| {
            let entry: BolusEntry =
                serde_json::from_value(black_box(fixtures["std_correction"].clone())).unwrap();
            parse_bolus_entry(&normalizer, &entry)
        })
    });
    group.finish();
}

criterion_group!(benches, benchmark_time_normalizer, benchmark_bolus);
criterion_main!(benches);
