//! Evaluation throughput benchmarks
//!
//! Measures the per-tick cost of evaluating a schedule, both from parsed times and from the
//! raw stored strings.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vakit::schedule::{evaluate, evaluate_raw, PrayerTime, RawSchedule};

fn sample() -> RawSchedule {
    RawSchedule::new("05:45", "07:00", "12:30", "15:45", "18:10", "19:30")
}

fn bench_evaluate(c: &mut Criterion) {
    let raw = sample();
    let schedule = raw.parse().expect("valid schedule");

    c.bench_function("evaluate_full_day", |b| {
        b.iter(|| {
            for minute in 0..1440u16 {
                black_box(evaluate(&schedule, PrayerTime::from_minute_of_day(minute)));
            }
        })
    });

    c.bench_function("evaluate_raw_single", |b| {
        let now = PrayerTime::from_minute_of_day(13 * 60);
        b.iter(|| black_box(evaluate_raw(black_box(&raw), now)))
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_time", |b| {
        b.iter(|| black_box(PrayerTime::parse(black_box("18:10"))))
    });
}

criterion_group!(benches, bench_evaluate, bench_parse);
criterion_main!(benches);
