//! Benchmarks for index pattern resolution
//!
//! Run with: cargo bench

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sextant::backend::{FieldStats, IndexFieldStats, IndexStats};
use sextant::interval::{IndexTemplate, IntervalCalculator};
use sextant::resolve::{sort_index_stats, SortOrder};

fn bench_template(c: &mut Criterion) {
    let mut group = c.benchmark_group("template");
    let at = Utc.with_ymd_and_hms(2015, 9, 22, 13, 0, 0).unwrap();

    group.bench_function("parse", |b| {
        b.iter(|| IndexTemplate::parse(black_box("[logstash-]GGGG.WW[-week]")).unwrap())
    });

    let template = IndexTemplate::parse("[logstash-]YYYY.MM.DD.HH").unwrap();
    group.bench_function("render", |b| b.iter(|| template.render(black_box(&at))));

    group.finish();
}

fn bench_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("expansion");
    let calculator = IntervalCalculator::new();
    let stop = Utc.with_ymd_and_hms(2015, 9, 22, 0, 0, 0).unwrap();

    for (interval, pattern, span) in [
        ("hours", "[logstash-]YYYY.MM.DD.HH", Duration::days(30)),
        ("days", "[logstash-]YYYY.MM.DD", Duration::days(365)),
        ("weeks", "[logstash-]GGGG.WW", Duration::weeks(260)),
    ] {
        let start = stop - span;
        let count = calculator
            .to_index_list(pattern, interval, Some(start), Some(stop))
            .unwrap()
            .len();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(interval, |b| {
            b.iter(|| {
                calculator
                    .to_index_list(black_box(pattern), interval, Some(start), Some(stop))
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_index_stats");

    for size in [100, 1000] {
        let stats = (0..size).fold(IndexStats::new(), |stats, i| {
            let min = (i * 7919) % size;
            stats.with_index(
                format!("logstash-{}", i),
                IndexFieldStats::default()
                    .field("@timestamp", FieldStats::new().min(min).max(min + 10)),
            )
        });

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("desc_{}", size), |b| {
            b.iter(|| sort_index_stats(black_box(&stats), "@timestamp", Some(SortOrder::Desc)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_template, bench_expansion, bench_sort);
criterion_main!(benches);
