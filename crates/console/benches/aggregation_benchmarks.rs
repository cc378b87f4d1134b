use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use gatepass_console::{Pager, Stats, daily_trend};
use gatepass_core::{GatePass, GatePassId, GatePassStatus, PassNumber};

fn fixture(count: usize) -> Vec<GatePass> {
    let base = Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap();
    (0..count)
        .map(|i| GatePass {
            id: GatePassId::parse(format!("id-{i}")).unwrap(),
            number: PassNumber::parse(format!("GP-{i:05}")).unwrap(),
            person_name: format!("Visitor {i}"),
            description: "Laptop".to_string(),
            created_by: "hr.desk".to_string(),
            is_returnable: i % 3 == 0,
            status: GatePassStatus::ALL[i % GatePassStatus::ALL.len()],
            status_history: Vec::new(),
            created_at: base - Duration::hours((i % 720) as i64),
            approved_at: None,
            exit_photo_id: None,
            return_photo_id: None,
            exit_time: None,
            return_time: None,
            qr_code_url: None,
        })
        .collect()
}

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats_from_passes");

    for size in [100usize, 1_000, 10_000].iter() {
        let passes = fixture(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("single_pass", size), &passes, |b, passes| {
            b.iter(|| black_box(Stats::from_passes(passes.iter())));
        });
    }

    group.finish();
}

fn bench_trend(c: &mut Criterion) {
    let mut group = c.benchmark_group("daily_trend");
    let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

    for size in [100usize, 1_000, 10_000].iter() {
        let passes = fixture(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("fourteen_days", size), &passes, |b, passes| {
            b.iter(|| black_box(daily_trend(passes.iter(), today, &Utc)));
        });
    }

    group.finish();
}

fn bench_pager(c: &mut Criterion) {
    let passes = fixture(10_000);

    c.bench_function("pager_load_all", |b| {
        b.iter(|| {
            let mut pager = Pager::new(30, 25);
            while pager.has_more(passes.len()) {
                pager.load_more(passes.len());
            }
            black_box(pager.slice(&passes).len())
        });
    });
}

criterion_group!(benches, bench_stats, bench_trend, bench_pager);
criterion_main!(benches);
