use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meetgrid_core::{aggregate, enumerate_candidates, NoHolidays, RangeConflictDetector};
use meetgrid_domain::{Participant, ScheduleConstraint, SlotSet};

fn month_of_hours() -> ScheduleConstraint {
    let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
    ScheduleConstraint::hours(start, end, 8, 21)
}

/// Forty participants, each picking a deterministic spread of the grid.
fn sample_participants(candidates: &SlotSet) -> Vec<Participant> {
    (0..40)
        .map(|idx| {
            let availability: SlotSet = candidates
                .iter()
                .enumerate()
                .filter(|(pos, _)| (pos + idx) % 3 != 0)
                .map(|(_, slot)| *slot)
                .collect();
            Participant::new(format!("p{idx}"), format!("Participant {idx}"), availability)
        })
        .collect()
}

fn aggregation_benchmark(c: &mut Criterion) {
    let constraint = month_of_hours();
    let candidates = enumerate_candidates(&constraint, &NoHolidays, 62).unwrap();
    let participants = sample_participants(&candidates);
    let selected: Vec<String> = (0..10).map(|idx| format!("p{idx}")).collect();

    let mut group = c.benchmark_group("aggregation");
    group.sample_size(20).measurement_time(std::time::Duration::from_secs(10));

    group.bench_function("aggregate_month_of_hours", |b| {
        b.iter(|| {
            black_box(aggregate(
                black_box(&candidates),
                black_box(&participants),
                black_box(&selected),
                5,
            ))
        });
    });

    group.bench_function("detect_narrowed_month", |b| {
        let mut narrowed = constraint.clone();
        narrowed.end_date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        narrowed.start_hour = Some(9);
        let detector = RangeConflictDetector::new(&NoHolidays);

        b.iter(|| {
            black_box(detector.detect(Some(&constraint), black_box(&narrowed), &participants))
        });
    });

    group.finish();
}

criterion_group!(core_benchmarks, aggregation_benchmark);
criterion_main!(core_benchmarks);
