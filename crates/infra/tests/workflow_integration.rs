//! Core workflows running on the infrastructure adapters

use std::sync::Arc;

use chrono::NaiveDate;
use meetgrid_core::{AvailabilityService, HolidayCalendar, ScheduleUpdateService, UpdateOutcome};
use meetgrid_domain::{
    HolidayConfig, ParticipantRecord, ScheduleConstraint, ScheduleConstraintRecord, Slot,
};
use meetgrid_infra::{load_holiday_calendar, InMemoryScheduleRepository};
use tempfile::tempdir;

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

fn record(id: &str, availability: &[&str]) -> ParticipantRecord {
    ParticipantRecord {
        id: id.to_string(),
        name: id.to_uppercase(),
        availability: availability.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn holidays_from_file(contents: &str) -> Arc<dyn HolidayCalendar> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("holidays.toml");
    std::fs::write(&path, contents).unwrap();
    let config = HolidayConfig { path: Some(path.to_string_lossy().into_owned()) };
    load_holiday_calendar(&config).unwrap()
}

#[tokio::test]
async fn holiday_exclusion_purges_after_confirmation() {
    let holidays = holidays_from_file("dates = [\"2025-01-13\"]\nannual = [\"01-01\"]\n");
    let repo = Arc::new(InMemoryScheduleRepository::new());
    let constraint = ScheduleConstraint::days(date(1, 1), date(1, 31));
    let issues = repo
        .import_records(
            "team",
            &ScheduleConstraintRecord::from(&constraint),
            vec![
                record("ana", &["2025-01-13T00:00:00Z", "2025-01-14T00:00:00Z"]),
                record("ben", &["2025-01-01", "2025-01-02"]),
            ],
        )
        .unwrap();
    assert!(issues.is_empty());

    let service = ScheduleUpdateService::new(repo.clone(), holidays.clone());
    let proposed = constraint.with_holidays_excluded(true);

    let outcome = service.update_constraint("team", proposed.clone(), false).await.unwrap();
    let UpdateOutcome::RequiresConfirmation { affected } = outcome else {
        panic!("expected confirmation request, got {outcome:?}");
    };
    assert_eq!(affected.len(), 2);

    let outcome = service.update_constraint("team", proposed, true).await.unwrap();
    assert!(outcome.is_committed());

    let exported = repo.export_participants("team").unwrap();
    assert_eq!(exported[0].availability, vec!["2025-01-14T00:00:00".to_string()]);
    assert_eq!(exported[1].availability, vec!["2025-01-02T00:00:00".to_string()]);
}

#[tokio::test]
async fn hourly_schedule_round_trip() {
    let repo = Arc::new(InMemoryScheduleRepository::new());
    let constraint = ScheduleConstraint::hours(date(1, 6), date(1, 10), 9, 17);
    repo.import_records(
        "standup",
        &ScheduleConstraintRecord::from(&constraint),
        vec![record("ana", &[]), record("ben", &[])],
    )
    .unwrap();
    let holidays = load_holiday_calendar(&HolidayConfig::default()).unwrap();
    let service = AvailabilityService::new(repo.clone(), holidays);

    let report = service
        .submit_raw(
            "standup",
            "ana",
            &["2025-01-06T09:00:00+09:00".to_string(), "2025-01-06T20:00:00".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(report.stored.len(), 1);
    assert_eq!(report.out_of_range.len(), 1);

    service
        .submit(
            "standup",
            "ben",
            [Slot::hour(date(1, 6), 9).unwrap(), Slot::hour(date(1, 7), 9).unwrap()]
                .into_iter()
                .collect(),
        )
        .await
        .unwrap();

    let overview =
        service.overview("standup", &["ana".to_string(), "ben".to_string()]).await.unwrap();
    assert_eq!(overview.per_slot_count.len(), 5 * 9);
    assert_eq!(overview.highlight.len(), 1);
    assert_eq!(overview.best_slots[0].slot, Slot::hour(date(1, 6), 9).unwrap());
    assert_eq!(overview.best_slots[0].count, 2);
}
