//! Candidate enumeration

use meetgrid_domain::{Granularity, MeetgridError, Result, ScheduleConstraint, Slot, SlotSet};

use crate::conflict::RangeMembership;
use crate::holidays::HolidayCalendar;

/// Every slot the constraint admits: the cells a host can propose.
///
/// Spans longer than `max_days` are rejected so a mistyped year cannot
/// produce an enormous grid.
pub fn enumerate_candidates(
    constraint: &ScheduleConstraint,
    holidays: &dyn HolidayCalendar,
    max_days: u32,
) -> Result<SlotSet> {
    constraint.validate()?;
    let span = constraint.span_days();
    if span > i64::from(max_days) {
        return Err(MeetgridError::InvalidInput(format!(
            "date range spans {span} days, limit is {max_days}"
        )));
    }

    let membership = RangeMembership::new(constraint, holidays);
    let hours = constraint.hours_in_range();
    let mut slots = SlotSet::new();
    for date in constraint.start_date.iter_days().take_while(|date| *date <= constraint.end_date) {
        if !membership.admits_date(date) {
            continue;
        }
        match constraint.granularity {
            Granularity::Day => {
                slots.insert(Slot::day(date));
            }
            Granularity::Hour => {
                slots.extend(hours.iter().map(|&hour| Slot::Hour { date, hour }));
            }
        }
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use meetgrid_domain::DayOfWeek;

    use super::*;
    use crate::conflict::is_within;
    use crate::holidays::NoHolidays;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn weekday_month_has_twenty_three_days() {
        let constraint =
            ScheduleConstraint::days(date(1, 1), date(1, 31)).with_weekdays(DayOfWeek::weekdays());
        let slots = enumerate_candidates(&constraint, &NoHolidays, 62).unwrap();
        assert_eq!(slots.len(), 23);
    }

    #[test]
    fn hour_grid_honours_wrapping_range_and_holidays() {
        let constraint = ScheduleConstraint::hours(date(1, 6), date(1, 8), 22, 1)
            .with_holidays_excluded(true);
        let holidays = |d: NaiveDate| d == date(1, 7);
        let slots = enumerate_candidates(&constraint, &holidays, 62).unwrap();

        // two non-holiday days, four hours each
        assert_eq!(slots.len(), 8);
        assert!(slots.iter().all(|slot| is_within(slot, &constraint, &holidays)));
    }

    #[test]
    fn oversized_span_is_rejected() {
        let constraint = ScheduleConstraint::days(date(1, 1), date(12, 31));
        assert!(matches!(
            enumerate_candidates(&constraint, &NoHolidays, 62),
            Err(MeetgridError::InvalidInput(_))
        ));
    }

    #[test]
    fn invalid_constraint_is_rejected() {
        let constraint = ScheduleConstraint::days(date(2, 1), date(1, 1));
        assert!(enumerate_candidates(&constraint, &NoHolidays, 62).is_err());
    }
}
