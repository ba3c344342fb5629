//! Schedule constraints
//!
//! A constraint decides which slots are selectable at all, independent of
//! anyone's availability: date range, optional hour range, weekday mask,
//! explicitly excluded dates, and whether public holidays are excluded.
//!
//! Holiday lookup is an external collaborator, so this type only answers the
//! structural part of membership ([`ScheduleConstraint::admits_date`] and
//! [`ScheduleConstraint::admits_hour`]); the full predicate lives in
//! `meetgrid-core`.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::{DAY_KEY_FORMAT, MAX_HOUR};
use crate::errors::{MeetgridError, Result};
use crate::impl_domain_code_conversions;
use crate::types::slot::{parse_wall_clock, Granularity};

/// Day of week, indexed 0 (Sunday) through 6 (Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl_domain_code_conversions!(DayOfWeek {
    Sun => "sun",
    Mon => "mon",
    Tue => "tue",
    Wed => "wed",
    Thu => "thu",
    Fri => "fri",
    Sat => "sat",
});

impl DayOfWeek {
    pub const ALL: [Self; 7] =
        [Self::Sun, Self::Mon, Self::Tue, Self::Wed, Self::Thu, Self::Fri, Self::Sat];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub fn all() -> BTreeSet<Self> {
        Self::ALL.into_iter().collect()
    }

    pub fn weekdays() -> BTreeSet<Self> {
        [Self::Mon, Self::Tue, Self::Wed, Self::Thu, Self::Fri].into_iter().collect()
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Sun => Self::Sun,
            Weekday::Mon => Self::Mon,
            Weekday::Tue => Self::Tue,
            Weekday::Wed => Self::Wed,
            Weekday::Thu => Self::Thu,
            Weekday::Fri => Self::Fri,
            Weekday::Sat => Self::Sat,
        }
    }
}

/// Host-owned rules for which slots are selectable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConstraint {
    pub granularity: Granularity,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// First selectable hour (inclusive); hour schedules only
    pub start_hour: Option<u8>,
    /// Last selectable hour (inclusive); may be smaller than `start_hour`
    /// for ranges that wrap past midnight
    pub end_hour: Option<u8>,
    pub enabled_weekdays: BTreeSet<DayOfWeek>,
    pub excluded_dates: BTreeSet<NaiveDate>,
    pub exclude_holidays: bool,
}

impl ScheduleConstraint {
    /// Day-granularity constraint over `[start_date, end_date]` with every
    /// weekday enabled.
    pub fn days(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            granularity: Granularity::Day,
            start_date,
            end_date,
            start_hour: None,
            end_hour: None,
            enabled_weekdays: DayOfWeek::all(),
            excluded_dates: BTreeSet::new(),
            exclude_holidays: false,
        }
    }

    /// Hour-granularity constraint with every weekday enabled.
    pub fn hours(start_date: NaiveDate, end_date: NaiveDate, start_hour: u8, end_hour: u8) -> Self {
        Self {
            granularity: Granularity::Hour,
            start_hour: Some(start_hour),
            end_hour: Some(end_hour),
            ..Self::days(start_date, end_date)
        }
    }

    #[must_use]
    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = DayOfWeek>) -> Self {
        self.enabled_weekdays = weekdays.into_iter().collect();
        self
    }

    #[must_use]
    pub fn excluding(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.excluded_dates.extend(dates);
        self
    }

    #[must_use]
    pub const fn with_holidays_excluded(mut self, exclude: bool) -> Self {
        self.exclude_holidays = exclude;
        self
    }

    /// Check the constraint is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(MeetgridError::InvalidInput(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        for hour in [self.start_hour, self.end_hour].into_iter().flatten() {
            if hour > MAX_HOUR {
                return Err(MeetgridError::InvalidInput(format!("hour {hour} is outside 0-23")));
            }
        }
        Ok(())
    }

    /// Effective inclusive hour bounds, defaulting to the whole day.
    pub fn hour_bounds(&self) -> (u8, u8) {
        (self.start_hour.unwrap_or(0), self.end_hour.unwrap_or(MAX_HOUR))
    }

    /// Hours admitted by the hour range, in display order (wrapping ranges
    /// start at `start_hour` and continue after midnight).
    pub fn hours_in_range(&self) -> Vec<u8> {
        let (start, end) = self.hour_bounds();
        if start <= end {
            (start..=end).collect()
        } else {
            (start..=MAX_HOUR).chain(0..=end).collect()
        }
    }

    pub fn admits_hour(&self, hour: u8) -> bool {
        let (start, end) = self.hour_bounds();
        if hour > MAX_HOUR {
            false
        } else if start <= end {
            (start..=end).contains(&hour)
        } else {
            hour >= start || hour <= end
        }
    }

    /// Date range, weekday mask and explicit exclusions. Holidays are not
    /// consulted here.
    pub fn admits_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date
            && date <= self.end_date
            && self.enabled_weekdays.contains(&DayOfWeek::from(chrono::Datelike::weekday(&date)))
            && !self.excluded_dates.contains(&date)
    }

    /// Number of calendar days in the date range (0 when inverted).
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().saturating_add(1).max(0)
    }
}

/// Constraint as stored by persistence and edited by forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConstraintRecord {
    pub granularity: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_hour: Option<u8>,
    /// Day codes (`"sun"`..`"sat"`); absent means every day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_weekdays: Option<Vec<String>>,
    #[serde(default)]
    pub excluded_dates: Vec<String>,
    #[serde(default)]
    pub exclude_holidays: bool,
}

impl TryFrom<&ScheduleConstraintRecord> for ScheduleConstraint {
    type Error = MeetgridError;

    fn try_from(record: &ScheduleConstraintRecord) -> Result<Self> {
        let granularity: Granularity = record.granularity.parse()?;
        let enabled_weekdays: BTreeSet<DayOfWeek> = match &record.enabled_weekdays {
            Some(codes) => {
                codes.iter().map(|code| code.parse::<DayOfWeek>()).collect::<Result<_>>()?
            }
            None => DayOfWeek::all(),
        };
        let excluded_dates: BTreeSet<NaiveDate> = record
            .excluded_dates
            .iter()
            .map(|raw| parse_record_date("excludedDates", raw))
            .collect::<Result<_>>()?;

        let (start_hour, end_hour) = match granularity {
            Granularity::Day => (None, None),
            Granularity::Hour => (record.start_hour, record.end_hour),
        };

        let constraint = Self {
            granularity,
            start_date: parse_record_date("startDate", &record.start_date)?,
            end_date: parse_record_date("endDate", &record.end_date)?,
            start_hour,
            end_hour,
            enabled_weekdays,
            excluded_dates,
            exclude_holidays: record.exclude_holidays,
        };
        constraint.validate()?;
        Ok(constraint)
    }
}

impl TryFrom<ScheduleConstraintRecord> for ScheduleConstraint {
    type Error = MeetgridError;

    fn try_from(record: ScheduleConstraintRecord) -> Result<Self> {
        Self::try_from(&record)
    }
}

impl From<&ScheduleConstraint> for ScheduleConstraintRecord {
    fn from(constraint: &ScheduleConstraint) -> Self {
        Self {
            granularity: constraint.granularity.to_string(),
            start_date: constraint.start_date.format(DAY_KEY_FORMAT).to_string(),
            end_date: constraint.end_date.format(DAY_KEY_FORMAT).to_string(),
            start_hour: constraint.start_hour,
            end_hour: constraint.end_hour,
            enabled_weekdays: Some(
                constraint.enabled_weekdays.iter().map(ToString::to_string).collect(),
            ),
            excluded_dates: constraint
                .excluded_dates
                .iter()
                .map(|date| date.format(DAY_KEY_FORMAT).to_string())
                .collect(),
            exclude_holidays: constraint.exclude_holidays,
        }
    }
}

/// Accepts plain dates or full timestamps (the calendar day is kept).
fn parse_record_date(field: &str, raw: &str) -> Result<NaiveDate> {
    parse_wall_clock(raw)
        .map(|(wall_clock, _)| wall_clock.date())
        .ok_or_else(|| MeetgridError::InvalidInput(format!("{field}: invalid date '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> ScheduleConstraint {
        ScheduleConstraint::days(date(2025, 1, 1), date(2025, 1, 31))
    }

    #[test]
    fn day_codes_map_to_indices() {
        assert_eq!(DayOfWeek::Sun.index(), 0);
        assert_eq!(DayOfWeek::Sat.index(), 6);
        assert_eq!(DayOfWeek::from_index(3), Some(DayOfWeek::Wed));
        assert_eq!(DayOfWeek::from_index(7), None);
        assert_eq!("FRI".parse::<DayOfWeek>().unwrap(), DayOfWeek::Fri);
    }

    #[test]
    fn admits_date_checks_range_mask_and_exclusions() {
        let constraint = january()
            .with_weekdays(DayOfWeek::weekdays())
            .excluding([date(2025, 1, 6)]);

        assert!(constraint.admits_date(date(2025, 1, 7))); // Tuesday
        assert!(!constraint.admits_date(date(2025, 1, 5))); // Sunday
        assert!(!constraint.admits_date(date(2025, 1, 6))); // excluded Monday
        assert!(!constraint.admits_date(date(2025, 2, 3))); // out of range
        assert!(constraint.admits_date(date(2025, 1, 31))); // inclusive end
    }

    #[test]
    fn hour_range_is_inclusive() {
        let constraint = ScheduleConstraint::hours(date(2025, 1, 6), date(2025, 1, 12), 9, 18);
        assert!(constraint.admits_hour(9));
        assert!(constraint.admits_hour(18));
        assert!(!constraint.admits_hour(19));
        assert_eq!(constraint.hours_in_range().len(), 10);
    }

    #[test]
    fn hour_range_wraps_past_midnight() {
        let constraint = ScheduleConstraint::hours(date(2025, 1, 6), date(2025, 1, 12), 22, 2);
        for hour in [22, 23, 0, 1, 2] {
            assert!(constraint.admits_hour(hour), "hour {hour}");
        }
        assert!(!constraint.admits_hour(3));
        assert!(!constraint.admits_hour(21));
        assert!(!constraint.admits_hour(99));
        assert_eq!(constraint.hours_in_range(), vec![22, 23, 0, 1, 2]);
    }

    #[test]
    fn missing_hours_default_to_whole_day() {
        let mut constraint = ScheduleConstraint::hours(date(2025, 1, 6), date(2025, 1, 6), 0, 0);
        constraint.start_hour = None;
        constraint.end_hour = None;
        assert_eq!(constraint.hour_bounds(), (0, 23));
    }

    #[test]
    fn validate_rejects_inverted_dates_and_bad_hours() {
        let inverted = ScheduleConstraint::days(date(2025, 2, 1), date(2025, 1, 1));
        assert!(matches!(inverted.validate(), Err(MeetgridError::InvalidInput(_))));
        assert_eq!(inverted.span_days(), 0);

        let bad_hour = ScheduleConstraint::hours(date(2025, 1, 1), date(2025, 1, 2), 9, 24);
        assert!(bad_hour.validate().is_err());
    }

    #[test]
    fn record_conversion_parses_codes_and_dates() {
        let record: ScheduleConstraintRecord = serde_json::from_value(serde_json::json!({
            "granularity": "hour",
            "startDate": "2025-01-06",
            "endDate": "2025-01-12T00:00:00.000Z",
            "startHour": 9,
            "endHour": 17,
            "enabledWeekdays": ["mon", "WED", "fri"],
            "excludedDates": ["2025-01-08"],
            "excludeHolidays": true
        }))
        .unwrap();

        let constraint = ScheduleConstraint::try_from(&record).unwrap();
        assert_eq!(constraint.granularity, Granularity::Hour);
        assert_eq!(constraint.end_date, date(2025, 1, 12));
        assert_eq!(constraint.hour_bounds(), (9, 17));
        assert_eq!(
            constraint.enabled_weekdays,
            [DayOfWeek::Mon, DayOfWeek::Wed, DayOfWeek::Fri].into_iter().collect()
        );
        assert!(constraint.excluded_dates.contains(&date(2025, 1, 8)));
        assert!(constraint.exclude_holidays);

        let back = ScheduleConstraintRecord::from(&constraint);
        assert_eq!(back.enabled_weekdays, Some(vec!["mon".into(), "wed".into(), "fri".into()]));
        assert_eq!(back.end_date, "2025-01-12");
    }

    #[test]
    fn record_without_weekdays_enables_all() {
        let record: ScheduleConstraintRecord = serde_json::from_value(serde_json::json!({
            "granularity": "day",
            "startDate": "2025-01-01",
            "endDate": "2025-01-31",
            "startHour": 9
        }))
        .unwrap();
        let constraint = ScheduleConstraint::try_from(record).unwrap();
        assert_eq!(constraint.enabled_weekdays.len(), 7);
        assert_eq!(constraint.start_hour, None, "day schedules drop hour bounds");
    }

    #[test]
    fn record_conversion_rejects_unknown_codes() {
        let mut record = ScheduleConstraintRecord::from(&january());
        record.enabled_weekdays = Some(vec!["funday".into()]);
        assert!(ScheduleConstraint::try_from(&record).is_err());

        let mut record = ScheduleConstraintRecord::from(&january());
        record.granularity = "minute".into();
        assert!(ScheduleConstraint::try_from(&record).is_err());

        let mut record = ScheduleConstraintRecord::from(&january());
        record.start_date = "soon".into();
        assert!(ScheduleConstraint::try_from(&record).is_err());
    }
}
