//! File-backed public holiday calendar
//!
//! A holiday file lists one-off dates and annual observances:
//!
//! ```toml
//! dates = ["2025-04-18", "2025-05-06"]
//! annual = ["01-01", "12-25"]
//! ```
//!
//! JSON files use the same two keys.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use meetgrid_core::{HolidayCalendar, NoHolidays};
use meetgrid_domain::{HolidayConfig, MeetgridError, Result};
use serde::Deserialize;

use crate::config::loader::{parse_document, read_document};

#[derive(Debug, Default, Deserialize)]
struct HolidayFile {
    #[serde(default)]
    dates: Vec<String>,
    #[serde(default)]
    annual: Vec<String>,
}

/// Holiday calendar with a fixed list of dates and yearly month-day entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticHolidayCalendar {
    dates: BTreeSet<NaiveDate>,
    annual: BTreeSet<(u32, u32)>,
}

impl StaticHolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.dates.extend(dates);
        self
    }

    /// Add a yearly observance. Returns an error for impossible month-day
    /// pairs (Feb 29 is allowed and only matches leap years).
    pub fn with_annual(mut self, month: u32, day: u32) -> Result<Self> {
        // 2024 is a leap year, so every real month-day exists in it
        if NaiveDate::from_ymd_opt(2024, month, day).is_none() {
            return Err(MeetgridError::Config(format!("invalid annual holiday {month:02}-{day:02}")));
        }
        self.annual.insert((month, day));
        Ok(self)
    }

    /// Load from a TOML or JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file: HolidayFile = read_document(path)?;
        let calendar = Self::from_parts(&file)?;
        tracing::info!(
            path = %path.display(),
            dates = calendar.dates.len(),
            annual = calendar.annual.len(),
            "Loaded holiday calendar"
        );
        Ok(calendar)
    }

    /// Parse document content; the format follows `path`'s extension.
    pub fn from_str_with_format(contents: &str, path: &Path) -> Result<Self> {
        let file: HolidayFile = parse_document(contents, path)?;
        Self::from_parts(&file)
    }

    pub fn len(&self) -> usize {
        self.dates.len() + self.annual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.annual.is_empty()
    }

    fn from_parts(file: &HolidayFile) -> Result<Self> {
        let dates = file
            .dates
            .iter()
            .map(|raw| {
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|e| MeetgridError::Config(format!("invalid holiday date '{raw}': {e}")))
            })
            .collect::<Result<BTreeSet<NaiveDate>>>()?;

        file.annual.iter().try_fold(Self::new().with_dates(dates), |calendar, raw| {
            let (month, day) = parse_month_day(raw)?;
            calendar.with_annual(month, day)
        })
    }
}

impl HolidayCalendar for StaticHolidayCalendar {
    fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date) || self.annual.contains(&(date.month(), date.day()))
    }
}

fn parse_month_day(raw: &str) -> Result<(u32, u32)> {
    let invalid = || MeetgridError::Config(format!("invalid annual holiday '{raw}', expected MM-DD"));
    let (month, day) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    let day = day.parse::<u32>().map_err(|_| invalid())?;
    Ok((month, day))
}

/// Build the holiday source described by `config`.
///
/// Without a configured path no date is a holiday.
pub fn load_holiday_calendar(config: &HolidayConfig) -> Result<Arc<dyn HolidayCalendar>> {
    match config.path.as_deref() {
        Some(path) => Ok(Arc::new(StaticHolidayCalendar::from_file(Path::new(path))?)),
        None => {
            tracing::debug!("No holiday file configured");
            Ok(Arc::new(NoHolidays))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fixed_and_annual_entries_match() {
        let calendar = StaticHolidayCalendar::new()
            .with_dates([date(2025, 4, 18)])
            .with_annual(12, 25)
            .unwrap();

        assert!(calendar.is_public_holiday(date(2025, 4, 18)));
        assert!(!calendar.is_public_holiday(date(2026, 4, 18)));
        assert!(calendar.is_public_holiday(date(2025, 12, 25)));
        assert!(calendar.is_public_holiday(date(2031, 12, 25)));
        assert!(!calendar.is_public_holiday(date(2025, 12, 24)));
    }

    #[test]
    fn rejects_impossible_annual_dates() {
        assert!(StaticHolidayCalendar::new().with_annual(2, 30).is_err());
        assert!(StaticHolidayCalendar::new().with_annual(2, 29).is_ok());
    }

    #[test]
    fn parses_toml_and_json_documents() {
        let toml = "dates = [\"2025-01-01\"]\nannual = [\"05-05\"]\n";
        let from_toml =
            StaticHolidayCalendar::from_str_with_format(toml, Path::new("h.toml")).unwrap();
        let json = r#"{"dates": ["2025-01-01"], "annual": ["05-05"]}"#;
        let from_json =
            StaticHolidayCalendar::from_str_with_format(json, Path::new("h.json")).unwrap();

        assert_eq!(from_toml, from_json);
        assert_eq!(from_toml.len(), 2);
        assert!(from_toml.is_public_holiday(date(2030, 5, 5)));
    }

    #[test]
    fn bad_entries_are_config_errors() {
        for contents in [r#"{"dates": ["2025-13-01"]}"#, r#"{"annual": ["christmas"]}"#] {
            let result = StaticHolidayCalendar::from_str_with_format(contents, Path::new("h.json"));
            assert!(matches!(result, Err(MeetgridError::Config(_))), "{contents}");
        }
    }

    #[test]
    fn no_path_means_no_holidays() {
        let calendar = load_holiday_calendar(&HolidayConfig::default()).unwrap();
        assert!(!calendar.is_public_holiday(date(2025, 1, 1)));
    }
}
