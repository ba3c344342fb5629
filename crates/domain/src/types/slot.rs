//! Slot identity
//!
//! A slot is one candidate unit of time: a whole calendar day, or one hour
//! within a day. The variant carries the granularity, so a day slot and an hour
//! slot are never equal even when they overlap in wall-clock time.
//!
//! Slots are calendar-local. Parsing keeps the wall-clock fields exactly as
//! written and ignores any zone designator; no conversion takes place.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::constants::{DAY_KEY_FORMAT, MAX_HOUR, WIRE_SLOT_FORMAT};
use crate::errors::{MeetgridError, Result};
use crate::impl_domain_code_conversions;
use crate::types::constraint::DayOfWeek;

/// Slot granularity of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Hour,
}

impl_domain_code_conversions!(Granularity {
    Day => "day",
    Hour => "hour",
});

/// One candidate unit of time.
///
/// Ordering is chronological within a granularity (date, then hour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "granularity", rename_all = "lowercase", try_from = "UncheckedSlot")]
pub enum Slot {
    Day { date: NaiveDate },
    Hour { date: NaiveDate, hour: u8 },
}

/// Deserialization mirror of [`Slot`]; converted through [`Slot::hour`].
#[derive(Deserialize)]
#[serde(tag = "granularity", rename_all = "lowercase")]
enum UncheckedSlot {
    Day { date: NaiveDate },
    Hour { date: NaiveDate, hour: u8 },
}

impl TryFrom<UncheckedSlot> for Slot {
    type Error = MeetgridError;

    fn try_from(value: UncheckedSlot) -> Result<Self> {
        match value {
            UncheckedSlot::Day { date } => Ok(Self::day(date)),
            UncheckedSlot::Hour { date, hour } => Self::hour(date, hour),
        }
    }
}

impl Slot {
    /// Whole-day slot.
    pub const fn day(date: NaiveDate) -> Self {
        Self::Day { date }
    }

    /// Hour slot; `hour` must be 0-23.
    pub fn hour(date: NaiveDate, hour: u8) -> Result<Self> {
        if hour > MAX_HOUR {
            return Err(MeetgridError::InvalidInput(format!("hour {hour} is outside 0-23")));
        }
        Ok(Self::Hour { date, hour })
    }

    pub const fn granularity(&self) -> Granularity {
        match self {
            Self::Day { .. } => Granularity::Day,
            Self::Hour { .. } => Granularity::Hour,
        }
    }

    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Day { date } | Self::Hour { date, .. } => *date,
        }
    }

    /// Hour of day for hour slots, `None` for day slots.
    pub const fn hour_of_day(&self) -> Option<u8> {
        match self {
            Self::Day { .. } => None,
            Self::Hour { hour, .. } => Some(*hour),
        }
    }

    pub fn weekday(&self) -> DayOfWeek {
        DayOfWeek::from(self.date().weekday())
    }

    /// Canonical equality key (`YYYY-MM-DD` or `YYYY-MM-DDTHH`).
    pub fn key(&self) -> String {
        match self {
            Self::Day { date } => day_key(*date),
            Self::Hour { date, hour } => hour_key(*date, *hour),
        }
    }

    /// ISO-8601 wire form. Day slots carry a zeroed time-of-day.
    pub fn to_wire(&self) -> String {
        let hour = u32::from(self.hour_of_day().unwrap_or(0));
        let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
        self.date().and_time(time).format(WIRE_SLOT_FORMAT).to_string()
    }

    /// Parse a wire timestamp into a slot of the given granularity.
    ///
    /// Seconds, fractional seconds, minutes and zone notation do not
    /// contribute to identity. A day schedule truncates any timestamp to its
    /// calendar day; an hour schedule rejects bare dates as
    /// [`MeetgridError::InvalidGranularity`].
    pub fn parse(raw: &str, granularity: Granularity) -> Result<Self> {
        let (wall_clock, has_time) = parse_wall_clock(raw)
            .ok_or_else(|| MeetgridError::MalformedSlot(format!("unrecognised timestamp '{raw}'")))?;
        let date = wall_clock.date();

        match granularity {
            // the time of day is a convention for day slots, not identity
            Granularity::Day => Ok(Self::day(date)),
            Granularity::Hour => {
                if !has_time {
                    return Err(MeetgridError::InvalidGranularity(format!(
                        "'{raw}' has no time of day but the schedule is hour-based"
                    )));
                }
                // chrono guarantees 0-23
                #[allow(clippy::cast_possible_truncation)]
                let hour = wall_clock.hour() as u8;
                Ok(Self::Hour { date, hour })
            }
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Date truncated to the calendar day, formatted canonically.
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Day key followed by the two-digit hour.
pub fn hour_key(date: NaiveDate, hour: u8) -> String {
    format!("{}T{hour:02}", day_key(date))
}

/// True iff both slots produce the same key.
pub fn same_slot(a: &Slot, b: &Slot) -> bool {
    a.key() == b.key()
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Returns the wall-clock value and whether the input had a time component.
pub(crate) fn parse_wall_clock(raw: &str) -> Option<(NaiveDateTime, bool)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Some((with_offset.naive_local(), true));
    }
    if let Ok(with_offset) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M%:z") {
        return Some((with_offset.naive_local(), true));
    }

    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some((naive, true));
    }

    NaiveDate::parse_from_str(trimmed, DAY_KEY_FORMAT)
        .ok()
        .map(|date| (date.and_time(NaiveTime::MIN), false))
}
