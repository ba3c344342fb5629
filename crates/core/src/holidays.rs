//! Public holiday lookup
//!
//! The engine never knows where holidays come from. Callers hand in anything
//! that can answer [`HolidayCalendar::is_public_holiday`]; the lookup is only
//! consulted for constraints with `exclude_holidays` set.

use chrono::NaiveDate;

/// Answers whether a calendar date is a public holiday.
pub trait HolidayCalendar: Send + Sync {
    fn is_public_holiday(&self, date: NaiveDate) -> bool;
}

/// Calendar without any holidays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_public_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

impl<F> HolidayCalendar for F
where
    F: Fn(NaiveDate) -> bool + Send + Sync,
{
    fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self(date)
    }
}
