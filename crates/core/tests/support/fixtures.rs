//! Date, slot and participant builders

use chrono::NaiveDate;
use meetgrid_domain::{Participant, Slot, SlotSet};

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

pub fn day(month: u32, day_of_month: u32) -> Slot {
    Slot::day(date(month, day_of_month))
}

pub fn hour(month: u32, day_of_month: u32, hour: u8) -> Slot {
    Slot::hour(date(month, day_of_month), hour).unwrap()
}

pub fn days(month: u32, days: &[u32]) -> SlotSet {
    days.iter().map(|d| day(month, *d)).collect()
}

pub fn participant(id: &str, availability: SlotSet) -> Participant {
    let mut name = id.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    Participant::new(id, name, availability)
}
