//! Derived results
//!
//! Nothing in this module is persisted. Aggregation and conflict results are
//! recomputed from participants and constraints whenever the caller asks.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::types::constraint::{DayOfWeek, ScheduleConstraint};
use crate::types::slot::Slot;
use crate::types::slot_set::SlotSet;

/// One candidate slot with its response count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedSlot {
    pub slot: Slot,
    pub count: usize,
    pub ratio: f64,
}

/// Per-slot counts, ratios and the highlight set for one snapshot of
/// responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    #[serde(serialize_with = "serialize_keyed")]
    pub per_slot_count: BTreeMap<Slot, usize>,
    #[serde(serialize_with = "serialize_keyed")]
    pub per_slot_ratio: BTreeMap<Slot, f64>,
    pub highlight: SlotSet,
    pub participant_count: usize,
    pub best_slots: Vec<RankedSlot>,
}

impl AggregationResult {
    /// Count for `slot`; slots outside the candidate set count as zero.
    pub fn count(&self, slot: &Slot) -> usize {
        self.per_slot_count.get(slot).copied().unwrap_or(0)
    }

    pub fn ratio(&self, slot: &Slot) -> f64 {
        self.per_slot_ratio.get(slot).copied().unwrap_or(0.0)
    }
}

/// A participant with recorded availability outside a proposed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedParticipant {
    pub id: String,
    pub name: String,
    /// The slots that would be purged
    pub out_of_range: SlotSet,
}

/// Outcome of checking a proposed constraint against existing responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResult {
    pub affected_participants: Vec<AffectedParticipant>,
    pub is_destructive: bool,
    /// What the proposal changes; `None` when there was no previous
    /// constraint to compare with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<ConstraintChange>,
}

impl ConflictResult {
    /// Nothing to conflict with.
    pub fn empty() -> Self {
        Self { affected_participants: Vec::new(), is_destructive: false, change: None }
    }

    pub fn affected_ids(&self) -> impl Iterator<Item = &str> {
        self.affected_participants.iter().map(|p| p.id.as_str())
    }

    /// Total number of slots that a purge would remove.
    pub fn purged_slot_count(&self) -> usize {
        self.affected_participants.iter().map(|p| p.out_of_range.len()).sum()
    }
}

/// Structural difference between two constraints, for host-facing messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintChange {
    pub granularity_changed: bool,
    /// Start moved later or end moved earlier
    pub date_range_narrowed: bool,
    /// Start moved earlier or end moved later
    pub date_range_widened: bool,
    /// Some previously admitted hour of day is no longer admitted
    pub hours_narrowed: bool,
    /// Some hour of day is admitted that was not before
    pub hours_widened: bool,
    pub weekdays_removed: Vec<DayOfWeek>,
    pub weekdays_added: Vec<DayOfWeek>,
    pub excluded_dates_added: Vec<NaiveDate>,
    pub excluded_dates_removed: Vec<NaiveDate>,
    /// `Some(new value)` when holiday exclusion was switched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_holidays_toggled: Option<bool>,
}

impl ConstraintChange {
    pub fn between(previous: &ScheduleConstraint, proposed: &ScheduleConstraint) -> Self {
        let previous_hours: BTreeSet<u8> = previous.hours_in_range().into_iter().collect();
        let proposed_hours: BTreeSet<u8> = proposed.hours_in_range().into_iter().collect();
        Self {
            granularity_changed: previous.granularity != proposed.granularity,
            date_range_narrowed: proposed.start_date > previous.start_date
                || proposed.end_date < previous.end_date,
            date_range_widened: proposed.start_date < previous.start_date
                || proposed.end_date > previous.end_date,
            hours_narrowed: !previous_hours.is_subset(&proposed_hours),
            hours_widened: !proposed_hours.is_subset(&previous_hours),
            weekdays_removed: sorted_difference(
                &previous.enabled_weekdays,
                &proposed.enabled_weekdays,
            ),
            weekdays_added: sorted_difference(&proposed.enabled_weekdays, &previous.enabled_weekdays),
            excluded_dates_added: sorted_difference(
                &proposed.excluded_dates,
                &previous.excluded_dates,
            ),
            excluded_dates_removed: sorted_difference(
                &previous.excluded_dates,
                &proposed.excluded_dates,
            ),
            exclude_holidays_toggled: (previous.exclude_holidays != proposed.exclude_holidays)
                .then_some(proposed.exclude_holidays),
        }
    }

    /// True when the proposal changes nothing.
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }

    /// True when the proposal can only admit fewer slots than before.
    ///
    /// A narrowing change is not necessarily destructive; that depends on
    /// whether anyone had responded inside the removed region.
    pub fn is_narrowing_only(&self) -> bool {
        !self.is_unchanged()
            && !self.granularity_changed
            && !self.date_range_widened
            && !self.hours_widened
            && self.weekdays_added.is_empty()
            && self.excluded_dates_removed.is_empty()
            && self.exclude_holidays_toggled != Some(false)
    }
}

fn sorted_difference<T: Ord + Copy>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> Vec<T> {
    a.difference(b).copied().collect()
}

/// Slot-keyed maps cross the wire keyed by the canonical slot key.
fn serialize_keyed<S, V>(map: &BTreeMap<Slot, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (slot, value) in map {
        out.serialize_entry(&slot.key(), value)?;
    }
    out.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn change_detects_narrowed_range() {
        let before = ScheduleConstraint::days(date(2025, 1, 1), date(2025, 1, 31));
        let after = ScheduleConstraint::days(date(2025, 1, 1), date(2025, 1, 20));
        let change = ConstraintChange::between(&before, &after);

        assert!(change.date_range_narrowed);
        assert!(!change.date_range_widened);
        assert!(change.is_narrowing_only());
    }

    #[test]
    fn change_lists_weekday_and_exclusion_edits() {
        let before = ScheduleConstraint::days(date(2025, 1, 1), date(2025, 1, 31))
            .excluding([date(2025, 1, 2)]);
        let after = before
            .clone()
            .with_weekdays(DayOfWeek::weekdays())
            .excluding([date(2025, 1, 10)])
            .with_holidays_excluded(true);
        let change = ConstraintChange::between(&before, &after);

        assert_eq!(change.weekdays_removed, vec![DayOfWeek::Sun, DayOfWeek::Sat]);
        assert!(change.weekdays_added.is_empty());
        assert_eq!(change.excluded_dates_added, vec![date(2025, 1, 10)]);
        assert_eq!(change.exclude_holidays_toggled, Some(true));
        assert!(change.is_narrowing_only());
    }

    #[test]
    fn identical_constraints_are_unchanged() {
        let c = ScheduleConstraint::hours(date(2025, 1, 6), date(2025, 1, 12), 9, 17);
        let change = ConstraintChange::between(&c, &c);
        assert!(change.is_unchanged());
        assert!(!change.is_narrowing_only());
    }

    #[test]
    fn widening_is_not_narrowing() {
        let before = ScheduleConstraint::hours(date(2025, 1, 6), date(2025, 1, 12), 9, 17);
        let after = ScheduleConstraint::hours(date(2025, 1, 6), date(2025, 1, 19), 9, 17);
        let change = ConstraintChange::between(&before, &after);
        assert!(change.date_range_widened);
        assert!(!change.is_narrowing_only());
    }

    #[test]
    fn widening_the_hour_window_is_not_narrowing() {
        let before = ScheduleConstraint::hours(date(2025, 1, 6), date(2025, 1, 12), 9, 17);
        let after = ScheduleConstraint::hours(date(2025, 1, 6), date(2025, 1, 12), 8, 18);
        let change = ConstraintChange::between(&before, &after);

        assert!(change.hours_widened);
        assert!(!change.hours_narrowed);
        assert!(!change.is_narrowing_only());

        let back = ConstraintChange::between(&after, &before);
        assert!(back.hours_narrowed);
        assert!(!back.hours_widened);
        assert!(back.is_narrowing_only());
    }

    #[test]
    fn wrapping_hour_ranges_compare_by_admitted_hours() {
        let late = ScheduleConstraint::hours(date(2025, 1, 6), date(2025, 1, 12), 22, 2);
        let shorter = ScheduleConstraint::hours(date(2025, 1, 6), date(2025, 1, 12), 23, 1);
        let shifted = ScheduleConstraint::hours(date(2025, 1, 6), date(2025, 1, 12), 21, 1);

        let change = ConstraintChange::between(&late, &shorter);
        assert!(change.hours_narrowed);
        assert!(!change.hours_widened);
        assert!(change.is_narrowing_only());

        // 21 is gained and 2 is lost
        let change = ConstraintChange::between(&late, &shifted);
        assert!(change.hours_narrowed);
        assert!(change.hours_widened);
        assert!(!change.is_narrowing_only());
    }

    #[test]
    fn aggregation_maps_serialize_by_slot_key() {
        let slot = Slot::day(date(2025, 1, 5));
        let result = AggregationResult {
            per_slot_count: [(slot, 2)].into_iter().collect(),
            per_slot_ratio: [(slot, 0.5)].into_iter().collect(),
            highlight: SlotSet::new(),
            participant_count: 4,
            best_slots: Vec::new(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["perSlotCount"]["2025-01-05"], 2);
        assert_eq!(json["perSlotRatio"]["2025-01-05"], 0.5);
        assert_eq!(result.count(&Slot::day(date(2025, 1, 6))), 0);
    }

    #[test]
    fn conflict_result_summaries() {
        let slot = Slot::day(date(2025, 2, 2));
        let result = ConflictResult {
            affected_participants: vec![AffectedParticipant {
                id: "p".into(),
                name: "P".into(),
                out_of_range: [slot].into_iter().collect(),
            }],
            is_destructive: true,
            change: None,
        };
        assert_eq!(result.affected_ids().collect::<Vec<_>>(), vec!["p"]);
        assert_eq!(result.purged_slot_count(), 1);
        assert!(!ConflictResult::empty().is_destructive);
    }
}
