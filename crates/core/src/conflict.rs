//! Range membership and conflict detection
//!
//! When a host narrows a schedule after people have responded, some recorded
//! availability may fall outside the new constraint. Detection finds those
//! slots per participant; purging removes them once the host confirms.
//! Neither step fails and neither step persists anything.

use meetgrid_domain::{
    AffectedParticipant, ConflictResult, ConstraintChange, Participant, ScheduleConstraint, Slot,
    SlotSet,
};

use crate::holidays::HolidayCalendar;

/// Membership predicate for one constraint and holiday source.
#[derive(Clone, Copy)]
pub struct RangeMembership<'a> {
    constraint: &'a ScheduleConstraint,
    holidays: &'a dyn HolidayCalendar,
}

impl<'a> RangeMembership<'a> {
    pub fn new(constraint: &'a ScheduleConstraint, holidays: &'a dyn HolidayCalendar) -> Self {
        Self { constraint, holidays }
    }

    pub const fn constraint(&self) -> &'a ScheduleConstraint {
        self.constraint
    }

    /// Date range, weekday mask, explicit exclusions and, when enabled,
    /// public holidays.
    pub fn admits_date(&self, date: chrono::NaiveDate) -> bool {
        self.constraint.admits_date(date)
            && !(self.constraint.exclude_holidays && self.holidays.is_public_holiday(date))
    }

    /// Whether `slot` is selectable under the constraint.
    ///
    /// A slot of the other granularity is never within.
    pub fn is_within(&self, slot: &Slot) -> bool {
        if slot.granularity() != self.constraint.granularity {
            return false;
        }
        if !self.admits_date(slot.date()) {
            return false;
        }
        slot.hour_of_day().map_or(true, |hour| self.constraint.admits_hour(hour))
    }
}

/// Free-function form of [`RangeMembership::is_within`].
pub fn is_within(
    slot: &Slot,
    constraint: &ScheduleConstraint,
    holidays: &dyn HolidayCalendar,
) -> bool {
    RangeMembership::new(constraint, holidays).is_within(slot)
}

/// Finds and removes availability that a proposed constraint excludes.
#[derive(Clone, Copy)]
pub struct RangeConflictDetector<'a> {
    holidays: &'a dyn HolidayCalendar,
}

impl<'a> RangeConflictDetector<'a> {
    pub fn new(holidays: &'a dyn HolidayCalendar) -> Self {
        Self { holidays }
    }

    /// Report participants with availability outside `proposed`.
    ///
    /// Without a previous constraint there is nothing to conflict with and the
    /// result is empty. Otherwise only `proposed` decides membership; the
    /// previous constraint just feeds the change summary.
    pub fn detect(
        &self,
        previous: Option<&ScheduleConstraint>,
        proposed: &ScheduleConstraint,
        participants: &[Participant],
    ) -> ConflictResult {
        let Some(previous) = previous else {
            return ConflictResult::empty();
        };

        let membership = RangeMembership::new(proposed, self.holidays);
        let affected_participants: Vec<AffectedParticipant> = participants
            .iter()
            .filter_map(|participant| {
                let out_of_range =
                    participant.availability.difference(|slot| membership.is_within(slot));
                (!out_of_range.is_empty()).then(|| AffectedParticipant {
                    id: participant.id.clone(),
                    name: participant.name.clone(),
                    out_of_range,
                })
            })
            .collect();

        ConflictResult {
            is_destructive: !affected_participants.is_empty(),
            affected_participants,
            change: Some(ConstraintChange::between(previous, proposed)),
        }
    }

    /// Availability restricted to the slots `proposed` admits.
    pub fn purge_availability(&self, availability: &SlotSet, proposed: &ScheduleConstraint) -> SlotSet {
        let membership = RangeMembership::new(proposed, self.holidays);
        availability.retain_matching(|slot| membership.is_within(slot))
    }

    /// Participant copy with out-of-range availability removed. An emptied
    /// participant is still returned; dropping them is the caller's choice.
    pub fn purge(&self, participant: &Participant, proposed: &ScheduleConstraint) -> Participant {
        participant.with_availability(self.purge_availability(&participant.availability, proposed))
    }
}
