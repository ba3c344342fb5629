//! Schedule services - core business logic

use std::sync::Arc;

use meetgrid_domain::{
    parse_slots, AffectedParticipant, AggregationResult, MeetgridError, Result,
    ScheduleConfig, ScheduleConstraint, SlotIssue, SlotSet, ZeroAvailabilityPolicy,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::ports::ScheduleRepository;
use crate::aggregation::aggregate;
use crate::candidates::enumerate_candidates;
use crate::conflict::{RangeConflictDetector, RangeMembership};
use crate::holidays::HolidayCalendar;

/// Result of asking to replace a schedule's constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum UpdateOutcome {
    /// The constraint was stored and any purge applied
    Committed(CommitSummary),
    /// Nothing was written; the host must confirm removing these responses
    #[serde(rename_all = "camelCase")]
    RequiresConfirmation { affected: Vec<AffectedParticipant> },
}

impl UpdateOutcome {
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// What a committed update purged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSummary {
    pub purged_participants: Vec<String>,
    pub purged_slots: usize,
    /// Participants deleted because the purge left them with nothing
    pub removed_participants: Vec<String>,
}

/// Detect, confirm, commit.
pub struct ScheduleUpdateService {
    repository: Arc<dyn ScheduleRepository>,
    holidays: Arc<dyn HolidayCalendar>,
    zero_availability: ZeroAvailabilityPolicy,
}

impl ScheduleUpdateService {
    /// Create a new update service that keeps emptied participants
    pub fn new(repository: Arc<dyn ScheduleRepository>, holidays: Arc<dyn HolidayCalendar>) -> Self {
        Self { repository, holidays, zero_availability: ZeroAvailabilityPolicy::default() }
    }

    pub fn from_config(
        repository: Arc<dyn ScheduleRepository>,
        holidays: Arc<dyn HolidayCalendar>,
        config: &ScheduleConfig,
    ) -> Self {
        Self::new(repository, holidays).with_zero_availability_policy(config.zero_availability_policy)
    }

    #[must_use]
    pub fn with_zero_availability_policy(mut self, policy: ZeroAvailabilityPolicy) -> Self {
        self.zero_availability = policy;
        self
    }

    /// Replace the constraint of `schedule_id` with `proposed`.
    ///
    /// If existing responses fall outside `proposed` and the host has not
    /// confirmed, nothing is written and the affected participants are
    /// returned. Granularity cannot change once anyone has responded.
    pub async fn update_constraint(
        &self,
        schedule_id: &str,
        proposed: ScheduleConstraint,
        confirm_destructive: bool,
    ) -> Result<UpdateOutcome> {
        proposed.validate()?;

        let previous = self.repository.load_constraint(schedule_id).await?;
        let participants = self.repository.list_participants(schedule_id).await?;

        if let Some(previous) = &previous {
            if previous.granularity != proposed.granularity && !participants.is_empty() {
                return Err(MeetgridError::Conflict(format!(
                    "schedule {schedule_id} has responses; granularity cannot change from {} to {}",
                    previous.granularity, proposed.granularity
                )));
            }
        }

        let detector = RangeConflictDetector::new(self.holidays.as_ref());
        let conflict = detector.detect(previous.as_ref(), &proposed, &participants);

        if conflict.is_destructive && !confirm_destructive {
            info!(
                schedule_id,
                affected = conflict.affected_participants.len(),
                slots = conflict.purged_slot_count(),
                "Constraint update needs confirmation"
            );
            return Ok(UpdateOutcome::RequiresConfirmation {
                affected: conflict.affected_participants,
            });
        }

        let mut purged = Vec::new();
        let mut summary = CommitSummary {
            purged_slots: conflict.purged_slot_count(),
            ..CommitSummary::default()
        };
        for affected in &conflict.affected_participants {
            let Some(participant) = participants.iter().find(|p| p.id == affected.id) else {
                continue;
            };
            let trimmed = detector.purge(participant, &proposed);
            if trimmed.availability.is_empty()
                && self.zero_availability == ZeroAvailabilityPolicy::Remove
            {
                summary.removed_participants.push(trimmed.id);
            } else {
                summary.purged_participants.push(trimmed.id.clone());
                purged.push(trimmed);
            }
        }

        self.repository
            .save_constraint(schedule_id, &proposed, &purged, &summary.removed_participants)
            .await?;

        info!(
            schedule_id,
            purged = summary.purged_participants.len(),
            removed = summary.removed_participants.len(),
            slots = summary.purged_slots,
            "Constraint updated"
        );
        Ok(UpdateOutcome::Committed(summary))
    }
}

/// Outcome of a raw availability submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    /// What was persisted
    pub stored: SlotSet,
    /// Parsed slots the constraint does not admit
    pub out_of_range: SlotSet,
    /// Entries that could not be parsed
    pub issues: Vec<SlotIssue>,
}

/// Participant-facing operations on a schedule.
pub struct AvailabilityService {
    repository: Arc<dyn ScheduleRepository>,
    holidays: Arc<dyn HolidayCalendar>,
    config: ScheduleConfig,
}

impl AvailabilityService {
    pub fn new(repository: Arc<dyn ScheduleRepository>, holidays: Arc<dyn HolidayCalendar>) -> Self {
        Self { repository, holidays, config: ScheduleConfig::default() }
    }

    #[must_use]
    pub fn with_config(mut self, config: ScheduleConfig) -> Self {
        self.config = config;
        self
    }

    /// Store `availability` for one participant, minus any slot the current
    /// constraint does not admit. Returns the stored set.
    pub async fn submit(
        &self,
        schedule_id: &str,
        participant_id: &str,
        availability: SlotSet,
    ) -> Result<SlotSet> {
        let constraint = self.require_constraint(schedule_id).await?;
        let (stored, out_of_range) = self.split(&constraint, &availability);
        if !out_of_range.is_empty() {
            warn!(
                schedule_id,
                participant_id,
                dropped = out_of_range.len(),
                "Dropped availability outside the schedule constraint"
            );
        }
        self.repository.save_availability(schedule_id, participant_id, &stored).await?;
        debug!(schedule_id, participant_id, slots = stored.len(), "Availability stored");
        Ok(stored)
    }

    /// Like [`submit`](Self::submit) but from wire strings; unparseable
    /// entries are reported instead of failing the call.
    pub async fn submit_raw(
        &self,
        schedule_id: &str,
        participant_id: &str,
        raw: &[String],
    ) -> Result<SubmissionReport> {
        let constraint = self.require_constraint(schedule_id).await?;
        let (parsed, issues) = parse_slots(
            Some(participant_id),
            raw.iter().map(String::as_str),
            constraint.granularity,
        );
        for issue in &issues {
            warn!(
                schedule_id,
                participant_id,
                raw = %issue.raw,
                kind = issue.error.label(),
                "Skipping availability entry"
            );
        }

        let (stored, out_of_range) = self.split(&constraint, &parsed);
        if !out_of_range.is_empty() {
            warn!(
                schedule_id,
                participant_id,
                dropped = out_of_range.len(),
                "Dropped availability outside the schedule constraint"
            );
        }
        self.repository.save_availability(schedule_id, participant_id, &stored).await?;
        Ok(SubmissionReport { stored, out_of_range, issues })
    }

    /// Every slot the current constraint admits.
    pub async fn candidates(&self, schedule_id: &str) -> Result<SlotSet> {
        let constraint = self.require_constraint(schedule_id).await?;
        enumerate_candidates(&constraint, self.holidays.as_ref(), self.config.max_candidate_days)
    }

    /// Aggregate current responses, highlighting what `selected_ids` share.
    pub async fn overview(
        &self,
        schedule_id: &str,
        selected_ids: &[String],
    ) -> Result<AggregationResult> {
        let candidates = self.candidates(schedule_id).await?;
        let participants = self.repository.list_participants(schedule_id).await?;
        Ok(aggregate(&candidates, &participants, selected_ids, self.config.best_slot_limit))
    }

    async fn require_constraint(&self, schedule_id: &str) -> Result<ScheduleConstraint> {
        self.repository
            .load_constraint(schedule_id)
            .await?
            .ok_or_else(|| {
                MeetgridError::NotFound(format!("schedule {schedule_id} has no constraint"))
            })
    }

    fn split(&self, constraint: &ScheduleConstraint, availability: &SlotSet) -> (SlotSet, SlotSet) {
        let membership = RangeMembership::new(constraint, self.holidays.as_ref());
        (
            availability.retain_matching(|slot| membership.is_within(slot)),
            availability.difference(|slot| membership.is_within(slot)),
        )
    }
}
