//! In-memory schedule repository
//!
//! Holds every schedule in a single map behind a read-write lock. Each port
//! call takes the lock once, so a constraint save and its purge land together.

use std::collections::HashMap;

use async_trait::async_trait;
use meetgrid_core::ScheduleRepository;
use meetgrid_domain::{
    MeetgridError, Participant, ParticipantRecord, Result, ScheduleConstraint,
    ScheduleConstraintRecord, SlotIssue, SlotSet,
};
use parking_lot::RwLock;

#[derive(Debug, Clone, Default)]
struct StoredSchedule {
    constraint: Option<ScheduleConstraint>,
    participants: Vec<Participant>,
}

/// `ScheduleRepository` backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryScheduleRepository {
    schedules: RwLock<HashMap<String, StoredSchedule>>,
}

impl InMemoryScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schedule. Fails if the id is taken.
    pub fn create_schedule(
        &self,
        schedule_id: &str,
        constraint: Option<ScheduleConstraint>,
    ) -> Result<()> {
        let mut schedules = self.schedules.write();
        if schedules.contains_key(schedule_id) {
            return Err(MeetgridError::Conflict(format!("schedule {schedule_id} already exists")));
        }
        schedules.insert(
            schedule_id.to_string(),
            StoredSchedule { constraint, participants: Vec::new() },
        );
        tracing::debug!(schedule_id, "Schedule created");
        Ok(())
    }

    /// Insert or replace a participant, keeping first-response order.
    pub fn upsert_participant(&self, schedule_id: &str, participant: Participant) -> Result<()> {
        let mut schedules = self.schedules.write();
        let schedule = schedules
            .get_mut(schedule_id)
            .ok_or_else(|| MeetgridError::NotFound(format!("schedule {schedule_id}")))?;
        match schedule.participants.iter_mut().find(|p| p.id == participant.id) {
            Some(existing) => *existing = participant,
            None => schedule.participants.push(participant),
        }
        Ok(())
    }

    /// Create a schedule from persisted wire records.
    ///
    /// Availability entries that do not parse under the constraint's
    /// granularity are skipped and returned.
    pub fn import_records(
        &self,
        schedule_id: &str,
        constraint: &ScheduleConstraintRecord,
        participants: Vec<ParticipantRecord>,
    ) -> Result<Vec<SlotIssue>> {
        let constraint = ScheduleConstraint::try_from(constraint)?;
        let granularity = constraint.granularity;
        self.create_schedule(schedule_id, Some(constraint))?;

        let mut issues = Vec::new();
        for record in participants {
            let (participant, mut skipped) = record.into_participant(granularity);
            for issue in &skipped {
                tracing::warn!(
                    schedule_id,
                    participant_id = issue.participant_id.as_deref().unwrap_or_default(),
                    raw = %issue.raw,
                    kind = issue.error.label(),
                    "Skipping stored availability entry"
                );
            }
            issues.append(&mut skipped);
            self.upsert_participant(schedule_id, participant)?;
        }
        Ok(issues)
    }

    /// Wire records of every participant in a schedule.
    pub fn export_participants(&self, schedule_id: &str) -> Result<Vec<ParticipantRecord>> {
        let schedules = self.schedules.read();
        let schedule = schedules
            .get(schedule_id)
            .ok_or_else(|| MeetgridError::NotFound(format!("schedule {schedule_id}")))?;
        Ok(schedule.participants.iter().map(Participant::to_record).collect())
    }

    pub fn schedule_count(&self) -> usize {
        self.schedules.read().len()
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn load_constraint(&self, schedule_id: &str) -> Result<Option<ScheduleConstraint>> {
        Ok(self.schedules.read().get(schedule_id).and_then(|s| s.constraint.clone()))
    }

    async fn list_participants(&self, schedule_id: &str) -> Result<Vec<Participant>> {
        Ok(self
            .schedules
            .read()
            .get(schedule_id)
            .map(|s| s.participants.clone())
            .unwrap_or_default())
    }

    async fn save_constraint(
        &self,
        schedule_id: &str,
        constraint: &ScheduleConstraint,
        purged: &[Participant],
        removed: &[String],
    ) -> Result<()> {
        let mut schedules = self.schedules.write();
        let schedule = schedules.entry(schedule_id.to_string()).or_default();

        schedule.constraint = Some(constraint.clone());
        for update in purged {
            if let Some(existing) = schedule.participants.iter_mut().find(|p| p.id == update.id) {
                existing.availability = update.availability.clone();
            }
        }
        schedule.participants.retain(|p| !removed.contains(&p.id));

        tracing::debug!(
            schedule_id,
            purged = purged.len(),
            removed = removed.len(),
            "Constraint saved"
        );
        Ok(())
    }

    async fn save_availability(
        &self,
        schedule_id: &str,
        participant_id: &str,
        availability: &SlotSet,
    ) -> Result<()> {
        let mut schedules = self.schedules.write();
        let participant = schedules
            .get_mut(schedule_id)
            .ok_or_else(|| MeetgridError::NotFound(format!("schedule {schedule_id}")))?
            .participants
            .iter_mut()
            .find(|p| p.id == participant_id)
            .ok_or_else(|| {
                MeetgridError::NotFound(format!(
                    "participant {participant_id} in schedule {schedule_id}"
                ))
            })?;
        participant.availability = availability.clone();
        Ok(())
    }
}
