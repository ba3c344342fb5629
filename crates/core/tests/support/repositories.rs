//! Mock repository implementation for testing
//!
//! Keeps one schedule per id in memory and records every constraint write,
//! enabling deterministic workflow tests without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use meetgrid_core::ScheduleRepository;
use meetgrid_domain::{
    MeetgridError, Participant, Result as DomainResult, ScheduleConstraint, SlotSet,
};

#[derive(Default)]
struct Schedule {
    constraint: Option<ScheduleConstraint>,
    participants: Vec<Participant>,
}

/// In-memory mock for `ScheduleRepository`.
#[derive(Default)]
pub struct MockScheduleRepository {
    schedules: Mutex<HashMap<String, Schedule>>,
    constraint_writes: Mutex<usize>,
}

impl MockScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a schedule with a constraint and participants.
    pub fn with_schedule(
        self,
        schedule_id: &str,
        constraint: Option<ScheduleConstraint>,
        participants: Vec<Participant>,
    ) -> Self {
        self.schedules
            .lock()
            .unwrap()
            .insert(schedule_id.to_string(), Schedule { constraint, participants });
        self
    }

    pub fn constraint(&self, schedule_id: &str) -> Option<ScheduleConstraint> {
        self.schedules.lock().unwrap().get(schedule_id).and_then(|s| s.constraint.clone())
    }

    pub fn participants(&self, schedule_id: &str) -> Vec<Participant> {
        self.schedules
            .lock()
            .unwrap()
            .get(schedule_id)
            .map(|s| s.participants.clone())
            .unwrap_or_default()
    }

    pub fn constraint_writes(&self) -> usize {
        *self.constraint_writes.lock().unwrap()
    }
}

#[async_trait]
impl ScheduleRepository for MockScheduleRepository {
    async fn load_constraint(&self, schedule_id: &str) -> DomainResult<Option<ScheduleConstraint>> {
        Ok(self.constraint(schedule_id))
    }

    async fn list_participants(&self, schedule_id: &str) -> DomainResult<Vec<Participant>> {
        Ok(self.participants(schedule_id))
    }

    async fn save_constraint(
        &self,
        schedule_id: &str,
        constraint: &ScheduleConstraint,
        purged: &[Participant],
        removed: &[String],
    ) -> DomainResult<()> {
        let mut schedules = self.schedules.lock().unwrap();
        let schedule = schedules.entry(schedule_id.to_string()).or_default();
        schedule.constraint = Some(constraint.clone());
        for update in purged {
            if let Some(existing) = schedule.participants.iter_mut().find(|p| p.id == update.id) {
                existing.availability = update.availability.clone();
            }
        }
        schedule.participants.retain(|p| !removed.contains(&p.id));
        *self.constraint_writes.lock().unwrap() += 1;
        Ok(())
    }

    async fn save_availability(
        &self,
        schedule_id: &str,
        participant_id: &str,
        availability: &SlotSet,
    ) -> DomainResult<()> {
        let mut schedules = self.schedules.lock().unwrap();
        let participant = schedules
            .get_mut(schedule_id)
            .and_then(|s| s.participants.iter_mut().find(|p| p.id == participant_id))
            .ok_or_else(|| MeetgridError::NotFound(format!("participant {participant_id}")))?;
        participant.availability = availability.clone();
        Ok(())
    }
}
