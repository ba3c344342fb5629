//! Port interfaces for schedule persistence
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use meetgrid_domain::{Participant, Result, ScheduleConstraint, SlotSet};

/// Storage for schedules and their responses
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Current constraint, `None` if the schedule has none yet
    async fn load_constraint(&self, schedule_id: &str) -> Result<Option<ScheduleConstraint>>;

    /// Every participant who has responded
    async fn list_participants(&self, schedule_id: &str) -> Result<Vec<Participant>>;

    /// Store a new constraint together with its purge, in one write.
    ///
    /// `purged` replaces those participants' stored availability; `removed`
    /// lists participants to delete outright.
    async fn save_constraint(
        &self,
        schedule_id: &str,
        constraint: &ScheduleConstraint,
        purged: &[Participant],
        removed: &[String],
    ) -> Result<()>;

    /// Replace one participant's availability
    async fn save_availability(
        &self,
        schedule_id: &str,
        participant_id: &str,
        availability: &SlotSet,
    ) -> Result<()>;
}
