//! Domain types and models

pub mod constraint;
pub mod participant;
pub mod results;
pub mod slot;
pub mod slot_set;

pub use constraint::{DayOfWeek, ScheduleConstraint, ScheduleConstraintRecord};
pub use participant::{parse_slots, Participant, ParticipantRecord, ParticipantSummary};
pub use results::{AffectedParticipant, AggregationResult, ConflictResult, ConstraintChange, RankedSlot};
pub use slot::{day_key, hour_key, same_slot, Granularity, Slot};
pub use slot_set::{intersect_availability, SlotSet, ToggleMode};
