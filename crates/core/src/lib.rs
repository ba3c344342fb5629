//! # Meetgrid Core
//!
//! Availability selection, aggregation and conflict detection.
//!
//! This crate contains:
//! - Drag/touch selection over slot grids
//! - Per-slot aggregation and best-slot ranking
//! - Range membership, conflict detection and purge
//! - Candidate enumeration
//! - Schedule workflows over the `ScheduleRepository` port
//!
//! ## Architecture Principles
//! - Only depends on `meetgrid-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod aggregation;
pub mod candidates;
pub mod conflict;
pub mod holidays;
pub mod schedule;
pub mod selection;

pub use aggregation::{
    aggregate, apply_highlight_to_selection, availability_summary, compute_counts,
    compute_highlight, compute_ratios, rank_best_slots, ParticipantAvailability,
};
pub use candidates::enumerate_candidates;
pub use conflict::{is_within, RangeConflictDetector, RangeMembership};
pub use holidays::{HolidayCalendar, NoHolidays};
pub use schedule::{
    AvailabilityService, CommitSummary, ScheduleRepository, ScheduleUpdateService,
    SubmissionReport, UpdateOutcome,
};
pub use selection::{
    CandidateGate, DragSelectionController, DragState, GridPoint, LockedSlots, OpenGate,
    SelectionOwner, SlotGate, SlotHitTester, UniformGridHitTester,
};
