//! Schedule update and availability workflows

pub mod ports;
pub mod service;

pub use ports::ScheduleRepository;
pub use service::{
    AvailabilityService, CommitSummary, ScheduleUpdateService, SubmissionReport, UpdateOutcome,
};
