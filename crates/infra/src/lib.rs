//! # Meetgrid Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Configuration loading from environment and files
//! - File-backed public holiday calendar
//! - In-memory schedule repository
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `meetgrid-core`
//! - Depends on `meetgrid-domain` and `meetgrid-core`
//! - Contains all "impure" code (I/O, global subscribers)

pub mod config;
pub mod errors;
pub mod holidays;
pub mod observability;
#[cfg(feature = "memory-repo")]
pub mod repository;

// Re-export commonly used items
pub use errors::InfraError;
pub use holidays::{load_holiday_calendar, StaticHolidayCalendar};
pub use observability::init_tracing;
#[cfg(feature = "memory-repo")]
pub use repository::InMemoryScheduleRepository;
