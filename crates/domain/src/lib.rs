//! # Meetgrid Domain
//!
//! Scheduling domain types for Meetgrid.
//!
//! This crate contains:
//! - Slot identity and slot-set operations
//! - Participants, schedule constraints and their wire records
//! - Aggregation and conflict result shapes
//! - Domain error types and Result definitions
//! - Engine configuration structures
//!
//! ## Architecture
//! - No dependencies on other Meetgrid crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
