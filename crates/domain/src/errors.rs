//! Error types used throughout the engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Meetgrid
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum MeetgridError {
    #[error("Malformed slot: {0}")]
    MalformedSlot(String),

    #[error("Invalid granularity: {0}")]
    InvalidGranularity(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MeetgridError {
    /// Stable label suitable for structured log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MalformedSlot(_) => "malformed_slot",
            Self::InvalidGranularity(_) => "invalid_granularity",
            Self::InvalidInput(_) => "invalid_input",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Persistence(_) => "persistence",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Meetgrid operations
pub type Result<T> = std::result::Result<T, MeetgridError>;

/// A wire entry that was dropped while converting records into domain values.
///
/// Conversion never aborts a batch; offending entries are skipped and reported
/// through this type so the caller can surface a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotIssue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    pub raw: String,
    pub error: MeetgridError,
}
