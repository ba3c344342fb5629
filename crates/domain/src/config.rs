//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BEST_SLOT_LIMIT, DEFAULT_LOG_LEVEL, DEFAULT_MAX_CANDIDATE_DAYS};
use crate::impl_domain_code_conversions;

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub holidays: HolidayConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of the human formatter
    #[serde(default)]
    pub json: bool,
}

/// Schedule workflow configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub zero_availability_policy: ZeroAvailabilityPolicy,
    /// Upper bound on the date span a constraint may enumerate
    #[serde(default = "default_max_candidate_days")]
    pub max_candidate_days: u32,
    #[serde(default = "default_best_slot_limit")]
    pub best_slot_limit: usize,
}

/// Holiday source configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayConfig {
    /// TOML or JSON file listing public holidays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// What happens to a participant whose availability is emptied by a purge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroAvailabilityPolicy {
    /// Keep the participant with an empty availability set
    #[default]
    Retain,
    /// Remove the participant from the schedule
    Remove,
}

impl_domain_code_conversions!(ZeroAvailabilityPolicy {
    Retain => "retain",
    Remove => "remove",
});

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

const fn default_max_candidate_days() -> u32 {
    DEFAULT_MAX_CANDIDATE_DAYS
}

const fn default_best_slot_limit() -> usize {
    DEFAULT_BEST_SLOT_LIMIT
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            zero_availability_policy: ZeroAvailabilityPolicy::default(),
            max_candidate_days: DEFAULT_MAX_CANDIDATE_DAYS,
            best_slot_limit: DEFAULT_BEST_SLOT_LIMIT,
        }
    }
}
