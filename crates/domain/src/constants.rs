//! Domain constants
//!
//! Centralized location for the constants shared by the engine crates.

// Slot identity
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";
pub const WIRE_SLOT_FORMAT: &str = "%Y-%m-%dT%H:00:00";
pub const MAX_HOUR: u8 = 23;

// Configuration defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_MAX_CANDIDATE_DAYS: u32 = 62;
pub const DEFAULT_BEST_SLOT_LIMIT: usize = 5;

// Environment variables read by the config loader
pub const ENV_LOG_LEVEL: &str = "MEETGRID_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "MEETGRID_LOG_JSON";
pub const ENV_ZERO_AVAILABILITY: &str = "MEETGRID_ZERO_AVAILABILITY";
pub const ENV_MAX_CANDIDATE_DAYS: &str = "MEETGRID_MAX_CANDIDATE_DAYS";
pub const ENV_BEST_SLOT_LIMIT: &str = "MEETGRID_BEST_SLOT_LIMIT";
pub const ENV_HOLIDAYS_PATH: &str = "MEETGRID_HOLIDAYS_PATH";
