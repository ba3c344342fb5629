//! Configuration loader
//!
//! Loads engine configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If none are set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. Without any source, every setting keeps its default
//!
//! ## Environment Variables
//! - `MEETGRID_LOG_LEVEL`: Default log filter directive
//! - `MEETGRID_LOG_JSON`: Emit JSON log lines (true/false)
//! - `MEETGRID_ZERO_AVAILABILITY`: `retain` or `remove`
//! - `MEETGRID_MAX_CANDIDATE_DAYS`: Longest date span a schedule may cover
//! - `MEETGRID_BEST_SLOT_LIMIT`: Number of ranked best slots
//! - `MEETGRID_HOLIDAYS_PATH`: Holiday file (TOML or JSON)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./meetgrid.json` or `./meetgrid.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../` and `../../` of the above
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use meetgrid_domain::constants::{
    ENV_BEST_SLOT_LIMIT, ENV_HOLIDAYS_PATH, ENV_LOG_JSON, ENV_LOG_LEVEL, ENV_MAX_CANDIDATE_DAYS,
    ENV_ZERO_AVAILABILITY,
};
use meetgrid_domain::{EngineConfig, MeetgridError, Result, ZeroAvailabilityPolicy};
use serde::de::DeserializeOwned;

use crate::errors::InfraError;

const ENV_KEYS: [&str; 6] = [
    ENV_LOG_LEVEL,
    ENV_LOG_JSON,
    ENV_ZERO_AVAILABILITY,
    ENV_MAX_CANDIDATE_DAYS,
    ENV_BEST_SLOT_LIMIT,
    ENV_HOLIDAYS_PATH,
];

const FILE_NAMES: [&str; 4] = ["meetgrid.json", "meetgrid.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If none are set,
/// falls back to a probed config file, and finally to defaults.
///
/// # Errors
/// Returns `MeetgridError::Config` if a source exists but is invalid.
pub fn load() -> Result<EngineConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            return Ok(config);
        }
        Err(MeetgridError::NotFound(_)) => {
            tracing::debug!("No MEETGRID_ environment variables set, trying file");
        }
        Err(e) => return Err(e),
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::debug!("No config file found, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

/// Load configuration from environment variables
///
/// Unset variables keep their defaults.
///
/// # Errors
/// Returns `MeetgridError::NotFound` if no variable is set at all, and
/// `MeetgridError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<EngineConfig> {
    if ENV_KEYS.iter().all(|key| std::env::var(key).is_err()) {
        return Err(MeetgridError::NotFound("no MEETGRID_ environment variables set".to_string()));
    }

    let mut config = EngineConfig::default();

    if let Some(level) = env_opt(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }
    config.logging.json = env_bool(ENV_LOG_JSON, config.logging.json);

    if let Some(policy) = env_opt(ENV_ZERO_AVAILABILITY) {
        config.schedule.zero_availability_policy = policy
            .parse::<ZeroAvailabilityPolicy>()
            .map_err(|e| MeetgridError::Config(format!("Invalid zero availability policy: {e}")))?;
    }
    if let Some(days) = env_opt(ENV_MAX_CANDIDATE_DAYS) {
        config.schedule.max_candidate_days = days
            .parse::<u32>()
            .map_err(|e| MeetgridError::Config(format!("Invalid max candidate days: {e}")))?;
    }
    if let Some(limit) = env_opt(ENV_BEST_SLOT_LIMIT) {
        config.schedule.best_slot_limit = limit
            .parse::<usize>()
            .map_err(|e| MeetgridError::Config(format!("Invalid best slot limit: {e}")))?;
    }
    config.holidays.path = env_opt(ENV_HOLIDAYS_PATH).or(config.holidays.path);

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `MeetgridError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<EngineConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MeetgridError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MeetgridError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    read_document(&config_path)
}

/// Read and parse a TOML or JSON document.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(InfraError::from)?;
    parse_document(&contents, path)
}

/// Parse document content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `MeetgridError::Config` if format is invalid or parsing fails.
pub(crate) fn parse_document<T: DeserializeOwned>(contents: &str, path: &Path) -> Result<T> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => Ok(toml::from_str(contents).map_err(InfraError::from)?),
        "json" => Ok(serde_json::from_str(contents).map_err(InfraError::from)?),
        _ => Err(MeetgridError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its two parents, and the
/// executable's directory with its two parents.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| {
            ["", "..", "../.."].into_iter().flat_map(move |up| {
                FILE_NAMES.into_iter().map(move |name| root.join(up).join(name))
            })
        })
        .find(|path| path.exists())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
