//! Tracing subscriber setup

use meetgrid_domain::{LoggingConfig, MeetgridError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.level`. Returns `Ok(false)` when a global
/// subscriber is already installed, which leaves the existing one untouched.
///
/// # Errors
/// Returns `MeetgridError::Config` if `config.level` is not a valid filter
/// directive.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    let filter = build_filter(config)?;

    let installed = if config.json { init_json(filter) } else { init_plain(filter) };

    match installed {
        Ok(()) => {
            tracing::debug!(level = %config.level, json = config.json, "Tracing initialised");
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            MeetgridError::Config(format!("Invalid log level '{}': {e}", config.level))
        }),
    }
}

fn init_plain(filter: EnvFilter) -> std::result::Result<(), TryInitError> {
    tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).try_init()
}

#[cfg(feature = "json-logs")]
fn init_json(filter: EnvFilter) -> std::result::Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
}

#[cfg(not(feature = "json-logs"))]
fn init_json(filter: EnvFilter) -> std::result::Result<(), TryInitError> {
    let installed = init_plain(filter);
    tracing::warn!("JSON logs requested but the json-logs feature is disabled");
    installed
}
