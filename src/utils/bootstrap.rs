//! Bootstrap utilities for applications embedding the fee engine.
//!
//! Shared initialization: tracing and configuration loading.

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, LOG_ENV_VAR};
use crate::error::Result;

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

/// Initialize tracing with the TRACKPRO_LOG environment variable.
///
/// Defaults to "info" level if TRACKPRO_LOG is not set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Like [`init_tracing`], but tolerates a subscriber already being set.
///
/// Returns false when another subscriber was installed first.
pub fn try_init_tracing() -> bool {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

/// Load configuration, logging the outcome.
pub fn load_config() -> Result<Config> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        poll_interval = ?config.role_wait.poll_interval(),
        timeout = ?config.role_wait.timeout(),
        "Loaded trackpro configuration"
    );

    Ok(config)
}
