// src/telemetry/tracing.rs
//! Logging estructurado para el generador.
//!
//! Responsibilities:
//! - Install a global `tracing` subscriber (fmt layer, text or JSON).
//! - Resolve the filter from `RUST_LOG`, then `logging.level`, then `info`.
//! - Never panic on a second init: tests and embedders may install their own subscriber.

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

use crate::config::app_config::LoggingConfig;

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber. Returns `false` if one was already set.
pub fn init_tracing(cfg: &LoggingConfig) -> bool {
    let env_filter = build_filter(cfg);

    let installed = if cfg.json {
        Registry::default()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        Registry::default()
            .with(env_filter)
            .with(fmt::layer().with_target(false))
            .try_init()
    };

    installed.is_ok()
}

fn build_filter(cfg: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = cfg.level.as_deref().unwrap_or(DEFAULT_LEVEL);
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}
