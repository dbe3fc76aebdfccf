//! # Lotto Telemetry
//!
//! Tracing setup for the workspace.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lotto_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(&config).expect("Failed to init telemetry");
//!     // Structured logs now flow through tracing-subscriber.
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOTTO_LOG_LEVEL` | `info` | Log level filter (tracing `EnvFilter` syntax) |
//! | `LOTTO_SERVICE_NAME` | `lottochain` | Service name field |
//! | `LOTTO_JSON_LOGS` | `false` | Emit JSON-formatted logs |

mod config;

pub use config::TelemetryConfig;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Telemetry initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A tracing subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Guard that keeps telemetry active for the process lifetime.
pub struct TelemetryGuard {
    _private: (),
}

/// Initialize the tracing subscriber from configuration.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::info!(service = %config.service_name, "telemetry initialized");
    Ok(TelemetryGuard { _private: () })
}
