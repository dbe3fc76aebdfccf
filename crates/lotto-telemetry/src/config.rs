//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for the tracing stack.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name for log fields.
    pub service_name: String,

    /// Log level filter (tracing `EnvFilter` syntax).
    pub log_level: String,

    /// Whether to emit JSON formatted logs.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "lottochain".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// - `LOTTO_SERVICE_NAME`: service name (default: lottochain)
    /// - `LOTTO_LOG_LEVEL`: filter (default: info)
    /// - `LOTTO_JSON_LOGS`: "true" enables JSON output
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            service_name: env::var("LOTTO_SERVICE_NAME").unwrap_or(default.service_name),
            log_level: env::var("LOTTO_LOG_LEVEL").unwrap_or(default.log_level),
            json_logs: env::var("LOTTO_JSON_LOGS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(default.json_logs),
        }
    }
}
