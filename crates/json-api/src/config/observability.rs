//! Logging and tracing config

use std::time::Duration;

use clap::{Args, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event, for terminals
    Compact,

    /// One JSON object per event, for log shippers
    Json,
}

/// Log output, trace export, and request logging settings.
///
/// Trace export is switched on by setting an OTLP endpoint.
#[derive(Debug, Args)]
pub struct TelemetryConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// OTLP gRPC collector, e.g. `http://localhost:4317`
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS", default_value_t = 3)]
    pub otlp_timeout_seconds: u64,

    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "parceltrack-json")]
    pub service_name: String,

    /// Fraction of root traces kept, clamped to [0, 1]
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0)]
    pub trace_sample_ratio: f64,

    /// Continue traces from incoming `traceparent` headers
    #[arg(long, env = "OTEL_PROPAGATE_PARENT", default_value_t = false)]
    pub propagate_parent: bool,

    /// Requests slower than this are logged as warnings
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_threshold_ms: u64,
}

impl TelemetryConfig {
    #[must_use]
    pub fn otlp_timeout(&self) -> Duration {
        Duration::from_secs(self.otlp_timeout_seconds)
    }

    #[must_use]
    pub fn slow_request_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_request_threshold_ms)
    }

    #[must_use]
    pub fn clamped_sample_ratio(&self) -> f64 {
        self.trace_sample_ratio.clamp(0.0, 1.0)
    }
}
