//! Logs, traces, and metrics.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use thiserror::Error;
use tracing::error;

use crate::config::observability::TelemetryConfig;

mod metrics;
mod request;
mod subscriber;

pub(crate) use metrics::{metrics_handler, record_dispatch};
pub(crate) use request::RequestLogger;

#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("failed to build OTLP exporter: {0}")]
    OtlpExporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Installed telemetry. Call [`Observability::shutdown`] before exit so
/// buffered spans are flushed.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    pub(crate) fn init(config: &TelemetryConfig) -> Result<Self, ObservabilityError> {
        let tracer_provider = match &config.otlp_endpoint {
            Some(endpoint) => {
                global::set_text_map_propagator(TraceContextPropagator::new());

                Some(subscriber::tracer_provider(config, endpoint)?)
            }
            None => None,
        };

        subscriber::install(config, tracer_provider.as_ref())?;

        Ok(Self { tracer_provider })
    }

    pub(crate) fn shutdown(self) {
        if let Some(provider) = self.tracer_provider
            && let Err(source) = provider.shutdown()
        {
            error!("failed to flush traces: {source}");
        }
    }
}
