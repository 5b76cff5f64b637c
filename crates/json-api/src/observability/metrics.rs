//! Prometheus metrics and the `/metrics` endpoint.

use std::{sync::OnceLock, time::Duration};

use parceltrack_app::notifications::DispatchReport;
use prometheus::{
    Encoder as _, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use salvo::{
    handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
    prelude::Response,
};
use tracing::error;

const LATENCY_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    http_requests: IntCounterVec,
    http_latency: HistogramVec,
    http_in_flight: IntGauge,
    email_deliveries: IntCounterVec,
}

impl Metrics {
    fn build() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some("parceltrack_json".to_string()), None)?;

        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests by method, route, and status."),
            &["method", "route", "status"],
        )?;

        let http_latency = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request latency.")
                .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "route"],
        )?;

        let http_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests being handled.")?;

        let email_deliveries = IntCounterVec::new(
            Opts::new("email_deliveries_total", "Notification emails by outcome."),
            &["outcome"],
        )?;

        registry.register(Box::new(http_requests.clone()))?;
        registry.register(Box::new(http_latency.clone()))?;
        registry.register(Box::new(http_in_flight.clone()))?;
        registry.register(Box::new(email_deliveries.clone()))?;

        Ok(Self {
            registry,
            http_requests,
            http_latency,
            http_in_flight,
            email_deliveries,
        })
    }

    fn record_dispatch(&self, report: &DispatchReport) {
        for delivery in report.deliveries() {
            let outcome = if delivery.is_sent() { "sent" } else { "failed" };

            self.email_deliveries.with_label_values(&[outcome]).inc();
        }
    }
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| {
            Metrics::build()
                .inspect_err(|source| error!("failed to register metrics: {source}"))
                .ok()
        })
        .as_ref()
}

/// Counts a request as in flight until dropped.
#[derive(Debug)]
pub(super) struct InFlight(Option<&'static Metrics>);

impl InFlight {
    pub(super) fn start() -> Self {
        let metrics = metrics();

        if let Some(metrics) = metrics {
            metrics.http_in_flight.inc();
        }

        Self(metrics)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(metrics) = self.0 {
            metrics.http_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status: StatusCode, elapsed: Duration) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .http_requests
        .with_label_values(&[method, route, status.as_str()])
        .inc();

    metrics
        .http_latency
        .with_label_values(&[method, route])
        .observe(elapsed.as_secs_f64());
}

/// Count the emails a request attempted. Handlers call this once per
/// dispatch, after the service returns.
pub(crate) fn record_dispatch(report: &DispatchReport) {
    if let Some(metrics) = metrics() {
        metrics.record_dispatch(report);
    }
}

#[handler]
pub(crate) async fn metrics_handler(res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
        return;
    };

    let encoder = TextEncoder::new();
    let mut body = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut body) {
        error!("failed to encode metrics: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    res.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static(prometheus::TEXT_FORMAT),
    );
    res.render(String::from_utf8_lossy(&body).into_owned());
}
