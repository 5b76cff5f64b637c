//! Request logging middleware.
//!
//! Every request gets an `x-request-id` (kept from the caller when present),
//! an `http.request` span, a completion log line, and HTTP metrics labelled
//! by route with tracking IDs and UUIDs folded into placeholders.

use std::time::{Duration, Instant};

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use parceltrack_app::domain::packages::TrackingId;
use salvo::{
    Depot, FlowCtrl, Handler, Request, Response, async_trait,
    http::{
        HeaderMap, StatusCode,
        header::{HeaderName, HeaderValue},
    },
};
use tracing::{Instrument as _, Span, error, field, info, info_span, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;
use uuid::Uuid;

use crate::config::observability::TelemetryConfig;

use super::metrics::{InFlight, observe_request};

const REQUEST_ID_HEADER: &str = "x-request-id";

const UNLOGGED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLogger {
    slow_request_threshold: Duration,
    propagate_parent: bool,
}

impl RequestLogger {
    pub(crate) fn new(config: &TelemetryConfig) -> Self {
        Self {
            slow_request_threshold: config.slow_request_threshold(),
            propagate_parent: config.otlp_endpoint.is_some() && config.propagate_parent,
        }
    }

    fn request_span(&self, req: &Request, request_id: &str, route: &str) -> Span {
        let method = req.method();

        let span = info_span!(
            parent: None,
            "http.request",
            otel.name = %format_args!("{method} {route}"),
            otel.kind = "server",
            request_id,
            method = %method,
            path = req.uri().path(),
            status = field::Empty,
            duration_ms = field::Empty,
        );

        if self.propagate_parent
            && let Some(parent) = parent_context(req.headers())
            && let Err(source) = span.set_parent(parent)
        {
            warn!("failed to attach parent trace context: {source}");
        }

        span
    }
}

#[async_trait]
impl Handler for RequestLogger {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if UNLOGGED_PATHS.contains(&req.uri().path()) {
            ctrl.call_next(req, depot, res).await;
            return;
        }

        let started = Instant::now();
        let _in_flight = InFlight::start();

        let request_id = request_id(req.headers());
        let method = req.method().to_string();
        let route = route_label(req.uri().path());
        let span = self.request_span(req, &request_id, &route);

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        ctrl.call_next(req, depot, res).instrument(span.clone()).await;

        let elapsed = started.elapsed();
        let status = res.status_code.unwrap_or(StatusCode::OK);
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

        observe_request(&method, &route, status, elapsed);

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            if status.is_server_error() {
                error!(status = status.as_u16(), duration_ms, "request failed");
            } else if status.is_client_error() {
                warn!(status = status.as_u16(), duration_ms, "request rejected");
            } else {
                info!(status = status.as_u16(), duration_ms, "request completed");
            }

            if elapsed > self.slow_request_threshold {
                warn!(
                    duration_ms,
                    threshold_ms = u64::try_from(self.slow_request_threshold.as_millis())
                        .unwrap_or(u64::MAX),
                    "slow request"
                );
            }
        });
    }
}

/// The caller's request ID, or a fresh UUIDv7 when absent or blank.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or_else(|| Uuid::now_v7().to_string(), str::to_owned)
}

/// Path with identifiers replaced, for low-cardinality labels.
fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if segment.parse::<TrackingId>().is_ok() {
                "{tracking_id}"
            } else if Uuid::try_parse(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

fn parent_context(headers: &HeaderMap) -> Option<Context> {
    let context = global::get_text_map_propagator(|propagator| {
        propagator.extract_with_context(&Context::new(), &HeaderCarrier(headers))
    });

    context.span().span_context().is_valid().then_some(context)
}

struct HeaderCarrier<'a>(&'a HeaderMap);

impl Extractor for HeaderCarrier<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
