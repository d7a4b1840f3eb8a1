//! Prometheus metrics collection and exposition endpoint.
//!
//! Besides the per-route HTTP series, the registry carries two storefront
//! counters: checkout submissions by outcome and payment notifications by
//! what they did to the order.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const NAMESPACE: &str = "storefront_json";

const LATENCY_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct StoreMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    checkouts_total: IntCounterVec,
    payment_notifications_total: IntCounterVec,
}

static STORE_METRICS: OnceLock<Option<StoreMetrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let tracked = metrics().is_some_and(|metrics| {
            metrics.requests_in_flight.inc();
            true
        });

        Self { tracked }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// How a checkout submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CheckoutOutcome {
    Card,
    PayOnDelivery,
    Failed,
}

impl CheckoutOutcome {
    const fn label(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::PayOnDelivery => "pay_on_delivery",
            Self::Failed => "failed",
        }
    }
}

pub(crate) fn observe_checkout(outcome: CheckoutOutcome) {
    if let Some(metrics) = metrics() {
        metrics
            .checkouts_total
            .with_label_values(&[outcome.label()])
            .inc();
    }
}

/// What a payment notification did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PaymentNotification {
    Paid,
    Ignored,
    Rejected,
}

impl PaymentNotification {
    const fn label(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Ignored => "ignored",
            Self::Rejected => "rejected",
        }
    }
}

pub(crate) fn observe_payment_notification(notification: PaymentNotification) {
    if let Some(metrics) = metrics() {
        metrics
            .payment_notifications_total
            .with_label_values(&[notification.label()])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(String::from_utf8_lossy(&encoded).into_owned());
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn metrics() -> Option<&'static StoreMetrics> {
    STORE_METRICS
        .get_or_init(|| match StoreMetrics::build() {
            Ok(metrics) => Some(metrics),
            Err(source) => {
                error!("failed to build metrics registry, metrics disabled: {source}");
                None
            }
        })
        .as_ref()
}

impl StoreMetrics {
    fn build() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let requests_total = register(
            &registry,
            IntCounterVec::new(
                opts(
                    "http_requests_total",
                    "Total HTTP requests partitioned by method, route, status class, and status code.",
                ),
                &["method", "route", "status_class", "status_code"],
            )?,
        )?;

        let request_duration_seconds = register(
            &registry,
            HistogramVec::new(
                HistogramOpts::new(
                    "http_request_duration_seconds",
                    "HTTP request duration in seconds partitioned by method and route.",
                )
                .namespace(NAMESPACE)
                .buckets(LATENCY_BUCKETS.to_vec()),
                &["method", "route"],
            )?,
        )?;

        let requests_in_flight = register(
            &registry,
            IntGauge::with_opts(opts(
                "http_requests_in_flight",
                "Current number of in-flight HTTP requests.",
            ))?,
        )?;

        let checkouts_total = register(
            &registry,
            IntCounterVec::new(
                opts(
                    "checkout_outcomes_total",
                    "Checkout submissions partitioned by outcome.",
                ),
                &["outcome"],
            )?,
        )?;

        let payment_notifications_total = register(
            &registry,
            IntCounterVec::new(
                opts(
                    "payment_notifications_total",
                    "Payment processor notifications partitioned by result.",
                ),
                &["result"],
            )?,
        )?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            requests_in_flight,
            checkouts_total,
            payment_notifications_total,
        })
    }
}

fn opts(name: &str, help: &str) -> Opts {
    Opts::new(name, help).namespace(NAMESPACE)
}

fn register<C>(registry: &Registry, collector: C) -> prometheus::Result<C>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;

    Ok(collector)
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
