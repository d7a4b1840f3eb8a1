//! Observability setup and request tracing middleware.

use thiserror::Error;

mod init;
mod metrics;
mod otel;
mod request;
mod settings;

pub(crate) use init::Observability;
pub(crate) use metrics::{
    CheckoutOutcome, PaymentNotification, metrics_handler, observe_checkout,
    observe_payment_notification,
};
pub(crate) use request::request_logging;

/// Errors raised while initialising observability.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),

    /// Failed to build the OTLP span exporter.
    #[error("failed to build OTLP span exporter: {0}")]
    OtlpExporter(#[from] opentelemetry_otlp::ExporterBuildError),
}
