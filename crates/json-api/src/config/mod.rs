//! Server configuration module

use clap::Parser;
use storefront_app::{context::AppConfig, domain::webhooks::WebhookConfig};
use thiserror::Error;

use crate::config::{
    db::DatabaseConfig,
    gateways::{MailConfig, PaymentsConfig, ShippingConfig},
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    store::StoreConfig,
};

pub(crate) mod db;
pub(crate) mod gateways;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod store;

/// Errors raised while turning configuration into application settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The store currency is not an ISO 4217 code.
    #[error("unknown store currency: {0}")]
    UnknownCurrency(String),
}

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Trace export and request logging thresholds.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Store currency and checkout redirects.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Shipping aggregator settings.
    #[command(flatten)]
    pub shipping: ShippingConfig,

    /// Payment processor settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Transactional e-mail settings.
    #[command(flatten)]
    pub mail: MailConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings the application services are built from.
    ///
    /// # Errors
    ///
    /// Returns an error when the store currency is unknown.
    pub fn app_config(&self) -> Result<AppConfig, ConfigError> {
        Ok(AppConfig {
            database_url: self.database.database_url.clone(),
            currency: self.store.currency()?,
            run_migrations: self.database.run_migrations,
            shipping: self.shipping.gateway_config(),
            payments: self.payments.gateway_config(&self.store),
            webhook: WebhookConfig {
                secret: self.payments.webhook_secret.clone(),
                tolerance_seconds: self.payments.webhook_tolerance_seconds,
            },
            mail: self.mail.gateway_config(),
        })
    }
}
