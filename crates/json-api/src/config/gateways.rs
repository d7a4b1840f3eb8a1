//! Upstream Gateway Config

use clap::Args;
use storefront_app::gateways::{
    mail::MailGatewayConfig, payments::PaymentsGatewayConfig, shipping::ShippingGatewayConfig,
};

use crate::config::store::StoreConfig;

/// Shipping aggregator settings.
#[derive(Debug, Args)]
pub struct ShippingConfig {
    /// Aggregator base URL
    #[arg(long, env = "SHIPPING_API_URL")]
    pub shipping_api_url: String,

    /// Aggregator bearer token
    #[arg(long, env = "SHIPPING_API_TOKEN", hide_env_values = true)]
    pub shipping_api_token: String,

    /// Application name sent to the aggregator
    #[arg(long, env = "SHIPPING_APP_NAME", default_value = "storefront")]
    pub shipping_app_name: String,
}

impl ShippingConfig {
    pub(crate) fn gateway_config(&self) -> ShippingGatewayConfig {
        ShippingGatewayConfig {
            api_url: self.shipping_api_url.clone(),
            token: self.shipping_api_token.clone(),
            app_name: self.shipping_app_name.clone(),
        }
    }
}

/// Payment processor settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Processor API base URL
    #[arg(long, env = "PAYMENTS_API_URL", default_value = "https://api.stripe.com")]
    pub payments_api_url: String,

    /// Processor secret key
    #[arg(long, env = "PAYMENTS_SECRET_KEY", hide_env_values = true)]
    pub payments_secret_key: String,

    /// Secret used to sign payment notifications
    #[arg(long, env = "PAYMENTS_WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: String,

    /// Maximum age of a signed notification, in seconds
    #[arg(long, env = "PAYMENTS_WEBHOOK_TOLERANCE_SECONDS", default_value_t = 300)]
    pub webhook_tolerance_seconds: i64,
}

impl PaymentsConfig {
    pub(crate) fn gateway_config(&self, store: &StoreConfig) -> PaymentsGatewayConfig {
        PaymentsGatewayConfig {
            api_url: self.payments_api_url.clone(),
            secret_key: self.payments_secret_key.clone(),
            success_url: store.checkout_success_url.clone(),
            cancel_url: store.checkout_cancel_url.clone(),
        }
    }
}

/// Transactional e-mail settings.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// Mail API base URL
    #[arg(long, env = "MAIL_API_URL", default_value = "https://api.resend.com")]
    pub mail_api_url: String,

    /// Mail API key
    #[arg(long, env = "MAIL_API_KEY", hide_env_values = true)]
    pub mail_api_key: String,

    /// Sender address
    #[arg(long, env = "MAIL_FROM")]
    pub mail_from: String,
}

impl MailConfig {
    pub(crate) fn gateway_config(&self) -> MailGatewayConfig {
        MailGatewayConfig {
            api_url: self.mail_api_url.clone(),
            api_key: self.mail_api_key.clone(),
            from: self.mail_from.clone(),
        }
    }
}
