//! Payment processor client.
//!
//! Speaks the hosted Checkout Sessions API: form-encoded requests
//! authenticated with the secret key, JSON responses.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::gateways::{GatewayError, errors::upstream_message};

const SESSIONS_PATH: &str = "/v1/checkout/sessions";

/// Placeholder the processor replaces with the session id on redirect.
const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Configuration for the payment processor.
#[derive(Debug, Clone)]
pub struct PaymentsGatewayConfig {
    /// Processor API base URL, e.g. `"https://api.stripe.com"`.
    pub api_url: String,

    /// Secret API key.
    pub secret_key: String,

    /// Where the shopper lands after paying.
    pub success_url: String,

    /// Where the shopper lands after abandoning the payment page.
    pub cancel_url: String,
}

/// One line on the hosted payment page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentLineItem {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,

    /// Unit price in minor units
    pub unit_amount: u64,
    pub quantity: u32,
}

/// Request for a hosted payment page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSessionRequest {
    /// Order identifier echoed back in webhook metadata
    pub order_id: String,

    /// Customer identifier echoed back in webhook metadata
    pub customer_id: String,
    pub customer_email: String,

    /// Lowercase ISO currency code
    pub currency: String,
    pub line_items: Vec<PaymentLineItem>,
}

/// A created payment page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentSession {
    pub id: String,
    pub url: String,
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a hosted payment page for an order.
    async fn create_session(
        &self,
        request: &PaymentSessionRequest,
    ) -> Result<PaymentSession, GatewayError>;
}

/// HTTP client for the processor's Checkout Sessions endpoint.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    config: PaymentsGatewayConfig,
    http: Client,
}

impl HttpPaymentGateway {
    #[must_use]
    pub fn new(config: PaymentsGatewayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    #[tracing::instrument(
        name = "payments.gateway.create_session",
        skip(self, request),
        fields(order_id = %request.order_id),
        err
    )]
    async fn create_session(
        &self,
        request: &PaymentSessionRequest,
    ) -> Result<PaymentSession, GatewayError> {
        let url = format!("{}{SESSIONS_PATH}", self.config.api_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .form(&session_form(request, &self.config))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(upstream_message(status, &text)));
        }

        let session: PaymentSession = response.json().await?;

        info!(session_id = %session.id, "payment session created");

        Ok(session)
    }
}

/// Flatten a session request into the processor's bracketed form fields.
fn session_form(
    request: &PaymentSessionRequest,
    config: &PaymentsGatewayConfig,
) -> Vec<(String, String)> {
    let mut form = vec![
        ("mode".to_owned(), "payment".to_owned()),
        ("payment_method_types[0]".to_owned(), "card".to_owned()),
        ("customer_email".to_owned(), request.customer_email.clone()),
        ("metadata[order_id]".to_owned(), request.order_id.clone()),
        ("metadata[customer_id]".to_owned(), request.customer_id.clone()),
        (
            "success_url".to_owned(),
            format!("{}?session_id={SESSION_ID_PLACEHOLDER}", config.success_url),
        ),
        ("cancel_url".to_owned(), config.cancel_url.clone()),
    ];

    for (index, item) in request.line_items.iter().enumerate() {
        let prefix = format!("line_items[{index}]");

        form.push((
            format!("{prefix}[price_data][currency]"),
            request.currency.clone(),
        ));
        form.push((
            format!("{prefix}[price_data][product_data][name]"),
            item.name.clone(),
        ));

        if let Some(description) = &item.description {
            form.push((
                format!("{prefix}[price_data][product_data][description]"),
                description.clone(),
            ));
        }

        if let Some(image_url) = &item.image_url {
            form.push((
                format!("{prefix}[price_data][product_data][images][0]"),
                image_url.clone(),
            ));
        }

        form.push((
            format!("{prefix}[price_data][unit_amount]"),
            item.unit_amount.to_string(),
        ));
        form.push((format!("{prefix}[quantity]"), item.quantity.to_string()));
    }

    form
}
