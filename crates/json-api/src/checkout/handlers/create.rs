//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::checkout::{CheckoutForm, PaymentMethod};
use tracing::info;
use uuid::Uuid;

use storefront_app::domain::checkout::data::{CheckoutOutcome, CheckoutRequest};

use crate::{
    carts::quotes::ShippingQuotePayload,
    checkout::errors::into_status_error,
    extensions::*,
    observability::{self, observe_checkout},
    orders::OrderResponse,
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutPayload {
    pub cart_uuid: Uuid,
    pub full_name: String,
    pub email: String,
    pub document: String,
    pub phone: Option<String>,
    pub postal_code: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,

    /// Option picked from the cart's shipping quotes
    pub shipping: Option<ShippingQuotePayload>,

    /// `card` or `pay_on_delivery`
    pub payment_method: String,

    /// Cashback to spend, in minor units
    #[serde(default)]
    pub cashback: u64,
}

impl CheckoutPayload {
    fn form(&mut self) -> CheckoutForm {
        CheckoutForm {
            full_name: std::mem::take(&mut self.full_name),
            email: std::mem::take(&mut self.email),
            document: std::mem::take(&mut self.document),
            phone: self.phone.take().filter(|phone| !phone.trim().is_empty()),
            postal_code: std::mem::take(&mut self.postal_code),
            street: std::mem::take(&mut self.street),
            number: std::mem::take(&mut self.number),
            complement: self
                .complement
                .take()
                .filter(|complement| !complement.trim().is_empty()),
            neighborhood: std::mem::take(&mut self.neighborhood),
            city: std::mem::take(&mut self.city),
            state: std::mem::take(&mut self.state),
        }
    }
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    pub order: OrderResponse,

    /// `payment_pending` or `awaiting_delivery`
    pub status: String,

    /// Hosted payment page, for card payments
    pub redirect_url: Option<String>,
}

impl From<CheckoutOutcome> for CheckoutResponse {
    fn from(outcome: CheckoutOutcome) -> Self {
        match outcome {
            CheckoutOutcome::PaymentPending {
                order,
                redirect_url,
            } => Self {
                order: order.into(),
                status: "payment_pending".to_string(),
                redirect_url: Some(redirect_url),
            },
            CheckoutOutcome::AwaitingDelivery { order } => Self {
                order: order.into(),
                status: "awaiting_delivery".to_string(),
                redirect_url: None,
            },
        }
    }
}

/// Checkout Handler
///
/// Places an order for the cart. Card payments answer with the payment
/// processor's hosted page; the order is marked paid once the processor
/// notifies the store. Pay-on-delivery orders are final immediately.
#[endpoint(
    tags("checkout"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown payment method"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a customer token"),
        (status_code = StatusCode::CONFLICT, description = "Stock or cashback no longer available"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Checkout form rejected"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment processor or carrier unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutPayload>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let customer = depot.customer_or_403()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let mut payload = json.into_inner();

    let payment_method = payload.payment_method.parse::<PaymentMethod>().or_400()?;

    let shipping = payload
        .shipping
        .take()
        .map(|quote| quote.into_quote(state.currency))
        .transpose()?;

    let request = CheckoutRequest {
        cart: payload.cart_uuid.into(),
        customer,
        form: payload.form(),
        shipping,
        payment_method,
        cashback_requested: payload.cashback,
    };

    let outcome = match state.app.checkout.checkout(request).await {
        Ok(outcome) => outcome,
        Err(error) => {
            observe_checkout(observability::CheckoutOutcome::Failed);

            return Err(into_status_error(error));
        }
    };

    observe_checkout(match outcome {
        CheckoutOutcome::PaymentPending { .. } => observability::CheckoutOutcome::Card,
        CheckoutOutcome::AwaitingDelivery { .. } => observability::CheckoutOutcome::PayOnDelivery,
    });

    let order = outcome.order();

    info!(
        order_uuid = %order.uuid,
        customer_uuid = %order.customer_uuid,
        payment_method = payment_method.as_str(),
        final_total = order.final_total,
        "order placed"
    );

    res.status_code(StatusCode::CREATED);

    res.add_header(LOCATION, format!("/me/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?;

    Ok(Json(outcome.into()))
}
