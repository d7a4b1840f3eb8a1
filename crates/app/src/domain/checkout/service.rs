//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rusty_money::Money;
use storefront::{
    checkout::{
        CheckoutEvent, CheckoutField, CheckoutFlowError, CheckoutState, CheckoutValidationError,
        PaymentMethod, totalize,
    },
    shipping::{Address, ShippingQuote},
};
use tracing::{info, warn};

use crate::{
    domain::{
        carts::{CartsService, PricedCart},
        checkout::{
            CheckoutServiceError,
            data::{CheckoutOutcome, CheckoutRequest, payment_request},
        },
        customers::CustomersService,
        notifications::NotificationsService,
        orders::{
            OrdersService,
            data::{CheckoutSnapshot, NewOrder},
            records::OrderUuid,
        },
        quotes::quote_options,
        shipping_services::ShippingServicesService,
    },
    gateways::{payments::PaymentGateway, shipping::ShippingGateway},
};

/// Collaborators of [`StoreCheckoutService`].
#[derive(Clone)]
pub struct CheckoutDependencies {
    pub carts: Arc<dyn CartsService>,
    pub customers: Arc<dyn CustomersService>,
    pub orders: Arc<dyn OrdersService>,
    pub shipping_services: Arc<dyn ShippingServicesService>,
    pub shipping: Arc<dyn ShippingGateway>,
    pub payments: Arc<dyn PaymentGateway>,
    pub notifications: Arc<dyn NotificationsService>,
}

#[derive(Clone)]
pub struct StoreCheckoutService {
    deps: CheckoutDependencies,
}

impl StoreCheckoutService {
    #[must_use]
    pub fn new(deps: CheckoutDependencies) -> Self {
        Self { deps }
    }

    /// Re-price the shopper's chosen option. The free option needs the cart
    /// to qualify; any other must still be offered for `destination`.
    async fn confirm_quote(
        &self,
        priced: &PricedCart,
        chosen: &ShippingQuote<'static>,
        destination: Address,
    ) -> Result<ShippingQuote<'static>, CheckoutServiceError> {
        if chosen.is_free_shipping() {
            if !priced.summary.free_shipping_eligible {
                return Err(CheckoutServiceError::FreeShippingNotEligible);
            }

            return Ok(ShippingQuote::free_shipping(priced.settings.currency()));
        }

        quote_options(
            priced,
            destination,
            self.deps.shipping_services.as_ref(),
            self.deps.shipping.as_ref(),
        )
        .await?
        .into_iter()
        .find(|quote| quote.id == chosen.id)
        .ok_or(CheckoutServiceError::ShippingUnavailable(chosen.id))
    }
}

#[async_trait]
impl CheckoutService for StoreCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self, request),
        fields(
            cart_uuid = %request.cart,
            customer_uuid = %request.customer,
            payment_method = request.payment_method.as_str(),
            order_uuid = tracing::field::Empty,
        ),
        err
    )]
    async fn checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutOutcome, CheckoutServiceError> {
        let CheckoutRequest {
            cart,
            customer: customer_uuid,
            form,
            shipping,
            payment_method,
            cashback_requested,
        } = request;

        let customer = form.validate(shipping.as_ref())?;
        let chosen = shipping.ok_or(CheckoutValidationError::Missing(CheckoutField::Shipping))?;
        let state = CheckoutState::Draft.apply(CheckoutEvent::Completed)?;

        let priced = self.deps.carts.price_cart(cart).await?;

        if priced.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        if payment_method == PaymentMethod::PayOnDelivery && !priced.settings.pay_on_delivery {
            return Err(CheckoutServiceError::PayOnDeliveryDisabled);
        }

        let quote = self
            .confirm_quote(&priced, &chosen, customer.address.clone())
            .await?;

        let profile = self.deps.customers.get_profile(customer_uuid).await?;
        let currency = priced.settings.currency();

        let totals = totalize(
            priced.summary.subtotal,
            Some(&quote),
            Money::from_minor(i64::try_from(cashback_requested)?, currency),
            Money::from_minor(i64::try_from(profile.cashback_balance)?, currency),
        )?;

        if payment_method == PaymentMethod::Card && totals.final_total.to_minor_units() == 0 {
            return Err(CheckoutServiceError::NothingToCharge);
        }

        let new_order = NewOrder::from_checkout(
            OrderUuid::new(),
            customer_uuid,
            Some(cart),
            customer,
            CheckoutSnapshot {
                quote: &quote,
                totals: &totals,
                payment_method,
                lines: &priced.lines,
                settings: &priced.settings,
            },
        )?;

        let order = self.deps.orders.create_order(new_order).await?;

        tracing::Span::current().record("order_uuid", tracing::field::display(order.uuid));
        info!(final_total = order.final_total, "order created");

        let event = CheckoutEvent::Submitted(payment_method);

        let outcome = match state.apply(event)? {
            CheckoutState::PaymentPending => {
                let session = self
                    .deps
                    .payments
                    .create_session(&payment_request(&order, currency.iso_alpha_code))
                    .await
                    .map_err(|error| {
                        warn!(%error, "payment session creation failed; order left processing");

                        CheckoutServiceError::Payment(error)
                    })?;

                self.deps
                    .orders
                    .set_payment_session(order.uuid, session.id)
                    .await?;

                CheckoutOutcome::PaymentPending {
                    order,
                    redirect_url: session.url,
                }
            }
            CheckoutState::AwaitingDelivery => {
                if let Err(error) = self.deps.carts.clear_cart(cart).await {
                    warn!(%error, "failed to clear cart after pay-on-delivery order");
                }

                CheckoutOutcome::AwaitingDelivery { order }
            }
            state => return Err(CheckoutFlowError { state, event }.into()),
        };

        if let Err(error) = self
            .deps
            .notifications
            .order_placed(outcome.order(), &priced.settings)
            .await
        {
            warn!(%error, "order confirmation e-mail not sent");
        }

        Ok(outcome)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Place an order for the cart in `request`.
    async fn checkout(&self, request: CheckoutRequest)
    -> Result<CheckoutOutcome, CheckoutServiceError>;
}
