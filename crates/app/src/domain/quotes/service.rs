//! Quotes service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    cart::CartSummary,
    shipping::{Address, QuoteError, QuoteRequest, ShippingQuote, assemble_quotes},
};
use tracing::debug;

use crate::{
    domain::{
        carts::{CartsService, PricedCart, records::CartUuid},
        quotes::QuotesServiceError,
        shipping_services::ShippingServicesService,
    },
    gateways::shipping::ShippingGateway,
};

/// Shipping options for a cart.
#[derive(Debug, Clone)]
pub struct CartQuotes {
    pub summary: CartSummary<'static>,
    pub quotes: Vec<ShippingQuote<'static>>,
}

/// Quote `priced` to `destination` across the active carrier services.
///
/// The aggregator is only called when at least one service is active; a cart
/// that qualifies for free shipping still gets the free option without it.
pub(crate) async fn quote_options(
    priced: &PricedCart,
    destination: Address,
    services: &dyn ShippingServicesService,
    gateway: &dyn ShippingGateway,
) -> Result<Vec<ShippingQuote<'static>>, QuotesServiceError> {
    if priced.is_empty() {
        return Err(QuoteError::EmptyCart.into());
    }

    let service_ids: Vec<u32> = services
        .list_services(true)
        .await?
        .into_iter()
        .map(|service| service.service_id)
        .collect();

    let options = if service_ids.is_empty() {
        debug!("no active shipping services; skipping aggregator");
        Vec::new()
    } else {
        let request = QuoteRequest::build(
            &priced.lines,
            destination,
            service_ids,
            &priced.settings,
            &priced.summary,
        )?;

        gateway
            .quote(&request, priced.settings.contact_email.clone())
            .await?
    };

    Ok(assemble_quotes(options, &priced.summary)?)
}

#[derive(Clone)]
pub struct GatewayQuotesService {
    carts: Arc<dyn CartsService>,
    services: Arc<dyn ShippingServicesService>,
    gateway: Arc<dyn ShippingGateway>,
}

impl GatewayQuotesService {
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsService>,
        services: Arc<dyn ShippingServicesService>,
        gateway: Arc<dyn ShippingGateway>,
    ) -> Self {
        Self {
            carts,
            services,
            gateway,
        }
    }
}

#[async_trait]
impl QuotesService for GatewayQuotesService {
    #[tracing::instrument(
        name = "quotes.service.quote_cart",
        skip(self, destination),
        fields(cart_uuid = %cart, quote_count = tracing::field::Empty),
        err
    )]
    async fn quote_cart(
        &self,
        cart: CartUuid,
        destination: Address,
    ) -> Result<CartQuotes, QuotesServiceError> {
        let priced = self.carts.price_cart(cart).await?;

        let quotes = quote_options(
            &priced,
            destination,
            self.services.as_ref(),
            self.gateway.as_ref(),
        )
        .await?;

        tracing::Span::current().record("quote_count", quotes.len());

        Ok(CartQuotes {
            summary: priced.summary,
            quotes,
        })
    }
}

#[automock]
#[async_trait]
pub trait QuotesService: Send + Sync {
    /// Shipping options for delivering `cart` to `destination`.
    async fn quote_cart(
        &self,
        cart: CartUuid,
        destination: Address,
    ) -> Result<CartQuotes, QuotesServiceError>;
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::BRL};
    use storefront::shipping::{Carrier, QuoteOption};
    use testresult::TestResult;

    use crate::{
        domain::{carts::MockCartsService, shipping_services::MockShippingServicesService},
        gateways::{GatewayError, shipping::MockShippingGateway},
        test::{destination, priced_cart, settings, shipping_service},
    };

    use super::*;

    fn service(
        priced: PricedCart,
        services: MockShippingServicesService,
        gateway: MockShippingGateway,
    ) -> GatewayQuotesService {
        let mut carts = MockCartsService::new();

        carts
            .expect_price_cart()
            .once()
            .return_once(move |_| Ok(priced));

        GatewayQuotesService::new(Arc::new(carts), Arc::new(services), Arc::new(gateway))
    }

    #[tokio::test]
    async fn quotes_active_services_through_the_gateway() -> TestResult {
        let priced = priced_cart(100_00, 1, settings())?;
        let cart = priced.cart.uuid;

        let mut services = MockShippingServicesService::new();
        services
            .expect_list_services()
            .once()
            .withf(|active_only| *active_only)
            .returning(|_| Ok(vec![shipping_service(1), shipping_service(2)]));

        let mut gateway = MockShippingGateway::new();
        gateway
            .expect_quote()
            .once()
            .withf(|request, _| request.services == [1, 2] && request.parcels.len() == 1)
            .returning(|_, _| {
                Ok(vec![
                    QuoteOption {
                        id: 1,
                        name: "PAC".to_owned(),
                        price: Some("18.50".to_owned()),
                        delivery_time: Some(6),
                        company: Some(Carrier {
                            id: 1,
                            name: "Correios".to_owned(),
                            picture: None,
                        }),
                        error: None,
                    },
                    QuoteOption {
                        id: 2,
                        name: "SEDEX".to_owned(),
                        price: None,
                        delivery_time: None,
                        company: None,
                        error: Some("Unavailable".to_owned()),
                    },
                ])
            });

        let quotes = service(priced, services, gateway)
            .quote_cart(cart, destination()?)
            .await?;

        assert_eq!(quotes.quotes.len(), 1);
        assert_eq!(
            quotes.quotes.first().map(|quote| quote.price),
            Some(Money::from_minor(18_50, BRL))
        );

        Ok(())
    }

    #[tokio::test]
    async fn free_shipping_without_active_services_skips_the_gateway() -> TestResult {
        let mut settings = settings();
        settings.free_shipping.active = true;

        let priced = priced_cart(100_00, 3, settings)?;
        let cart = priced.cart.uuid;

        let mut services = MockShippingServicesService::new();
        services.expect_list_services().once().returning(|_| Ok(Vec::new()));

        let mut gateway = MockShippingGateway::new();
        gateway.expect_quote().never();

        let quotes = service(priced, services, gateway)
            .quote_cart(cart, destination()?)
            .await?;

        assert_eq!(quotes.quotes.len(), 1);
        assert!(quotes.quotes.iter().all(ShippingQuote::is_free_shipping));

        Ok(())
    }

    #[tokio::test]
    async fn no_services_and_no_free_shipping_means_no_options() -> TestResult {
        let priced = priced_cart(100_00, 1, settings())?;
        let cart = priced.cart.uuid;

        let mut services = MockShippingServicesService::new();
        services.expect_list_services().once().returning(|_| Ok(Vec::new()));

        let mut gateway = MockShippingGateway::new();
        gateway.expect_quote().never();

        let result = service(priced, services, gateway)
            .quote_cart(cart, destination()?)
            .await;

        assert!(matches!(
            result,
            Err(QuotesServiceError::Quote(QuoteError::NoOptions))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn upstream_errors_surface() -> TestResult {
        let priced = priced_cart(100_00, 1, settings())?;
        let cart = priced.cart.uuid;

        let mut services = MockShippingServicesService::new();
        services
            .expect_list_services()
            .once()
            .returning(|_| Ok(vec![shipping_service(1)]));

        let mut gateway = MockShippingGateway::new();
        gateway.expect_quote().once().returning(|_, _| {
            Err(GatewayError::UnexpectedResponse("Unauthenticated.".to_owned()))
        });

        let result = service(priced, services, gateway)
            .quote_cart(cart, destination()?)
            .await;

        assert!(matches!(
            result,
            Err(QuotesServiceError::Gateway(GatewayError::UnexpectedResponse(message))) if message == "Unauthenticated."
        ));

        Ok(())
    }
}
