//! Cart Shipping Quotes Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::shipping::{Address, Carrier, PostalCode, ShippingQuote};
use uuid::Uuid;

use crate::{
    amounts::{from_minor_units, minor_units},
    carts::{CartSummaryResponse, errors::quote_status_error},
    extensions::*,
    state::State,
};

/// Shipping Quote Request
///
/// Only the postal code is needed to quote; the rest of the address is
/// accepted so clients can send the form as typed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingQuoteRequest {
    pub postal_code: String,

    #[serde(default)]
    pub street: String,

    #[serde(default)]
    pub number: String,
    pub complement: Option<String>,

    #[serde(default)]
    pub neighborhood: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state: String,
}

impl TryFrom<ShippingQuoteRequest> for Address {
    type Error = StatusError;

    fn try_from(request: ShippingQuoteRequest) -> Result<Self, Self::Error> {
        let postal_code = PostalCode::parse(&request.postal_code)
            .map_err(|error| StatusError::unprocessable_entity().brief(error.to_string()))?;

        Ok(Address {
            postal_code,
            street: request.street,
            number: request.number,
            complement: request.complement,
            neighborhood: request.neighborhood,
            city: request.city,
            state: request.state,
        })
    }
}

/// Carrier
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CarrierPayload {
    pub id: u32,
    pub name: String,
    pub picture: Option<String>,
}

/// Shipping option, as quoted and as submitted back at checkout
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingQuotePayload {
    /// Carrier service identifier; `0` is free shipping
    pub id: u32,
    pub name: String,

    /// Minor units
    pub price: u64,
    pub delivery_days: u32,
    pub company: CarrierPayload,
}

impl ShippingQuotePayload {
    pub(crate) fn from_quote(quote: &ShippingQuote<'_>) -> Result<Self, StatusError> {
        Ok(Self {
            id: quote.id,
            name: quote.name.clone(),
            price: minor_units(&quote.price)?,
            delivery_days: quote.delivery_days,
            company: CarrierPayload {
                id: quote.company.id,
                name: quote.company.name.clone(),
                picture: quote.company.picture.clone(),
            },
        })
    }

    pub(crate) fn into_quote(
        self,
        currency: &'static rusty_money::iso::Currency,
    ) -> Result<ShippingQuote<'static>, StatusError> {
        Ok(ShippingQuote {
            id: self.id,
            name: self.name,
            price: from_minor_units(self.price, currency)?,
            delivery_days: self.delivery_days,
            company: Carrier {
                id: self.company.id,
                name: self.company.name,
                picture: self.company.picture,
            },
        })
    }
}

/// Shipping Quotes Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingQuotesResponse {
    pub summary: CartSummaryResponse,

    /// Cheapest first, free shipping leading when eligible
    pub quotes: Vec<ShippingQuotePayload>,
}

/// Cart Shipping Quotes Handler
///
/// Quotes every active shipping service for the cart's current contents.
#[endpoint(
    tags("carts"),
    summary = "Quote Shipping",
    responses(
        (status_code = StatusCode::OK, description = "Shipping options"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid postal code, empty cart or no options"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Shipping aggregator error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<ShippingQuoteRequest>,
    depot: &mut Depot,
) -> Result<Json<ShippingQuotesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let destination = Address::try_from(json.into_inner())?;

    let quoted = state
        .app
        .quotes
        .quote_cart(cart.into_inner().into(), destination)
        .await
        .map_err(quote_status_error)?;

    Ok(Json(ShippingQuotesResponse {
        summary: CartSummaryResponse::try_from(&quoted.summary)?,
        quotes: quoted
            .quotes
            .iter()
            .map(ShippingQuotePayload::from_quote)
            .collect::<Result<_, _>>()?,
    }))
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::BRL};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::{
        domain::{
            carts::records::CartUuid,
            products::records::ProductUuid,
            quotes::{CartQuotes, MockQuotesService, QuotesServiceError},
        },
        gateways::GatewayError,
    };
    use testresult::TestResult;

    use crate::{
        carts::handlers::tests::make_priced_cart,
        test_helpers::{TestApp, make_product},
    };

    use super::*;

    fn make_service(quotes: MockQuotesService) -> Service {
        TestApp::new()
            .quotes(quotes)
            .service(Router::with_path("carts/{cart}/shipping-quotes").post(handler))
    }

    #[tokio::test]
    async fn test_quotes_are_returned_in_minor_units() -> TestResult {
        let uuid = CartUuid::new();
        let priced = make_priced_cart(uuid, &[make_product(ProductUuid::new(), 80_00)], 1)?;

        let mut quotes = MockQuotesService::new();

        quotes
            .expect_quote_cart()
            .once()
            .withf(move |cart, destination| {
                *cart == uuid && destination.postal_code.as_str() == "20040020"
            })
            .return_once(move |_, _| {
                Ok(CartQuotes {
                    summary: priced.summary,
                    quotes: vec![ShippingQuote {
                        id: 1,
                        name: "PAC".to_string(),
                        price: Money::from_minor(21_50, BRL),
                        delivery_days: 6,
                        company: Carrier {
                            id: 1,
                            name: "Correios".to_string(),
                            picture: None,
                        },
                    }],
                })
            });

        let body: ShippingQuotesResponse =
            TestClient::post(format!("http://example.com/carts/{uuid}/shipping-quotes"))
                .json(&json!({ "postal_code": "20040-020" }))
                .send(&make_service(quotes))
                .await
                .take_json()
                .await?;

        assert_eq!(body.summary.subtotal, 80_00);

        let quote = body.quotes.first().ok_or("expected a quote")?;

        assert_eq!(quote.price, 21_50);
        assert_eq!(quote.company.name, "Correios");

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_postal_code_is_rejected_before_quoting() -> TestResult {
        let mut quotes = MockQuotesService::new();

        quotes.expect_quote_cart().never();

        let res = TestClient::post(format!(
            "http://example.com/carts/{}/shipping-quotes",
            Uuid::now_v7()
        ))
        .json(&json!({ "postal_code": "2004" }))
        .send(&make_service(quotes))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_aggregator_failure_returns_502() -> TestResult {
        let mut quotes = MockQuotesService::new();

        quotes.expect_quote_cart().once().return_once(|_, _| {
            Err(QuotesServiceError::Gateway(GatewayError::UnexpectedResponse(
                "service unavailable".to_string(),
            )))
        });

        let res = TestClient::post(format!(
            "http://example.com/carts/{}/shipping-quotes",
            Uuid::now_v7()
        ))
        .json(&json!({ "postal_code": "20040020" }))
        .send(&make_service(quotes))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }
}
