//! Shipping-rate aggregator client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use storefront::shipping::{Carrier, QuoteOption, QuoteRequest};
use tracing::debug;
use uuid::Uuid;

use crate::gateways::{GatewayError, errors::upstream_message};

const CALCULATE_PATH: &str = "/api/v2/me/shipment/calculate";

/// Configuration for the shipping-rate aggregator.
#[derive(Debug, Clone)]
pub struct ShippingGatewayConfig {
    /// Aggregator base URL, e.g. `"https://www.melhorenvio.com.br"`.
    pub api_url: String,

    /// Bearer token.
    pub token: String,

    /// Application name sent in the `User-Agent` header.
    pub app_name: String,
}

#[automock]
#[async_trait]
pub trait ShippingGateway: Send + Sync {
    /// Quote `request` across its carrier services. Options the aggregator
    /// could not price are returned with their error set.
    async fn quote(
        &self,
        request: &QuoteRequest<'static>,
        contact_email: Option<String>,
    ) -> Result<Vec<QuoteOption>, GatewayError>;
}

/// HTTP client for the aggregator's shipment calculator.
#[derive(Debug, Clone)]
pub struct HttpShippingGateway {
    config: ShippingGatewayConfig,
    http: Client,
}

impl HttpShippingGateway {
    #[must_use]
    pub fn new(config: ShippingGatewayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ShippingGateway for HttpShippingGateway {
    #[tracing::instrument(
        name = "shipping.gateway.quote",
        skip(self, request, contact_email),
        fields(parcel_count = request.parcels.len(), option_count = tracing::field::Empty),
        err
    )]
    async fn quote(
        &self,
        request: &QuoteRequest<'static>,
        contact_email: Option<String>,
    ) -> Result<Vec<QuoteOption>, GatewayError> {
        let url = format!("{}{CALCULATE_PATH}", self.config.api_url.trim_end_matches('/'));
        let user_agent = format!(
            "{} ({})",
            self.config.app_name,
            contact_email.as_deref().unwrap_or("contact@localhost")
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::USER_AGENT, user_agent)
            .json(&CalculateRequest::from_quote_request(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(upstream_message(status, &text)));
        }

        let options: Vec<OptionResponse> = response.json().await?;

        tracing::Span::current().record("option_count", options.len());
        debug!("received shipping options");

        Ok(options.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Serialize)]
struct CalculateRequest {
    from: Origin,
    to: Destination,
    products: Vec<ProductPayload>,
    services: String,
    options: CalculateOptions,
}

#[derive(Debug, Serialize)]
struct Origin {
    postal_code: String,
}

#[derive(Debug, Serialize)]
struct Destination {
    postal_code: String,
    address: String,
    number: String,
    neighborhood: String,
    city: String,
    state_abbr: String,
}

#[derive(Debug, Serialize)]
struct ProductPayload {
    id: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    width: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    height: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    length: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    weight: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    insurance_value: Decimal,
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct CalculateOptions {
    #[serde(with = "rust_decimal::serde::float")]
    insurance_value: Decimal,
    receipt: bool,
    own_hand: bool,
    collect: bool,
}

impl CalculateRequest {
    fn from_quote_request(request: &QuoteRequest<'_>) -> Self {
        let destination = &request.destination;
        let services: SmallVec<[String; 4]> =
            request.services.iter().map(ToString::to_string).collect();

        Self {
            from: Origin {
                postal_code: request.origin.as_str().to_owned(),
            },
            to: Destination {
                postal_code: destination.postal_code.as_str().to_owned(),
                address: destination.street.clone(),
                number: destination.number.clone(),
                neighborhood: destination.neighborhood.clone(),
                city: destination.city.clone(),
                state_abbr: destination.state.clone(),
            },
            products: request
                .parcels
                .iter()
                .map(|parcel| ProductPayload {
                    id: parcel.id,
                    width: parcel.width_cm,
                    height: parcel.height_cm,
                    length: parcel.length_cm,
                    weight: parcel.weight_kg,
                    insurance_value: to_decimal(&parcel.insurance_value),
                    quantity: parcel.quantity,
                })
                .collect(),
            services: services.join(","),
            options: CalculateOptions {
                insurance_value: to_decimal(&request.declared_value),
                receipt: false,
                own_hand: false,
                collect: false,
            },
        }
    }
}

fn to_decimal(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), money.currency().exponent)
}

#[derive(Debug, Deserialize)]
struct OptionResponse {
    id: u32,
    name: String,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    delivery_time: Option<u32>,
    #[serde(default)]
    company: Option<CompanyResponse>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompanyResponse {
    id: u32,
    name: String,
    #[serde(default)]
    picture: Option<String>,
}

impl From<OptionResponse> for QuoteOption {
    fn from(option: OptionResponse) -> Self {
        Self {
            id: option.id,
            name: option.name,
            price: option.price,
            delivery_time: option.delivery_time,
            company: option.company.map(|company| Carrier {
                id: company.id,
                name: company.name,
                picture: company.picture,
            }),
            error: option.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use storefront::{
        cart::{CartLine, aggregate},
        catalog::CatalogItem,
        settings::StoreSettings,
        shipping::{Address, PostalCode},
    };
    use testresult::TestResult;

    use super::*;

    fn request() -> TestResult<QuoteRequest<'static>> {
        let mut settings = StoreSettings::defaults(BRL);
        settings.origin_postal_code = Some("01310-100".to_owned());

        let lines = vec![CartLine::new(
            CatalogItem::new(Uuid::now_v7(), "Backpack", Money::from_minor(149_90, BRL)),
            None,
            2,
        )?];
        let summary = aggregate(&lines, &settings)?;

        Ok(QuoteRequest::build(
            &lines,
            Address {
                postal_code: PostalCode::parse("20040020")?,
                street: "Rua Primeiro de Março".to_owned(),
                number: "10".to_owned(),
                complement: None,
                neighborhood: "Centro".to_owned(),
                city: "Rio de Janeiro".to_owned(),
                state: "RJ".to_owned(),
            },
            vec![1, 2, 17],
            &settings,
            &summary,
        )?)
    }

    #[test]
    fn builds_the_calculator_payload() -> TestResult {
        let payload = serde_json::to_value(CalculateRequest::from_quote_request(&request()?))?;

        assert_eq!(payload["from"]["postal_code"], "01310100");
        assert_eq!(payload["to"]["state_abbr"], "RJ");
        assert_eq!(payload["services"], "1,2,17");
        assert_eq!(payload["options"]["insurance_value"], 299.8);
        assert_eq!(payload["products"][0]["insurance_value"], 149.9);
        assert_eq!(payload["products"][0]["weight"], 0.1);
        assert_eq!(payload["products"][0]["quantity"], 2);

        Ok(())
    }

    #[test]
    fn decodes_options_with_and_without_errors() -> TestResult {
        let body = r#"[
            {"id": 1, "name": "PAC", "price": "23.50", "delivery_time": 6,
             "company": {"id": 1, "name": "Correios", "picture": "https://cdn.example.com/correios.png"}},
            {"id": 3, "name": ".Package", "error": "Transportadora não atende este trecho."}
        ]"#;

        let options: Vec<QuoteOption> = serde_json::from_str::<Vec<OptionResponse>>(body)?
            .into_iter()
            .map(Into::into)
            .collect();

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].price.as_deref(), Some("23.50"));
        assert_eq!(options[0].company.as_ref().map(|c| c.name.as_str()), Some("Correios"));
        assert!(options[1].price.is_none());
        assert!(options[1].error.is_some());

        Ok(())
    }
}
