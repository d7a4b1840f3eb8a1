//! Update Settings Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::settings::data::SettingsUpdate;

use crate::{
    extensions::*,
    settings::{SettingsResponse, errors::into_status_error},
    state::State,
};

/// Update Settings Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateSettingsRequest {
    pub store_name: String,
    pub contact_email: Option<String>,

    /// Eight digits, punctuation allowed
    pub origin_postal_code: Option<String>,

    #[serde(default)]
    pub global_discount_percent: f64,

    #[serde(default)]
    pub free_shipping_active: bool,

    /// Minor units
    #[serde(default)]
    pub free_shipping_threshold: u64,

    #[serde(default)]
    pub cashback_active: bool,

    #[serde(default)]
    pub cashback_percent: f64,

    #[serde(default)]
    pub pay_on_delivery: bool,
}

impl TryFrom<UpdateSettingsRequest> for SettingsUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateSettingsRequest) -> Result<Self, Self::Error> {
        let percent = |value: f64| Decimal::try_from(value).map(|value| value.round_dp(2)).or_400();

        Ok(Self {
            store_name: request.store_name.trim().to_string(),
            contact_email: request.contact_email.filter(|email| !email.trim().is_empty()),
            origin_postal_code: request
                .origin_postal_code
                .filter(|code| !code.trim().is_empty()),
            global_discount_percent: percent(request.global_discount_percent)?,
            free_shipping_active: request.free_shipping_active,
            free_shipping_threshold: request.free_shipping_threshold,
            cashback_active: request.cashback_active,
            cashback_percent: percent(request.cashback_percent)?,
            pay_on_delivery: request.pay_on_delivery,
        })
    }
}

/// Update Settings Handler
#[endpoint(
    tags("settings"),
    summary = "Update Store Settings",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Settings saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid percentage or postal code"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateSettingsRequest>,
    depot: &mut Depot,
) -> Result<Json<SettingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let update = SettingsUpdate::try_from(json.into_inner())?;

    if update.store_name.is_empty() {
        return Err(StatusError::bad_request().brief("Store name is required"));
    }

    let settings = state
        .app
        .settings
        .update_settings(update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(settings.into()))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use salvo::test::TestClient;
    use serde_json::json;
    use storefront::percent::PercentError;
    use storefront_app::{
        auth::Principal,
        domain::settings::{MockSettingsService, SettingsServiceError, records::SettingsRecord},
    };
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    fn make_service(settings: MockSettingsService) -> Service {
        TestApp::new()
            .settings(settings)
            .service_as(Principal::Admin, Router::with_path("settings").put(handler))
    }

    #[tokio::test]
    async fn test_update_settings_converts_percentages() -> TestResult {
        let mut settings = MockSettingsService::new();

        settings
            .expect_update_settings()
            .once()
            .withf(|update| {
                update.global_discount_percent == Decimal::new(125, 1)
                    && update.cashback_percent == Decimal::from(3)
                    && update.origin_postal_code.is_none()
            })
            .return_once(|_| Ok(SettingsRecord::defaults(BRL)));

        let res = TestClient::put("http://example.com/settings")
            .json(&json!({
                "store_name": "Loja",
                "origin_postal_code": "",
                "global_discount_percent": 12.5,
                "cashback_active": true,
                "cashback_percent": 3
            }))
            .send(&make_service(settings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_range_percent_returns_400() -> TestResult {
        let mut settings = MockSettingsService::new();

        settings.expect_update_settings().once().return_once(|update| {
            Err(SettingsServiceError::InvalidPercent(PercentError::OutOfRange(
                update.cashback_percent,
            )))
        });

        let res = TestClient::put("http://example.com/settings")
            .json(&json!({ "store_name": "Loja", "cashback_percent": 120 }))
            .send(&make_service(settings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
