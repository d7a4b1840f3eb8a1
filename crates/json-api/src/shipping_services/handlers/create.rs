//! Create Shipping Service Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::shipping_services::data::NewShippingService;

use crate::{
    extensions::*,
    shipping_services::{ShippingServiceResponse, errors::into_status_error},
    state::State,
};

/// Create Shipping Service Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateShippingServiceRequest {
    /// Aggregator service identifier
    pub service_id: u32,
    pub name: String,

    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Create Shipping Service Handler
#[endpoint(
    tags("shipping-services"),
    summary = "Register Shipping Service",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Service registered"),
        (status_code = StatusCode::CONFLICT, description = "Service already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateShippingServiceRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ShippingServiceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    if request.service_id == 0 || request.name.trim().is_empty() {
        return Err(StatusError::bad_request().brief("Invalid shipping service payload"));
    }

    let service = state
        .app
        .shipping_services
        .create_service(NewShippingService {
            service_id: request.service_id,
            name: request.name.trim().to_string(),
            active: request.active,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(service.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use storefront_app::{
        auth::Principal,
        domain::shipping_services::{MockShippingServicesService, ShippingServicesServiceError},
    };
    use testresult::TestResult;

    use crate::{shipping_services::make_record, test_helpers::TestApp};

    use super::*;

    fn make_service(services: MockShippingServicesService) -> Service {
        TestApp::new().shipping_services(services).service_as(
            Principal::Admin,
            Router::with_path("shipping-services").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_defaults_to_active() -> TestResult {
        let mut services = MockShippingServicesService::new();

        services
            .expect_create_service()
            .once()
            .withf(|new| new.service_id == 3 && new.active)
            .return_once(|_| Ok(make_record(3, true)));

        let res = TestClient::post("http://example.com/shipping-services")
            .json(&json!({ "service_id": 3, "name": "SEDEX" }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_service_returns_409() -> TestResult {
        let mut services = MockShippingServicesService::new();

        services
            .expect_create_service()
            .once()
            .return_once(|_| Err(ShippingServicesServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/shipping-services")
            .json(&json!({ "service_id": 3, "name": "SEDEX" }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_service_id_is_rejected() -> TestResult {
        let mut services = MockShippingServicesService::new();

        services.expect_create_service().never();

        let res = TestClient::post("http://example.com/shipping-services")
            .json(&json!({ "service_id": 0, "name": "SEDEX" }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
