//! Update Shipping Service Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    shipping_services::{ShippingServiceResponse, errors::into_status_error},
    state::State,
};

/// Update Shipping Service Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateShippingServiceRequest {
    pub active: bool,
}

/// Update Shipping Service Handler
///
/// Turns quoting for a service on or off.
#[endpoint(
    tags("shipping-services"),
    summary = "Toggle Shipping Service",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Service updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Service not found"),
    ),
)]
pub(crate) async fn handler(
    service: PathParam<u32>,
    json: JsonBody<UpdateShippingServiceRequest>,
    depot: &mut Depot,
) -> Result<Json<ShippingServiceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let service = state
        .app
        .shipping_services
        .set_active(service.into_inner(), json.into_inner().active)
        .await
        .map_err(into_status_error)?;

    Ok(Json(service.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
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
            Router::with_path("shipping-services/{service}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_disable_service() -> TestResult {
        let mut services = MockShippingServicesService::new();

        services
            .expect_set_active()
            .once()
            .withf(|id, active| *id == 2 && !*active)
            .return_once(|_, _| Ok(make_record(2, false)));

        let body: ShippingServiceResponse =
            TestClient::put("http://example.com/shipping-services/2")
                .json(&json!({ "active": false }))
                .send(&make_service(services))
                .await
                .take_json()
                .await?;

        assert!(!body.active);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_service_returns_404() -> TestResult {
        let mut services = MockShippingServicesService::new();

        services
            .expect_set_active()
            .once()
            .return_once(|_, _| Err(ShippingServicesServiceError::NotFound));

        let res = TestClient::put("http://example.com/shipping-services/9")
            .json(&json!({ "active": true }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
