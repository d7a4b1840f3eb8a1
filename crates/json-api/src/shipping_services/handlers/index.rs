//! Shipping Service Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    shipping_services::{ShippingServiceResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingServicesResponse {
    pub services: Vec<ShippingServiceResponse>,
}

/// Shipping Service Index Handler
///
/// Lists every registered service, active or not.
#[endpoint(
    tags("shipping-services"),
    summary = "List Shipping Services",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ShippingServicesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let services = state
        .app
        .shipping_services
        .list_services(false)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ShippingServicesResponse {
        services: services.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::{
        auth::Principal, domain::shipping_services::MockShippingServicesService,
    };
    use testresult::TestResult;

    use crate::{shipping_services::make_record, test_helpers::TestApp};

    use super::*;

    #[tokio::test]
    async fn test_index_includes_inactive_services() -> TestResult {
        let mut services = MockShippingServicesService::new();

        services
            .expect_list_services()
            .once()
            .withf(|active_only| !*active_only)
            .return_once(|_| Ok(vec![make_record(1, true), make_record(2, false)]));

        let service = TestApp::new().shipping_services(services).service_as(
            Principal::Admin,
            Router::with_path("shipping-services").get(handler),
        );

        let body: ShippingServicesResponse =
            TestClient::get("http://example.com/shipping-services")
                .send(&service)
                .await
                .take_json()
                .await?;

        assert_eq!(body.services.len(), 2);
        assert_eq!(body.services.iter().filter(|service| service.active).count(), 1);

        Ok(())
    }
}
