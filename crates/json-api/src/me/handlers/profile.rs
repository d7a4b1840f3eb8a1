//! Profile Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::customers::records::CustomerRecord;

use crate::{extensions::*, me::errors::into_status_error, state::State};

/// Customer Profile
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub uuid: Uuid,
    pub full_name: String,
    pub email: String,

    /// Spendable cashback, minor units
    pub cashback_balance: u64,
    pub created_at: String,
}

impl From<CustomerRecord> for ProfileResponse {
    fn from(customer: CustomerRecord) -> Self {
        Self {
            uuid: customer.uuid.into_uuid(),
            full_name: customer.full_name,
            email: customer.email,
            cashback_balance: customer.cashback_balance,
            created_at: customer.created_at.to_string(),
        }
    }
}

/// Profile Handler
#[endpoint(
    tags("me"),
    summary = "Current Customer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a customer token"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let customer = depot.customer_or_403()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let profile = state
        .app
        .customers
        .get_profile(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::{
        auth::Principal,
        domain::customers::{MockCustomersService, records::CustomerUuid},
    };
    use testresult::TestResult;

    use crate::test_helpers::{TestApp, make_customer};

    use super::*;

    #[tokio::test]
    async fn test_profile_shows_cashback_balance() -> TestResult {
        let uuid = CustomerUuid::new();
        let mut customers = MockCustomersService::new();

        customers
            .expect_get_profile()
            .once()
            .withf(move |customer| *customer == uuid)
            .return_once(move |_| Ok(make_customer(uuid, 42_50)));

        let service = TestApp::new()
            .customers(customers)
            .service_as(Principal::Customer(uuid), Router::with_path("me").get(handler));

        let body: ProfileResponse = TestClient::get("http://example.com/me")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.cashback_balance, 42_50);

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_has_no_profile() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers.expect_get_profile().never();

        let service = TestApp::new()
            .customers(customers)
            .service_as(Principal::Admin, Router::with_path("me").get(handler));

        let res = TestClient::get("http://example.com/me").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
