//! Storefront JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Server build version
    pub version: String,

    /// ISO code every amount is expressed in
    pub currency: String,
}

/// Healthcheck handler
///
/// Liveness only; the database is not queried.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        currency: state.currency.iso_alpha_code.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    #[tokio::test]
    async fn test_healthcheck_reports_store_currency() -> TestResult {
        let service = TestApp::new().service(Router::with_path("healthcheck").get(handler));

        let response: HealthResponse = TestClient::get("http://example.com/healthcheck")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.status, "ok");
        assert_eq!(response.currency, "BRL");

        Ok(())
    }
}
