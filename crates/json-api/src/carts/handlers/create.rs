//! Create Cart Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::ToSchema,
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::{data::NewCart, records::CartUuid};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Create Cart Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCartRequest {
    /// Generated when omitted
    pub uuid: Option<Uuid>,
}

/// Cart Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartCreatedResponse {
    /// Created cart UUID
    pub uuid: Uuid,
}

/// Create Cart Handler
///
/// The body is optional; an empty body creates a cart with a generated UUID.
#[endpoint(
    tags("carts"),
    summary = "Create Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let payload = req.payload().await.or_400()?;

    let request = if payload.is_empty() {
        CreateCartRequest::default()
    } else {
        serde_json::from_slice::<CreateCartRequest>(payload).or_400()?
    };

    let uuid = state
        .app
        .carts
        .create_cart(NewCart {
            uuid: request.uuid.map_or_else(CartUuid::new, Into::into),
        })
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/carts/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CartCreatedResponse {
        uuid: uuid.into_uuid(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::domain::carts::{MockCartsService, records::CartRecord};
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        TestApp::new()
            .carts(carts)
            .service(Router::with_path("carts").post(handler))
    }

    fn record(new: &NewCart) -> CartRecord {
        CartRecord {
            uuid: new.uuid,
            items: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_create_cart_with_client_uuid() -> TestResult {
        let uuid = CartUuid::new();
        let mut carts = MockCartsService::new();

        carts
            .expect_create_cart()
            .once()
            .withf(move |new| new.uuid == uuid)
            .return_once(|new| Ok(record(&new)));

        let mut res = TestClient::post("http://example.com/carts")
            .json(&json!({ "uuid": uuid.into_uuid() }))
            .send(&make_service(carts))
            .await;

        let body: CartCreatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_cart_without_body_generates_uuid() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_create_cart()
            .once()
            .return_once(|new| Ok(record(&new)));

        let res = TestClient::post("http://example.com/carts")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }
}
