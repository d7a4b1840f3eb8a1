//! Delete Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Delete Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Delete Cart",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .carts
        .delete_cart(cart.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use storefront_app::domain::carts::{CartsServiceError, MockCartsService};
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        TestApp::new()
            .carts(carts)
            .service(Router::with_path("carts/{cart}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_cart_returns_204() -> TestResult {
        let uuid = Uuid::now_v7();
        let mut carts = MockCartsService::new();

        carts
            .expect_delete_cart()
            .once()
            .withf(move |cart| cart.into_uuid() == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_delete_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/carts/{}", Uuid::now_v7()))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
