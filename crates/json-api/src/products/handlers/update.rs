//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{ProductPayload, ProductResponse, errors::into_status_error},
    state::State,
};

/// Update Product Handler
///
/// Replaces the product's details. Variants left out of the payload are
/// removed.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ProductPayload>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .update_product(product.into_inner().into(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::{
        auth::Principal,
        domain::products::{MockProductsService, ProductsServiceError, records::ProductUuid},
    };
    use testresult::TestResult;

    use crate::test_helpers::{TestApp, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        TestApp::new().products(products).service_as(
            Principal::Admin,
            Router::with_path("products/{product}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_product_success() -> TestResult {
        let uuid = ProductUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |product, details| {
                *product == uuid && details.price == 99_90 && details.discount_price == Some(89_90)
            })
            .return_once(move |_, _| Ok(make_product(uuid, 99_90)));

        let mut res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "name": "Linen Shirt", "price": 99_90, "discount_price": 89_90 }))
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.price, 99_90);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/products/{}", Uuid::now_v7()))
            .json(&json!({ "name": "Linen Shirt", "price": 99_90 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
