//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::data::ProductFilter;

use crate::{
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns live products, newest first, optionally narrowed to a category.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        category: category.into_inner().filter(|name| !name.trim().is_empty()),
        uuids: None,
    };

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{TestApp, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        TestApp::new()
            .products(products)
            .service(Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_products() -> TestResult {
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| *filter == ProductFilter::default())
            .return_once(move |_| Ok(vec![make_product(uuid_a, 100), make_product(uuid_b, 200)]));

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        let uuids: Vec<_> = response.products.iter().map(|product| product.uuid).collect();

        assert_eq!(uuids, vec![uuid_a.into_uuid(), uuid_b.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_category_filter() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| filter.category.as_deref() == Some("Shirts"))
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/products?category=Shirts")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
