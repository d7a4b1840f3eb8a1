//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    categories::{CategoryResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<CategoryResponse>,
}

/// Category Index Handler
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::categories::{
        MockCategoriesService,
        records::{CategoryRecord, CategoryUuid},
    };
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    #[tokio::test]
    async fn test_index_returns_categories_with_counts() -> TestResult {
        let uuid = CategoryUuid::new();
        let mut categories = MockCategoriesService::new();

        categories.expect_list_categories().once().return_once(move || {
            Ok(vec![CategoryRecord {
                uuid,
                name: "Shirts".to_string(),
                image_url: None,
                icon_url: None,
                product_count: 4,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            }])
        });

        let service = TestApp::new()
            .categories(categories)
            .service(Router::with_path("categories").get(handler));

        let body: CategoriesResponse = TestClient::get("http://example.com/categories")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.categories.len(), 1);
        assert!(
            body.categories
                .iter()
                .all(|category| category.uuid == uuid.into_uuid() && category.product_count == 4)
        );

        Ok(())
    }
}
