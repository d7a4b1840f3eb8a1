//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::categories::data::CategoryUpdate;

use crate::{
    categories::{CategoryResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Update Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCategoryRequest {
    pub name: String,
    pub image_url: Option<String>,
    pub icon_url: Option<String>,
}

/// Update Category Handler
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::CONFLICT, description = "Name already taken"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    json: JsonBody<UpdateCategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let name = request.name.trim();

    if name.is_empty() {
        return Err(StatusError::bad_request().brief("Category name is required"));
    }

    let update = CategoryUpdate {
        name: name.to_string(),
        image_url: request.image_url,
        icon_url: request.icon_url,
    };

    let category = state
        .app
        .categories
        .update_category(category.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use storefront_app::{
        auth::Principal,
        domain::categories::{CategoriesServiceError, MockCategoriesService},
    };
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    #[tokio::test]
    async fn test_update_missing_category_returns_404() -> TestResult {
        let uuid = Uuid::now_v7();
        let mut categories = MockCategoriesService::new();

        categories
            .expect_update_category()
            .once()
            .withf(move |category, update| category.into_uuid() == uuid && update.name == "Boots")
            .return_once(|_, _| Err(CategoriesServiceError::NotFound));

        let service = TestApp::new().categories(categories).service_as(
            Principal::Admin,
            Router::with_path("categories/{category}").put(handler),
        );

        let res = TestClient::put(format!("http://example.com/categories/{uuid}"))
            .json(&json!({ "name": "Boots" }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
