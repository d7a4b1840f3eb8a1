//! Create Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::categories::{data::NewCategory, records::CategoryUuid};

use crate::{
    categories::{CategoryResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Create Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCategoryRequest {
    pub uuid: Option<Uuid>,
    pub name: String,
    pub image_url: Option<String>,
    pub icon_url: Option<String>,
}

impl From<CreateCategoryRequest> for NewCategory {
    fn from(request: CreateCategoryRequest) -> Self {
        NewCategory {
            uuid: request.uuid.map_or_else(CategoryUuid::new, Into::into),
            name: request.name.trim().to_string(),
            image_url: request.image_url,
            icon_url: request.icon_url,
        }
    }
}

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Category already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    if request.name.trim().is_empty() {
        return Err(StatusError::bad_request().brief("Category name is required"));
    }

    let category = state
        .app
        .categories
        .create_category(request.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::{
        auth::Principal,
        domain::categories::{
            CategoriesServiceError, MockCategoriesService, records::CategoryRecord,
        },
    };
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        TestApp::new()
            .categories(categories)
            .service_as(Principal::Admin, Router::with_path("categories").post(handler))
    }

    #[tokio::test]
    async fn test_create_category_trims_name() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .withf(|new| new.name == "Shoes")
            .return_once(|new| {
                Ok(CategoryRecord {
                    uuid: new.uuid,
                    name: new.name,
                    image_url: None,
                    icon_url: None,
                    product_count: 0,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "  Shoes " }))
            .send(&make_service(categories))
            .await;

        let body: CategoryResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.name, "Shoes");

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories.expect_create_category().never();

        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "   " }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_name_returns_409() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Shoes" }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
