//! Page Header Handlers
//!
//! Headers are addressed by page slug (`shop`, `about-us`) rather than by
//! id, and saving one creates it when the page has none yet.

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::content::data::PageHeaderData;

use crate::{
    content::{PageHeaderResponse, errors::into_status_error, handlers::trimmed},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageHeadersResponse {
    pub page_headers: Vec<PageHeaderResponse>,
}

/// Page Header Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageHeaderRequest {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<PageHeaderRequest> for PageHeaderData {
    fn from(request: PageHeaderRequest) -> Self {
        Self {
            title: request.title.trim().to_string(),
            description: trimmed(request.description).unwrap_or_default(),
            image_url: trimmed(request.image_url),
        }
    }
}

/// Get Page Header Handler
#[endpoint(
    tags("content"),
    summary = "Get Page Header",
    responses(
        (status_code = StatusCode::OK, description = "Page header"),
        (status_code = StatusCode::NOT_FOUND, description = "Page has no header"),
    ),
)]
pub(crate) async fn get(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PageHeaderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let header = state
        .app
        .content
        .page_header(slug.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(header.into()))
}

/// Page Header Index Handler
#[endpoint(tags("content"), summary = "List Page Headers", security(("bearer_auth" = [])))]
pub(crate) async fn index(depot: &mut Depot) -> Result<Json<PageHeadersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let headers = state
        .app
        .content
        .list_page_headers()
        .await
        .map_err(into_status_error)?;

    Ok(Json(PageHeadersResponse {
        page_headers: headers.into_iter().map(Into::into).collect(),
    }))
}

/// Save Page Header Handler
#[endpoint(
    tags("content"),
    summary = "Save Page Header",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Page header saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed slug or missing title"),
    ),
)]
pub(crate) async fn put(
    slug: PathParam<String>,
    json: JsonBody<PageHeaderRequest>,
    depot: &mut Depot,
) -> Result<Json<PageHeaderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let header = state
        .app
        .content
        .put_page_header(slug.into_inner(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(header.into()))
}

/// Delete Page Header Handler
#[endpoint(
    tags("content"),
    summary = "Delete Page Header",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Page header deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Page has no header"),
    ),
)]
pub(crate) async fn delete(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .content
        .delete_page_header(slug.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::{
        auth::Principal,
        domain::content::{ContentServiceError, MockContentService},
    };
    use testresult::TestResult;

    use crate::{content::handlers::fixtures, test_helpers::TestApp};

    use super::*;

    #[tokio::test]
    async fn test_get_page_header_by_slug() -> TestResult {
        let mut content = MockContentService::new();

        content
            .expect_page_header()
            .once()
            .withf(|slug| slug == "shop")
            .return_once(|slug| Ok(fixtures::page_header(&slug, "Our Shop")));

        let service = TestApp::new()
            .content(content)
            .service(Router::with_path("page-headers/{slug}").get(get));

        let body: PageHeaderResponse = TestClient::get("http://example.com/page-headers/shop")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.page_slug, "shop");
        assert_eq!(body.title, "Our Shop");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_page_returns_404() -> TestResult {
        let mut content = MockContentService::new();

        content
            .expect_page_header()
            .once()
            .return_once(|_| Err(ContentServiceError::NotFound));

        let service = TestApp::new()
            .content(content)
            .service(Router::with_path("page-headers/{slug}").get(get));

        let res = TestClient::get("http://example.com/page-headers/careers")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_put_saves_header_for_slug() -> TestResult {
        let mut content = MockContentService::new();

        content
            .expect_put_page_header()
            .once()
            .withf(|slug, data| {
                slug == "about-us" && data.title == "About Us" && data.image_url.is_none()
            })
            .return_once(|slug, data| Ok(fixtures::page_header(&slug, &data.title)));

        let res = TestClient::put("http://example.com/page-headers/about-us")
            .json(&json!({ "title": " About Us ", "image_url": "" }))
            .send(&TestApp::new().content(content).service_as(
                Principal::Admin,
                Router::with_path("page-headers/{slug}").put(put),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_slug_returns_400() -> TestResult {
        let mut content = MockContentService::new();

        content
            .expect_put_page_header()
            .once()
            .return_once(|_, _| Err(ContentServiceError::InvalidData));

        let res = TestClient::put("http://example.com/page-headers/About_Us")
            .json(&json!({ "title": "About Us" }))
            .send(&TestApp::new().content(content).service_as(
                Principal::Admin,
                Router::with_path("page-headers/{slug}").put(put),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
