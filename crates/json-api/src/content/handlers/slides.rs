//! Hero Slide Handlers

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

use storefront_app::domain::content::{
    data::{NewSlide, SlideData},
    records::SlideUuid,
};

use crate::{
    content::{SlideResponse, errors::into_status_error, handlers::trimmed},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SlidesResponse {
    pub slides: Vec<SlideResponse>,
}

/// Slide Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SlideRequest {
    pub title: String,
    pub description: Option<String>,
    pub button_text: Option<String>,

    /// Defaults to `#`
    pub button_link: Option<String>,
    pub image_url: String,

    /// Defaults to true
    pub active: Option<bool>,

    /// Defaults to 0
    pub sort_order: Option<i32>,
}

impl From<SlideRequest> for SlideData {
    fn from(request: SlideRequest) -> Self {
        Self {
            title: request.title.trim().to_string(),
            description: trimmed(request.description).unwrap_or_default(),
            button_text: trimmed(request.button_text).unwrap_or_default(),
            button_link: trimmed(request.button_link).unwrap_or_else(|| "#".to_string()),
            image_url: request.image_url.trim().to_string(),
            active: request.active.unwrap_or(true),
            sort_order: request.sort_order.unwrap_or_default(),
        }
    }
}

async fn list(depot: &Depot, active_only: bool) -> Result<Json<SlidesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let slides = state
        .app
        .content
        .list_slides(active_only)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SlidesResponse {
        slides: slides.into_iter().map(Into::into).collect(),
    }))
}

/// Active slides in display order.
#[endpoint(tags("content"), summary = "List Slides")]
pub(crate) async fn index(depot: &mut Depot) -> Result<Json<SlidesResponse>, StatusError> {
    list(depot, true).await
}

/// Every slide, including inactive ones.
#[endpoint(tags("content"), summary = "List All Slides", security(("bearer_auth" = [])))]
pub(crate) async fn admin_index(depot: &mut Depot) -> Result<Json<SlidesResponse>, StatusError> {
    list(depot, false).await
}

/// Create Slide Handler
#[endpoint(
    tags("content"),
    summary = "Create Slide",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Slide created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Title or image missing"),
    ),
)]
pub(crate) async fn create(
    json: JsonBody<SlideRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SlideResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let slide = state
        .app
        .content
        .create_slide(NewSlide {
            uuid: SlideUuid::new(),
            slide: json.into_inner().into(),
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(slide.into()))
}

/// Update Slide Handler
#[endpoint(
    tags("content"),
    summary = "Update Slide",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Slide updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Slide not found"),
    ),
)]
pub(crate) async fn update(
    slide: PathParam<Uuid>,
    json: JsonBody<SlideRequest>,
    depot: &mut Depot,
) -> Result<Json<SlideResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let slide = state
        .app
        .content
        .update_slide(slide.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(slide.into()))
}

/// Delete Slide Handler
#[endpoint(
    tags("content"),
    summary = "Delete Slide",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Slide deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Slide not found"),
    ),
)]
pub(crate) async fn delete(
    slide: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .content
        .delete_slide(slide.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
