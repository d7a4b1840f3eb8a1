//! Social Link Handlers

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
    data::{NewSocialLink, SocialLinkData},
    records::SocialLinkUuid,
};

use crate::{
    content::{SocialLinkResponse, errors::into_status_error, handlers::trimmed},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SocialLinksResponse {
    pub social_links: Vec<SocialLinkResponse>,
}

/// Social Link Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SocialLinkRequest {
    pub name: String,
    pub url: String,
    pub icon_url: Option<String>,

    /// Defaults to true
    pub active: Option<bool>,

    /// Defaults to 0
    pub sort_order: Option<i32>,
}

impl From<SocialLinkRequest> for SocialLinkData {
    fn from(request: SocialLinkRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            url: request.url.trim().to_string(),
            icon_url: trimmed(request.icon_url),
            active: request.active.unwrap_or(true),
            sort_order: request.sort_order.unwrap_or_default(),
        }
    }
}

async fn list(depot: &Depot, active_only: bool) -> Result<Json<SocialLinksResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let links = state
        .app
        .content
        .list_social_links(active_only)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SocialLinksResponse {
        social_links: links.into_iter().map(Into::into).collect(),
    }))
}

/// Active social links in display order.
#[endpoint(tags("content"), summary = "List Social Links")]
pub(crate) async fn index(depot: &mut Depot) -> Result<Json<SocialLinksResponse>, StatusError> {
    list(depot, true).await
}

/// Every social link, including inactive ones.
#[endpoint(
    tags("content"),
    summary = "List All Social Links",
    security(("bearer_auth" = []))
)]
pub(crate) async fn admin_index(
    depot: &mut Depot,
) -> Result<Json<SocialLinksResponse>, StatusError> {
    list(depot, false).await
}

/// Create Social Link Handler
#[endpoint(
    tags("content"),
    summary = "Create Social Link",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Social link created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Name or URL missing"),
    ),
)]
pub(crate) async fn create(
    json: JsonBody<SocialLinkRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SocialLinkResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let link = state
        .app
        .content
        .create_social_link(NewSocialLink {
            uuid: SocialLinkUuid::new(),
            link: json.into_inner().into(),
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(link.into()))
}

/// Update Social Link Handler
#[endpoint(
    tags("content"),
    summary = "Update Social Link",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Social link updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Social link not found"),
    ),
)]
pub(crate) async fn update(
    link: PathParam<Uuid>,
    json: JsonBody<SocialLinkRequest>,
    depot: &mut Depot,
) -> Result<Json<SocialLinkResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let link = state
        .app
        .content
        .update_social_link(link.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(link.into()))
}

/// Delete Social Link Handler
#[endpoint(
    tags("content"),
    summary = "Delete Social Link",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Social link deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Social link not found"),
    ),
)]
pub(crate) async fn delete(
    link: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .content
        .delete_social_link(link.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
