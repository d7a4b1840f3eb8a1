//! Pop-up Handlers

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
    data::{NewPopup, PopupData},
    records::PopupUuid,
};

use crate::{
    content::{PopupResponse, errors::into_status_error, handlers::trimmed},
    extensions::*,
    state::State,
};

/// The pop-up to show, if any.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActivePopupResponse {
    pub popup: Option<PopupResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PopupsResponse {
    pub popups: Vec<PopupResponse>,
}

/// Popup Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PopupRequest {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,

    /// Defaults to false; new pop-ups are drafts until switched on.
    pub active: Option<bool>,
}

impl From<PopupRequest> for PopupData {
    fn from(request: PopupRequest) -> Self {
        Self {
            title: request.title.trim().to_string(),
            description: trimmed(request.description),
            image_url: trimmed(request.image_url),
            button_text: trimmed(request.button_text),
            button_link: trimmed(request.button_link),
            active: request.active.unwrap_or_default(),
        }
    }
}

/// Active Popup Handler
///
/// When several pop-ups are active the most recently updated one wins.
#[endpoint(tags("content"), summary = "Active Pop-up")]
pub(crate) async fn active(depot: &mut Depot) -> Result<Json<ActivePopupResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let popup = state
        .app
        .content
        .active_popup()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ActivePopupResponse {
        popup: popup.map(Into::into),
    }))
}

/// Popup Index Handler
#[endpoint(tags("content"), summary = "List Pop-ups", security(("bearer_auth" = [])))]
pub(crate) async fn index(depot: &mut Depot) -> Result<Json<PopupsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let popups = state
        .app
        .content
        .list_popups()
        .await
        .map_err(into_status_error)?;

    Ok(Json(PopupsResponse {
        popups: popups.into_iter().map(Into::into).collect(),
    }))
}

/// Create Popup Handler
#[endpoint(
    tags("content"),
    summary = "Create Pop-up",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Pop-up created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Title missing"),
    ),
)]
pub(crate) async fn create(
    json: JsonBody<PopupRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PopupResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let popup = state
        .app
        .content
        .create_popup(NewPopup {
            uuid: PopupUuid::new(),
            popup: json.into_inner().into(),
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(popup.into()))
}

/// Update Popup Handler
#[endpoint(
    tags("content"),
    summary = "Update Pop-up",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Pop-up updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Pop-up not found"),
    ),
)]
pub(crate) async fn update(
    popup: PathParam<Uuid>,
    json: JsonBody<PopupRequest>,
    depot: &mut Depot,
) -> Result<Json<PopupResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let popup = state
        .app
        .content
        .update_popup(popup.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(popup.into()))
}

/// Delete Popup Handler
#[endpoint(
    tags("content"),
    summary = "Delete Pop-up",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Pop-up deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Pop-up not found"),
    ),
)]
pub(crate) async fn delete(
    popup: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .content
        .delete_popup(popup.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
