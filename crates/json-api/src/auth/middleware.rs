//! Bearer token authentication.
//!
//! Resolves the `Authorization` header to a [`Principal`] and stores it in
//! the depot for the guards and handlers further down the route tree.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use storefront_app::auth::{AuthServiceError, Principal};
use tracing::error;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(principal) => {
            depot.insert_principal(principal);
            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}

async fn authenticate(req: &Request, depot: &Depot) -> Result<Principal, StatusError> {
    let token = bearer_token(req)
        .ok_or_else(|| StatusError::unauthorized().brief("Missing or invalid Authorization header"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(|error| match error {
            AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid API token"),
            AuthServiceError::Sql(source) => {
                error!("failed to look up api token: {source}");
                StatusError::internal_server_error()
            }
            AuthServiceError::Token(source) => {
                error!("failed to verify api token: {source}");
                StatusError::internal_server_error()
            }
        })
}

/// The credential after a case-insensitive `Bearer` scheme.
fn bearer_token(req: &Request) -> Option<&str> {
    let (scheme, token) = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;

    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
