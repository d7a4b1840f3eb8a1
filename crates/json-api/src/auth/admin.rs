//! Back-office guard.

use salvo::prelude::*;
use storefront_app::auth::Principal;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.principal_or_401() {
        Ok(Principal::Admin) => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(Principal::Customer(_)) => {
            res.render(StatusError::forbidden().brief("Admin token required"));
            ctrl.skip_rest();
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}
