//! Get Settings Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    settings::{SettingsResponse, errors::into_status_error},
    state::State,
};

/// Get Settings Handler
///
/// Returns the saved settings, or the defaults when none have been saved.
#[endpoint(tags("settings"), summary = "Get Store Settings")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SettingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let settings = state
        .app
        .settings
        .get_settings()
        .await
        .map_err(into_status_error)?;

    Ok(Json(settings.into()))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::settings::{MockSettingsService, records::SettingsRecord};
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    #[tokio::test]
    async fn test_unsaved_settings_return_defaults() -> TestResult {
        let mut settings = MockSettingsService::new();

        settings
            .expect_get_settings()
            .once()
            .return_once(|| Ok(SettingsRecord::defaults(BRL)));

        let service = TestApp::new()
            .settings(settings)
            .service(Router::with_path("settings").get(handler));

        let body: SettingsResponse = TestClient::get("http://example.com/settings")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.free_shipping_threshold, 250_00);
        assert!(body.cashback_active);
        assert!((body.cashback_percent - 5.0).abs() < f64::EPSILON);
        assert!(body.updated_at.is_none());

        Ok(())
    }
}
