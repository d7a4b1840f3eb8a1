//! Stats Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::records::OrderStats;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Back-office Dashboard Figures
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsResponse {
    pub total_orders: u64,
    pub processing_orders: u64,
    pub paid_orders: u64,
    pub total_customers: u64,
    pub total_products: u64,

    /// Minor units
    pub total_cashback_credited: u64,

    /// Paid, shipped and delivered orders, minor units
    pub total_revenue: u64,
}

impl From<OrderStats> for StatsResponse {
    fn from(stats: OrderStats) -> Self {
        Self {
            total_orders: stats.total_orders,
            processing_orders: stats.processing_orders,
            paid_orders: stats.paid_orders,
            total_customers: stats.total_customers,
            total_products: stats.total_products,
            total_cashback_credited: stats.total_cashback_credited,
            total_revenue: stats.total_revenue,
        }
    }
}

/// Stats Handler
#[endpoint(tags("orders"), summary = "Dashboard Stats", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .orders
        .stats()
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::{auth::Principal, domain::orders::MockOrdersService};
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    #[tokio::test]
    async fn test_stats_are_returned() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_stats().once().return_once(|| {
            Ok(OrderStats {
                total_orders: 12,
                paid_orders: 7,
                total_revenue: 1_250_00,
                ..OrderStats::default()
            })
        });

        let service = TestApp::new()
            .orders(orders)
            .service_as(Principal::Admin, Router::with_path("stats").get(handler));

        let body: StatsResponse = TestClient::get("http://example.com/stats")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.total_orders, 12);
        assert_eq!(body.total_revenue, 1_250_00);

        Ok(())
    }
}
