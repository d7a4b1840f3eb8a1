//! My Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// My Order Handler
///
/// Orders placed by another customer are reported as missing.
#[endpoint(
    tags("me"),
    summary = "My Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let customer = depot.customer_or_403()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    if order.customer_uuid != customer {
        return Err(StatusError::not_found().brief("Order not found"));
    }

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront::orders::OrderStatus;
    use storefront_app::{
        auth::Principal,
        domain::{
            customers::records::CustomerUuid,
            orders::{MockOrdersService, records::OrderUuid},
        },
    };
    use testresult::TestResult;

    use crate::test_helpers::{TestApp, make_order};

    use super::*;

    fn make_service(customer: CustomerUuid, orders: MockOrdersService) -> Service {
        TestApp::new().orders(orders).service_as(
            Principal::Customer(customer),
            Router::with_path("me/orders/{order}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_own_order_is_returned() -> TestResult {
        let customer = CustomerUuid::new();
        let uuid = OrderUuid::new();
        let order = make_order(uuid, customer, OrderStatus::Shipped)?;
        let mut orders = MockOrdersService::new();

        orders.expect_get_order().once().return_once(move |_| Ok(order));

        let body: OrderResponse = TestClient::get(format!("http://example.com/me/orders/{uuid}"))
            .send(&make_service(customer, orders))
            .await
            .take_json()
            .await?;

        assert_eq!(body.status, "shipped");

        Ok(())
    }

    #[tokio::test]
    async fn test_someone_elses_order_is_hidden() -> TestResult {
        let uuid = OrderUuid::new();
        let order = make_order(uuid, CustomerUuid::new(), OrderStatus::Paid)?;
        let mut orders = MockOrdersService::new();

        orders.expect_get_order().once().return_once(move |_| Ok(order));

        let res = TestClient::get(format!("http://example.com/me/orders/{uuid}"))
            .send(&make_service(CustomerUuid::new(), orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
