//! App Router

use salvo::Router;

use crate::{
    auth, carts, categories, checkout, content, me, orders, products, settings, shipping_services,
    webhooks,
};

/// Storefront, shopper and back-office routes.
///
/// Catalog browsing, storefront content, carts and the payment webhook are
/// open. Checkout and `/me` need a customer token; everything else needs an
/// admin token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(storefront_router())
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(customer_router())
                .push(Router::new().hoop(auth::admin::handler).push(admin_router())),
        )
}

fn storefront_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(Router::with_path("categories").get(categories::index::handler))
        .push(Router::with_path("settings").get(settings::get::handler))
        .push(
            Router::with_path("carts")
                .post(carts::create::handler)
                .push(
                    Router::with_path("{cart}")
                        .get(carts::get::handler)
                        .delete(carts::delete::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .put(carts::items::update::handler)
                                        .delete(carts::items::delete::handler),
                                ),
                        )
                        .push(Router::with_path("shipping-quotes").post(carts::quotes::handler)),
                ),
        )
        .push(Router::with_path("slides").get(content::slides::index))
        .push(Router::with_path("popup").get(content::popups::active))
        .push(Router::with_path("social-links").get(content::social_links::index))
        .push(Router::with_path("page-headers/{slug}").get(content::page_headers::get))
        .push(Router::with_path("webhooks/payments").post(webhooks::payments::handler))
}

fn customer_router() -> Router {
    Router::new()
        .push(Router::with_path("checkout").post(checkout::create::handler))
        .push(
            Router::with_path("me")
                .get(me::profile::handler)
                .push(
                    Router::with_path("orders")
                        .get(me::orders::handler)
                        .push(Router::with_path("{order}").get(me::order::handler)),
                )
                .push(Router::with_path("cashback").get(me::cashback::handler)),
        )
}

fn admin_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("categories")
                .post(categories::create::handler)
                .push(
                    Router::with_path("{category}")
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                ),
        )
        .push(Router::with_path("settings").put(settings::update::handler))
        .push(
            Router::with_path("shipping-services")
                .get(shipping_services::index::handler)
                .post(shipping_services::create::handler)
                .push(Router::with_path("{service}").put(shipping_services::update::handler)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("status").put(orders::status::handler)),
                ),
        )
        .push(Router::with_path("stats").get(orders::stats::handler))
        .push(content_router())
}

fn content_router() -> Router {
    Router::new()
        .push(
            Router::with_path("slides")
                .post(content::slides::create)
                .push(Router::with_path("all").get(content::slides::admin_index))
                .push(
                    Router::with_path("{slide}")
                        .put(content::slides::update)
                        .delete(content::slides::delete),
                ),
        )
        .push(
            Router::with_path("popups")
                .get(content::popups::index)
                .post(content::popups::create)
                .push(
                    Router::with_path("{popup}")
                        .put(content::popups::update)
                        .delete(content::popups::delete),
                ),
        )
        .push(
            Router::with_path("social-links")
                .post(content::social_links::create)
                .push(Router::with_path("all").get(content::social_links::admin_index))
                .push(
                    Router::with_path("{link}")
                        .put(content::social_links::update)
                        .delete(content::social_links::delete),
                ),
        )
        .push(
            Router::with_path("page-headers")
                .get(content::page_headers::index)
                .push(
                    Router::with_path("{slug}")
                        .put(content::page_headers::put)
                        .delete(content::page_headers::delete),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, http::header::AUTHORIZATION, prelude::*, test::TestClient};
    use storefront_app::{
        auth::{MockAuthService, Principal},
        domain::{
            categories::MockCategoriesService, content::MockContentService,
            customers::records::CustomerUuid, orders::MockOrdersService,
        },
    };
    use testresult::TestResult;

    use crate::test_helpers::TestApp;

    use super::*;

    fn make_service(app: TestApp) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(app.state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_catalog_is_public() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_list_categories()
            .once()
            .return_once(|| Ok(vec![]));

        let res = TestClient::get("http://example.com/categories")
            .send(&make_service(TestApp::new().categories(categories)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_back_office_requires_a_token() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_stats().never();

        let res = TestClient::get("http://example.com/stats")
            .send(&make_service(TestApp::new().orders(orders)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_tokens_cannot_reach_back_office() -> TestResult {
        let customer = CustomerUuid::new();
        let mut auth = MockAuthService::new();
        let mut orders = MockOrdersService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(move |_| Ok(Principal::Customer(customer)));

        orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/orders")
            .add_header(AUTHORIZATION, "Bearer sf_v1_token", true)
            .send(&make_service(TestApp::new().auth(auth).orders(orders)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_storefront_content_is_public() -> TestResult {
        let mut content = MockContentService::new();

        content
            .expect_list_social_links()
            .once()
            .withf(|active_only| *active_only)
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/social-links")
            .send(&make_service(TestApp::new().content(content)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_content_management_requires_a_token() -> TestResult {
        let mut content = MockContentService::new();

        content.expect_list_slides().never();
        content.expect_list_popups().never();

        let service = make_service(TestApp::new().content(content));

        for path in ["slides/all", "popups"] {
            let res = TestClient::get(format!("http://example.com/{path}"))
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED), "{path}");
        }

        Ok(())
    }
}
