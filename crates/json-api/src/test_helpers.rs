//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rusty_money::iso::BRL;
use salvo::{affix_state::inject, prelude::*};
use storefront::{
    checkout::PaymentMethod,
    orders::OrderStatus,
    shipping::{Address, PostalCode, QuoteError},
};
use storefront_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        categories::MockCategoriesService,
        checkout::MockCheckoutService,
        content::MockContentService,
        customers::{
            MockCustomersService,
            records::{CustomerRecord, CustomerUuid},
        },
        notifications::MockNotificationsService,
        orders::{
            MockOrdersService,
            records::{OrderLineRecord, OrderLineUuid, OrderRecord, OrderUuid, ShippingSelection},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        quotes::MockQuotesService,
        settings::MockSettingsService,
        shipping_services::MockShippingServicesService,
        webhooks::MockWebhooksService,
    },
};

use crate::{extensions::*, state::State};

/// Puts a fixed principal in the depot, standing in for bearer auth.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InjectPrincipal(pub(crate) Principal);

#[salvo::handler]
impl InjectPrincipal {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_principal(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

/// Application context assembled from mocks. Services not replaced panic
/// when called.
pub(crate) struct TestApp {
    products: MockProductsService,
    categories: MockCategoriesService,
    content: MockContentService,
    settings: MockSettingsService,
    shipping_services: MockShippingServicesService,
    carts: MockCartsService,
    customers: MockCustomersService,
    orders: MockOrdersService,
    quotes: MockQuotesService,
    checkout: MockCheckoutService,
    webhooks: MockWebhooksService,
    auth: MockAuthService,
}

impl TestApp {
    pub(crate) fn new() -> Self {
        Self {
            products: MockProductsService::new(),
            categories: MockCategoriesService::new(),
            content: MockContentService::new(),
            settings: MockSettingsService::new(),
            shipping_services: MockShippingServicesService::new(),
            carts: MockCartsService::new(),
            customers: MockCustomersService::new(),
            orders: MockOrdersService::new(),
            quotes: MockQuotesService::new(),
            checkout: MockCheckoutService::new(),
            webhooks: MockWebhooksService::new(),
            auth: MockAuthService::new(),
        }
    }

    pub(crate) fn products(mut self, products: MockProductsService) -> Self {
        self.products = products;
        self
    }

    pub(crate) fn categories(mut self, categories: MockCategoriesService) -> Self {
        self.categories = categories;
        self
    }

    pub(crate) fn content(mut self, content: MockContentService) -> Self {
        self.content = content;
        self
    }

    pub(crate) fn settings(mut self, settings: MockSettingsService) -> Self {
        self.settings = settings;
        self
    }

    pub(crate) fn shipping_services(mut self, services: MockShippingServicesService) -> Self {
        self.shipping_services = services;
        self
    }

    pub(crate) fn carts(mut self, carts: MockCartsService) -> Self {
        self.carts = carts;
        self
    }

    pub(crate) fn customers(mut self, customers: MockCustomersService) -> Self {
        self.customers = customers;
        self
    }

    pub(crate) fn orders(mut self, orders: MockOrdersService) -> Self {
        self.orders = orders;
        self
    }

    pub(crate) fn quotes(mut self, quotes: MockQuotesService) -> Self {
        self.quotes = quotes;
        self
    }

    pub(crate) fn checkout(mut self, checkout: MockCheckoutService) -> Self {
        self.checkout = checkout;
        self
    }

    pub(crate) fn webhooks(mut self, webhooks: MockWebhooksService) -> Self {
        self.webhooks = webhooks;
        self
    }

    pub(crate) fn auth(mut self, auth: MockAuthService) -> Self {
        self.auth = auth;
        self
    }

    pub(crate) fn state(self) -> Arc<State> {
        let mut notifications = MockNotificationsService::new();

        notifications.expect_order_placed().never();
        notifications.expect_customer_registered().never();

        State::shared(
            AppContext {
                products: Arc::new(self.products),
                categories: Arc::new(self.categories),
                content: Arc::new(self.content),
                settings: Arc::new(self.settings),
                shipping_services: Arc::new(self.shipping_services),
                carts: Arc::new(self.carts),
                customers: Arc::new(self.customers),
                orders: Arc::new(self.orders),
                quotes: Arc::new(self.quotes),
                checkout: Arc::new(self.checkout),
                webhooks: Arc::new(self.webhooks),
                notifications: Arc::new(notifications),
                auth: Arc::new(self.auth),
            },
            BRL,
        )
    }

    /// Serve `route` without authentication.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.state())).push(route))
    }

    /// Serve `route` as if `principal` had presented a valid token.
    pub(crate) fn service_as(self, principal: Principal, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.state()))
                .hoop(InjectPrincipal(principal))
                .push(route),
        )
    }
}

pub(crate) fn make_product(uuid: ProductUuid, price: u64) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Linen Shirt".to_string(),
        description: None,
        price,
        discount_price: None,
        image_url: None,
        gallery: Vec::new(),
        dimensions: storefront::catalog::ParcelDimensions::default(),
        categories: storefront::catalog::CategoryTags::new(["Shirts"]),
        variants: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_customer(uuid: CustomerUuid, cashback_balance: u64) -> CustomerRecord {
    CustomerRecord {
        uuid,
        full_name: "Ana Souza".to_string(),
        email: "ana@example.com".to_string(),
        cashback_balance,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(
    uuid: OrderUuid,
    customer: CustomerUuid,
    status: OrderStatus,
) -> Result<OrderRecord, QuoteError> {
    Ok(OrderRecord {
        uuid,
        customer_uuid: customer,
        cart_uuid: None,
        email: "ana@example.com".to_string(),
        full_name: "Ana Souza".to_string(),
        document: "12345678900".to_string(),
        phone: None,
        address: Address {
            postal_code: PostalCode::parse("20040-020")?,
            street: "Rua Primeiro de Março".to_string(),
            number: "10".to_string(),
            complement: None,
            neighborhood: "Centro".to_string(),
            city: "Rio de Janeiro".to_string(),
            state: "RJ".to_string(),
        },
        shipping: ShippingSelection {
            service_id: 1,
            name: "PAC".to_string(),
            company: "Correios".to_string(),
            delivery_days: 5,
        },
        shipping_cost: 20_00,
        subtotal: 100_00,
        total_before_cashback: 120_00,
        applied_cashback: 0,
        final_total: 120_00,
        payment_method: PaymentMethod::Card,
        payment_session_id: None,
        status,
        lines: vec![OrderLineRecord {
            uuid: OrderLineUuid::new(),
            order_uuid: uuid,
            product_uuid: ProductUuid::new(),
            variant_uuid: None,
            name: "Linen Shirt".to_string(),
            variant_description: "Standard".to_string(),
            image_url: None,
            unit_price: 100_00,
            quantity: 1,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    })
}
