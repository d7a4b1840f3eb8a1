//! App Context

use std::sync::Arc;

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        categories::{CategoriesService, PgCategoriesService},
        checkout::{CheckoutDependencies, CheckoutService, StoreCheckoutService},
        content::{ContentService, PgContentService},
        customers::{CustomersService, PgCustomersService},
        notifications::{MailNotificationsService, NotificationsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        quotes::{GatewayQuotesService, QuotesService},
        settings::{PgSettingsService, SettingsService},
        shipping_services::{PgShippingServicesService, ShippingServicesService},
        webhooks::{PaymentWebhooksService, WebhookConfig, WebhooksService},
    },
    gateways::{
        mail::{HttpMailer, MailGatewayConfig},
        payments::{HttpPaymentGateway, PaymentsGatewayConfig},
        shipping::{HttpShippingGateway, ShippingGatewayConfig},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Everything needed to wire the services together.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,

    /// Currency every amount in the store is expressed in
    pub currency: &'static Currency,
    pub run_migrations: bool,
    pub shipping: ShippingGatewayConfig,
    pub payments: PaymentsGatewayConfig,
    pub webhook: WebhookConfig,
    pub mail: MailGatewayConfig,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub content: Arc<dyn ContentService>,
    pub settings: Arc<dyn SettingsService>,
    pub shipping_services: Arc<dyn ShippingServicesService>,
    pub carts: Arc<dyn CartsService>,
    pub customers: Arc<dyn CustomersService>,
    pub orders: Arc<dyn OrdersService>,
    pub quotes: Arc<dyn QuotesService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub webhooks: Arc<dyn WebhooksService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url)
            .await
            .map_err(AppInitError::Database)?;

        if config.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        let db = Db::new(pool.clone());
        let currency = config.currency;

        let carts: Arc<dyn CartsService> = Arc::new(PgCartsService::new(db.clone(), currency));
        let customers: Arc<dyn CustomersService> = Arc::new(PgCustomersService::new(db.clone()));
        let orders: Arc<dyn OrdersService> = Arc::new(PgOrdersService::new(db.clone(), currency));
        let shipping_services: Arc<dyn ShippingServicesService> =
            Arc::new(PgShippingServicesService::new(db.clone()));

        let shipping = Arc::new(HttpShippingGateway::new(config.shipping));
        let payments = Arc::new(HttpPaymentGateway::new(config.payments));
        let notifications: Arc<dyn NotificationsService> = Arc::new(
            MailNotificationsService::new(Arc::new(HttpMailer::new(config.mail))),
        );

        let quotes = Arc::new(GatewayQuotesService::new(
            Arc::clone(&carts),
            Arc::clone(&shipping_services),
            shipping.clone(),
        ));

        let checkout = Arc::new(StoreCheckoutService::new(CheckoutDependencies {
            carts: Arc::clone(&carts),
            customers: Arc::clone(&customers),
            orders: Arc::clone(&orders),
            shipping_services: Arc::clone(&shipping_services),
            shipping,
            payments,
            notifications: Arc::clone(&notifications),
        }));

        let webhooks = Arc::new(PaymentWebhooksService::new(
            config.webhook,
            Arc::clone(&orders),
            Arc::clone(&carts),
        ));

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            content: Arc::new(PgContentService::new(db.clone())),
            settings: Arc::new(PgSettingsService::new(db, currency)),
            shipping_services,
            carts,
            customers,
            orders,
            quotes,
            checkout,
            webhooks,
            notifications,
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
