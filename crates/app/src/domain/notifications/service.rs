//! Notifications service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use storefront::settings::StoreSettings;

use crate::{
    domain::{
        customers::records::CustomerRecord,
        notifications::{NotificationsError, templates},
        orders::records::OrderRecord,
    },
    gateways::mail::Mailer,
};

/// Notifications rendered from the built-in templates and delivered by a
/// [`Mailer`].
#[derive(Clone)]
pub struct MailNotificationsService {
    mailer: Arc<dyn Mailer>,
}

impl MailNotificationsService {
    #[must_use]
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl NotificationsService for MailNotificationsService {
    #[tracing::instrument(
        name = "notifications.service.order_placed",
        skip(self, order, settings),
        fields(order_uuid = %order.uuid),
        err
    )]
    async fn order_placed(
        &self,
        order: &OrderRecord,
        settings: &StoreSettings<'static>,
    ) -> Result<(), NotificationsError> {
        let email = templates::order_confirmation(order, &settings.store_name, settings.currency());

        self.mailer.send(&email).await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "notifications.service.customer_registered",
        skip(self, customer, settings),
        fields(customer_uuid = %customer.uuid),
        err
    )]
    async fn customer_registered(
        &self,
        customer: &CustomerRecord,
        settings: &StoreSettings<'static>,
    ) -> Result<(), NotificationsError> {
        let admin_email = settings
            .contact_email
            .as_deref()
            .ok_or(NotificationsError::MissingContactEmail)?;

        let email = templates::customer_registered(customer, &settings.store_name, admin_email);

        self.mailer.send(&email).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// Send the order confirmation to the shopper.
    async fn order_placed(
        &self,
        order: &OrderRecord,
        settings: &StoreSettings<'static>,
    ) -> Result<(), NotificationsError>;

    /// Tell the store a customer signed up.
    async fn customer_registered(
        &self,
        customer: &CustomerRecord,
        settings: &StoreSettings<'static>,
    ) -> Result<(), NotificationsError>;
}
