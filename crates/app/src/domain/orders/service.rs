//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rusty_money::{Money, iso::Currency};
use sqlx::{Postgres, Transaction};
use storefront::orders::{Actor, OrderStatus, Transition, authorize_transition};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        customers::{
            PgCustomersRepository,
            data::NewCashbackEntry,
            records::{CashbackKind, CustomerUuid},
        },
        orders::{
            data::{NewOrder, OrderFilter},
            errors::OrdersServiceError,
            records::{OrderRecord, OrderStats, OrderUuid},
            repository::PgOrdersRepository,
        },
        settings::PgSettingsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    currency: &'static Currency,
    repository: PgOrdersRepository,
    customers: PgCustomersRepository,
    settings: PgSettingsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, currency: &'static Currency) -> Self {
        Self {
            db,
            currency,
            repository: PgOrdersRepository::new(),
            customers: PgCustomersRepository::new(),
            settings: PgSettingsRepository::new(),
        }
    }

    /// Write the side effects of entering `to`: cashback credited on
    /// delivery, cashback refunded and stock returned on cancellation.
    async fn apply_side_effects(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderRecord,
        to: OrderStatus,
    ) -> Result<(), OrdersServiceError> {
        match to {
            OrderStatus::Delivered => {
                let settings = self.settings.store_settings(tx, self.currency).await?;
                let subtotal = Money::from_minor(i64::try_from(order.subtotal)?, self.currency);
                let earned = u64::try_from(settings.cashback.earned_on(subtotal)?.to_minor_units())?;

                self.customers
                    .record_cashback(
                        tx,
                        &NewCashbackEntry {
                            customer_uuid: order.customer_uuid,
                            order_uuid: Some(order.uuid),
                            kind: CashbackKind::Credit,
                            amount: earned,
                            description: format!("Cashback earned on order {}", order.uuid),
                        },
                    )
                    .await?;
            }
            OrderStatus::Cancelled => {
                self.customers
                    .record_cashback(
                        tx,
                        &NewCashbackEntry {
                            customer_uuid: order.customer_uuid,
                            order_uuid: Some(order.uuid),
                            kind: CashbackKind::Credit,
                            amount: order.applied_cashback,
                            description: format!("Cashback refunded for cancelled order {}", order.uuid),
                        },
                    )
                    .await?;

                self.repository.restock_order(tx, order.uuid).await?;
            }
            OrderStatus::Processing | OrderStatus::Paid | OrderStatus::Shipped => {}
        }

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(order_uuid = %order.uuid),
        err
    )]
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        if order.lines.is_empty() {
            return Err(OrdersServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let record = self.repository.create_order(&mut tx, &order).await?;

        for line in &order.lines {
            let Some(variant) = line.variant_uuid else {
                continue;
            };

            let taken = self
                .repository
                .take_stock(&mut tx, line.product_uuid, variant, line.quantity)
                .await?;

            if !taken {
                return Err(OrdersServiceError::InsufficientStock(format!(
                    "{} ({})",
                    line.name, line.variant_description
                )));
            }
        }

        let debited = self
            .customers
            .record_cashback(
                &mut tx,
                &NewCashbackEntry {
                    customer_uuid: order.customer_uuid,
                    order_uuid: Some(order.uuid),
                    kind: CashbackKind::Usage,
                    amount: order.applied_cashback,
                    description: format!("Cashback used on order {}", order.uuid),
                },
            )
            .await?;

        if !debited {
            return Err(OrdersServiceError::InsufficientCashback);
        }

        tx.commit().await?;

        info!(final_total = record.final_total, "order created");

        Ok(record)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_customer_orders(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .repository
            .list_customer_orders(&mut tx, customer)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn set_payment_session(
        &self,
        order: OrderUuid,
        session_id: String,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .set_payment_session(&mut tx, order, &session_id)
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "orders.service.transition_status",
        skip(self),
        fields(order_uuid = %order),
        err
    )]
    async fn transition_status(
        &self,
        order: OrderUuid,
        to: OrderStatus,
        actor: Actor,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.repository.lock_order(&mut tx, order).await?;

        if let Transition::Apply { from, to } = authorize_transition(record.status, to, actor)? {
            self.repository.update_status(&mut tx, order, to).await?;
            self.apply_side_effects(&mut tx, &record, to).await?;

            info!(%from, %to, "order status changed");

            record.status = to;
        }

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "orders.service.record_payment",
        skip(self, session_id),
        fields(order_uuid = %order),
        err
    )]
    async fn record_payment(
        &self,
        order: OrderUuid,
        session_id: String,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.repository.lock_order(&mut tx, order).await?;

        let transition =
            authorize_transition(record.status, OrderStatus::Paid, Actor::PaymentWebhook)?;

        if let Transition::Apply { to, .. } = transition {
            self.repository.update_status(&mut tx, order, to).await?;
            self.repository
                .set_payment_session(&mut tx, order, &session_id)
                .await?;

            record.status = to;
            record.payment_session_id = Some(session_id);
        }

        tx.commit().await?;

        Ok(record)
    }

    async fn stats(&self) -> Result<OrderStats, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let stats = self.repository.order_stats(&mut tx).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order, taking variant stock and spending the applied
    /// cashback. Nothing is written when either is insufficient.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a single order with its lines.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders matching `filter`, newest first.
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// A customer's orders, newest first.
    async fn list_customer_orders(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Remember the payment processor's checkout session for an order.
    async fn set_payment_session(
        &self,
        order: OrderUuid,
        session_id: String,
    ) -> Result<(), OrdersServiceError>;

    /// Move an order to `to` on behalf of `actor`.
    async fn transition_status(
        &self,
        order: OrderUuid,
        to: OrderStatus,
        actor: Actor,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Mark an order paid from a verified payment notification. Repeated
    /// notifications leave a paid order untouched.
    async fn record_payment(
        &self,
        order: OrderUuid,
        session_id: String,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Back-office dashboard figures.
    async fn stats(&self) -> Result<OrderStats, OrdersServiceError>;
}
