//! Settings Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rusty_money::iso::Currency;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use storefront::settings::StoreSettings;

use crate::{
    database::{amount_param, try_get_amount},
    domain::settings::{
        data::SettingsUpdate, errors::SettingsServiceError, records::SettingsRecord,
    },
};

const GET_SETTINGS_SQL: &str = include_str!("sql/get_settings.sql");
const UPSERT_SETTINGS_SQL: &str = include_str!("sql/upsert_settings.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSettingsRepository;

impl PgSettingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_settings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<SettingsRecord>, sqlx::Error> {
        query_as::<Postgres, SettingsRecord>(GET_SETTINGS_SQL)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Settings as the pricing core consumes them, defaults when none are saved.
    pub(crate) async fn store_settings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        currency: &'static Currency,
    ) -> Result<StoreSettings<'static>, SettingsServiceError> {
        self.get_settings(tx)
            .await?
            .unwrap_or_else(|| SettingsRecord::defaults(currency))
            .to_store_settings(currency)
    }

    #[tracing::instrument(name = "settings.repository.upsert_settings", skip_all, err)]
    pub(crate) async fn upsert_settings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        update: &SettingsUpdate,
    ) -> Result<SettingsRecord, sqlx::Error> {
        query_as::<Postgres, SettingsRecord>(UPSERT_SETTINGS_SQL)
            .bind(&update.store_name)
            .bind(&update.contact_email)
            .bind(&update.origin_postal_code)
            .bind(update.global_discount_percent)
            .bind(update.free_shipping_active)
            .bind(amount_param(
                update.free_shipping_threshold,
                "free_shipping_threshold",
            )?)
            .bind(update.cashback_active)
            .bind(update.cashback_percent)
            .bind(update.pay_on_delivery)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for SettingsRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            store_name: row.try_get("store_name")?,
            contact_email: row.try_get("contact_email")?,
            origin_postal_code: row.try_get("origin_postal_code")?,
            global_discount_percent: row.try_get("global_discount_percent")?,
            free_shipping_active: row.try_get("free_shipping_active")?,
            free_shipping_threshold: try_get_amount(row, "free_shipping_threshold")?,
            cashback_active: row.try_get("cashback_active")?,
            cashback_percent: row.try_get("cashback_percent")?,
            pay_on_delivery: row.try_get("pay_on_delivery")?,
            updated_at: Some(row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff()),
        })
    }
}
