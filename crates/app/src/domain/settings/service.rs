//! Settings service.

use async_trait::async_trait;
use mockall::automock;
use rusty_money::iso::Currency;
use storefront::{percent::Percent, shipping::PostalCode};

use crate::{
    database::Db,
    domain::settings::{
        data::SettingsUpdate, errors::SettingsServiceError, records::SettingsRecord,
        repository::PgSettingsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgSettingsService {
    db: Db,
    repository: PgSettingsRepository,
    currency: &'static Currency,
}

impl PgSettingsService {
    #[must_use]
    pub fn new(db: Db, currency: &'static Currency) -> Self {
        Self {
            db,
            repository: PgSettingsRepository::new(),
            currency,
        }
    }
}

#[async_trait]
impl SettingsService for PgSettingsService {
    async fn get_settings(&self) -> Result<SettingsRecord, SettingsServiceError> {
        let mut tx = self.db.begin().await?;

        let settings = self.repository.get_settings(&mut tx).await?;

        tx.commit().await?;

        Ok(settings.unwrap_or_else(|| SettingsRecord::defaults(self.currency)))
    }

    async fn update_settings(
        &self,
        update: SettingsUpdate,
    ) -> Result<SettingsRecord, SettingsServiceError> {
        validate_update(&update)?;

        let mut tx = self.db.begin().await?;

        let settings = self.repository.upsert_settings(&mut tx, &update).await?;

        tx.commit().await?;

        Ok(settings)
    }
}

fn validate_update(update: &SettingsUpdate) -> Result<(), SettingsServiceError> {
    Percent::new(update.global_discount_percent)?;
    Percent::new(update.cashback_percent)?;

    if i64::try_from(update.free_shipping_threshold).is_err() {
        return Err(SettingsServiceError::AmountOutOfRange);
    }

    if let Some(postal_code) = update.origin_postal_code.as_deref() {
        PostalCode::parse(postal_code).map_err(|_invalid| SettingsServiceError::InvalidPostalCode)?;
    }

    Ok(())
}

#[automock]
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Current settings, falling back to defaults when none are saved.
    async fn get_settings(&self) -> Result<SettingsRecord, SettingsServiceError>;

    /// Replace the store settings.
    async fn update_settings(
        &self,
        update: SettingsUpdate,
    ) -> Result<SettingsRecord, SettingsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::BRL;

    use super::*;

    fn update() -> SettingsUpdate {
        let defaults = SettingsRecord::defaults(BRL);

        SettingsUpdate {
            store_name: defaults.store_name,
            contact_email: Some("hello@example.com".to_owned()),
            origin_postal_code: Some("01310-100".to_owned()),
            global_discount_percent: Decimal::from(10),
            free_shipping_active: true,
            free_shipping_threshold: 25_000,
            cashback_active: true,
            cashback_percent: Decimal::from(5),
            pay_on_delivery: false,
        }
    }

    #[test]
    fn valid_update_passes() {
        assert!(validate_update(&update()).is_ok());
    }

    #[test]
    fn discount_above_one_hundred_is_rejected() {
        let update = SettingsUpdate {
            global_discount_percent: Decimal::from(120),
            ..update()
        };

        assert!(matches!(
            validate_update(&update),
            Err(SettingsServiceError::InvalidPercent(_))
        ));
    }

    #[test]
    fn malformed_origin_postal_code_is_rejected() {
        let update = SettingsUpdate {
            origin_postal_code: Some("123".to_owned()),
            ..update()
        };

        assert!(matches!(
            validate_update(&update),
            Err(SettingsServiceError::InvalidPostalCode)
        ));
    }
}
