//! Settings Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use storefront::{
    percent::Percent,
    settings::{Cashback, FreeShipping, StoreSettings},
};

use crate::domain::settings::errors::SettingsServiceError;

/// Persisted store settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsRecord {
    pub store_name: String,
    pub contact_email: Option<String>,
    pub origin_postal_code: Option<String>,
    pub global_discount_percent: Decimal,
    pub free_shipping_active: bool,
    pub free_shipping_threshold: u64,
    pub cashback_active: bool,
    pub cashback_percent: Decimal,
    pub pay_on_delivery: bool,

    /// `None` until the back-office first saves settings.
    pub updated_at: Option<Timestamp>,
}

impl SettingsRecord {
    /// Settings in effect before any have been saved.
    #[must_use]
    pub fn defaults(currency: &'static Currency) -> Self {
        let defaults = StoreSettings::defaults(currency);

        Self {
            store_name: defaults.store_name,
            contact_email: defaults.contact_email,
            origin_postal_code: defaults.origin_postal_code,
            global_discount_percent: defaults.global_discount.points(),
            free_shipping_active: defaults.free_shipping.active,
            free_shipping_threshold: u64::try_from(
                defaults.free_shipping.threshold.to_minor_units(),
            )
            .unwrap_or_default(),
            cashback_active: defaults.cashback.active,
            cashback_percent: defaults.cashback.percent.points(),
            pay_on_delivery: defaults.pay_on_delivery,
            updated_at: None,
        }
    }

    /// Convert into the value threaded through pricing and checkout.
    ///
    /// # Errors
    ///
    /// Returns an error when a stored percentage or threshold is out of range.
    pub fn to_store_settings(
        &self,
        currency: &'static Currency,
    ) -> Result<StoreSettings<'static>, SettingsServiceError> {
        let threshold = i64::try_from(self.free_shipping_threshold)
            .map_err(|_overflow| SettingsServiceError::AmountOutOfRange)?;

        Ok(StoreSettings {
            store_name: self.store_name.clone(),
            contact_email: self.contact_email.clone(),
            origin_postal_code: self.origin_postal_code.clone(),
            global_discount: Percent::new(self.global_discount_percent)?,
            free_shipping: FreeShipping {
                active: self.free_shipping_active,
                threshold: Money::from_minor(threshold, currency),
            },
            cashback: Cashback {
                active: self.cashback_active,
                percent: Percent::new(self.cashback_percent)?,
            },
            pay_on_delivery: self.pay_on_delivery,
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_round_trip_into_store_settings() -> TestResult {
        let record = SettingsRecord::defaults(BRL);
        let settings = record.to_store_settings(BRL)?;

        assert_eq!(settings, StoreSettings::defaults(BRL));
        assert_eq!(record.free_shipping_threshold, 25_000);
        assert!(record.updated_at.is_none());

        Ok(())
    }

    #[test]
    fn out_of_range_percent_is_rejected() {
        let record = SettingsRecord {
            cashback_percent: Decimal::from(101),
            ..SettingsRecord::defaults(BRL)
        };

        assert!(matches!(
            record.to_store_settings(BRL),
            Err(SettingsServiceError::InvalidPercent(_))
        ));
    }
}
