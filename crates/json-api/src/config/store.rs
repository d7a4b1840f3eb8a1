//! Store Config

use clap::Args;
use rusty_money::iso::{self, Currency};

use crate::config::ConfigError;

/// Store-wide process settings. Shopper-facing settings such as discounts
/// live in the database instead.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// ISO 4217 currency every price is expressed in
    #[arg(long = "store-currency", env = "STORE_CURRENCY", default_value = "BRL")]
    pub currency: String,

    /// Where shoppers land after paying
    #[arg(long, env = "CHECKOUT_SUCCESS_URL")]
    pub checkout_success_url: String,

    /// Where shoppers land after abandoning the payment page
    #[arg(long, env = "CHECKOUT_CANCEL_URL")]
    pub checkout_cancel_url: String,
}

impl StoreConfig {
    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns an error when the code is not a known currency.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        iso::find(self.currency.trim())
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn store(currency: &str) -> StoreConfig {
        StoreConfig {
            currency: currency.to_owned(),
            checkout_success_url: "https://shop.example/success".to_owned(),
            checkout_cancel_url: "https://shop.example/cart".to_owned(),
        }
    }

    #[test]
    fn resolves_iso_codes() -> TestResult {
        assert_eq!(store("BRL").currency()?.iso_alpha_code, "BRL");
        assert_eq!(store(" USD ").currency()?.iso_alpha_code, "USD");

        Ok(())
    }

    #[test]
    fn rejects_unknown_codes() {
        assert!(matches!(
            store("XYZ").currency(),
            Err(ConfigError::UnknownCurrency(code)) if code == "XYZ"
        ));
    }
}
