//! Amounts
//!
//! Money crosses the API as unsigned minor units of the store currency.

use rusty_money::{Money, iso::Currency};
use salvo::prelude::StatusError;

use crate::extensions::*;

/// Minor units of a non-negative amount.
pub(crate) fn minor_units(money: &Money<'_, Currency>) -> Result<u64, StatusError> {
    u64::try_from(money.to_minor_units()).or_500("negative amount in response")
}

/// Money from client-submitted minor units.
pub(crate) fn from_minor_units(
    amount: u64,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, StatusError> {
    let minor = i64::try_from(amount)
        .map_err(|_overflow| StatusError::bad_request().brief("Amount is out of range"))?;

    Ok(Money::from_minor(minor, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn converts_between_minor_units_and_money() -> TestResult {
        let money = from_minor_units(12_990, BRL)?;

        assert_eq!(money, Money::from_minor(12_990, BRL));
        assert_eq!(minor_units(&money)?, 12_990);

        Ok(())
    }

    #[test]
    fn rejects_amounts_beyond_signed_range() {
        assert!(from_minor_units(u64::MAX, BRL).is_err());
        assert!(minor_units(&Money::from_minor(-1, BRL)).is_err());
    }
}
