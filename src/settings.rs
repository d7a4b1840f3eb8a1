//! Store Settings
//!
//! Store-wide configuration maintained through the back-office. A value of
//! [`StoreSettings`] is read once per request and passed explicitly into the
//! pricing, cart and checkout functions.

use rusty_money::{Money, iso::Currency};

use crate::percent::{Percent, PercentError};

/// Default free shipping threshold, in major units.
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: i64 = 250;

/// Default cashback percentage points.
pub const DEFAULT_CASHBACK_POINTS: u32 = 5;

/// Free shipping rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeShipping<'a> {
    /// Whether free shipping is offered at all
    pub active: bool,

    /// Minimum subtotal that qualifies
    pub threshold: Money<'a, Currency>,
}

impl FreeShipping<'_> {
    /// Whether a subtotal qualifies for free shipping.
    pub fn is_eligible(&self, subtotal: &Money<'_, Currency>) -> bool {
        self.active && subtotal.to_minor_units() >= self.threshold.to_minor_units()
    }
}

/// Cashback rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cashback {
    /// Whether cashback is credited on delivered orders
    pub active: bool,

    /// Share of the items subtotal credited
    pub percent: Percent,
}

impl Cashback {
    /// Cashback earned on an items subtotal; zero when cashback is inactive.
    ///
    /// # Errors
    ///
    /// Returns [`PercentError::Overflow`] when the calculation overflows.
    pub fn earned_on<'a>(
        &self,
        subtotal: Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, PercentError> {
        if !self.active {
            return Ok(Money::from_minor(0, subtotal.currency()));
        }

        self.percent.portion_of(subtotal)
    }
}

/// Store-wide settings.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSettings<'a> {
    /// Store display name
    pub store_name: String,

    /// Contact e-mail, also used to identify the store to the shipping aggregator
    pub contact_email: Option<String>,

    /// Postal code parcels ship from
    pub origin_postal_code: Option<String>,

    /// Fallback discount for items without their own
    pub global_discount: Percent,

    /// Free shipping rule
    pub free_shipping: FreeShipping<'a>,

    /// Cashback rule
    pub cashback: Cashback,

    /// Whether shoppers may pay on delivery
    pub pay_on_delivery: bool,
}

impl<'a> StoreSettings<'a> {
    /// Settings used before the back-office has saved any.
    ///
    /// Cashback is active at 5%, free shipping is inactive with a threshold
    /// of 250 in the store currency, there is no global discount and pay on
    /// delivery is disabled.
    pub fn defaults(currency: &'a Currency) -> Self {
        let threshold_minor =
            DEFAULT_FREE_SHIPPING_THRESHOLD.saturating_mul(10_i64.pow(currency.exponent));

        Self {
            store_name: "Storefront".to_owned(),
            contact_email: None,
            origin_postal_code: None,
            global_discount: Percent::ZERO,
            free_shipping: FreeShipping {
                active: false,
                threshold: Money::from_minor(threshold_minor, currency),
            },
            cashback: Cashback {
                active: true,
                percent: Percent::from_points(DEFAULT_CASHBACK_POINTS).unwrap_or(Percent::ZERO),
            },
            pay_on_delivery: false,
        }
    }

    /// Store currency.
    pub fn currency(&self) -> &'a Currency {
        self.free_shipping.threshold.currency()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_match_fresh_store() -> TestResult {
        let settings = StoreSettings::defaults(BRL);

        assert!(settings.cashback.active);
        assert_eq!(settings.cashback.percent, Percent::from_points(5)?);
        assert!(!settings.free_shipping.active);
        assert_eq!(
            settings.free_shipping.threshold,
            Money::from_minor(250_00, BRL)
        );
        assert!(settings.global_discount.is_zero());
        assert!(!settings.pay_on_delivery);
        assert_eq!(settings.currency(), BRL);

        Ok(())
    }

    #[test]
    fn free_shipping_requires_active_flag() {
        let rule = FreeShipping {
            active: false,
            threshold: Money::from_minor(250_00, BRL),
        };

        assert!(!rule.is_eligible(&Money::from_minor(1_000_00, BRL)));
    }

    #[test]
    fn free_shipping_threshold_is_inclusive() {
        let rule = FreeShipping {
            active: true,
            threshold: Money::from_minor(250_00, BRL),
        };

        assert!(rule.is_eligible(&Money::from_minor(250_00, BRL)));
        assert!(!rule.is_eligible(&Money::from_minor(249_99, BRL)));
    }

    #[test]
    fn cashback_earned_on_subtotal() -> TestResult {
        let mut cashback = Cashback {
            active: true,
            percent: Percent::from_points(5)?,
        };

        assert_eq!(
            cashback.earned_on(Money::from_minor(300_00, BRL))?,
            Money::from_minor(15_00, BRL)
        );

        cashback.active = false;

        assert_eq!(
            cashback.earned_on(Money::from_minor(300_00, BRL))?,
            Money::from_minor(0, BRL)
        );

        Ok(())
    }
}
