//! Percentages

use std::fmt;

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors raised by percentage construction and arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PercentError {
    /// Percentage outside of the inclusive `0..=100` range.
    #[error("percentage must be between 0 and 100, got {0}")]
    OutOfRange(Decimal),

    /// The calculation overflowed minor units.
    #[error("percentage calculation overflowed")]
    Overflow,
}

/// A percentage between 0 and 100 inclusive, e.g. `Percent(10)` is 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// One hundred percent.
    pub const ONE_HUNDRED: Self = Self(Decimal::ONE_HUNDRED);

    /// Create a percentage from percentage points.
    ///
    /// # Errors
    ///
    /// Returns [`PercentError::OutOfRange`] when `points` is negative or above 100.
    pub fn new(points: Decimal) -> Result<Self, PercentError> {
        if points < Decimal::ZERO || points > Decimal::ONE_HUNDRED {
            return Err(PercentError::OutOfRange(points));
        }

        Ok(Self(points.normalize()))
    }

    /// Create a percentage from whole percentage points.
    ///
    /// # Errors
    ///
    /// Returns [`PercentError::OutOfRange`] when `points` is above 100.
    pub fn from_points(points: u32) -> Result<Self, PercentError> {
        Self::new(Decimal::from(points))
    }

    /// Percentage points, e.g. `10` for 10%.
    #[must_use]
    pub const fn points(&self) -> Decimal {
        self.0
    }

    /// Whether the percentage is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// This percentage of `money`, rounded to the minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`PercentError::Overflow`] when the result does not fit in minor units.
    pub fn portion_of<'a>(
        &self,
        money: Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, PercentError> {
        let minor = percent_of_minor(self.0, money.to_minor_units())?;

        Ok(Money::from_minor(minor, money.currency()))
    }

    /// `money` reduced by this percentage, rounded to the minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`PercentError::Overflow`] when the result does not fit in minor units.
    pub fn discount<'a>(
        &self,
        money: Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, PercentError> {
        let remaining = Decimal::ONE_HUNDRED - self.0;
        let minor = percent_of_minor(remaining, money.to_minor_units())?;

        Ok(Money::from_minor(minor, money.currency()))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = PercentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn percent_of_minor(points: Decimal, minor: i64) -> Result<i64, PercentError> {
    let Some(minor) = Decimal::from_i64(minor) else {
        return Err(PercentError::Overflow);
    };

    let applied = points
        .checked_mul(minor)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(PercentError::Overflow)?;

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PercentError::Overflow)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_rejects_values_outside_range() {
        assert_eq!(
            Percent::new(Decimal::NEGATIVE_ONE),
            Err(PercentError::OutOfRange(Decimal::NEGATIVE_ONE))
        );
        assert_eq!(
            Percent::new(Decimal::new(10_001, 2)),
            Err(PercentError::OutOfRange(Decimal::new(10_001, 2)))
        );
    }

    #[test]
    fn new_accepts_bounds() -> TestResult {
        assert!(Percent::new(Decimal::ZERO)?.is_zero());
        assert_eq!(Percent::new(Decimal::ONE_HUNDRED)?, Percent::ONE_HUNDRED);

        Ok(())
    }

    #[test]
    fn discount_reduces_by_percentage() -> TestResult {
        let ten = Percent::from_points(10)?;

        assert_eq!(
            ten.discount(Money::from_minor(100_00, BRL))?,
            Money::from_minor(90_00, BRL)
        );

        Ok(())
    }

    #[test]
    fn portion_rounds_midpoint_away_from_zero() -> TestResult {
        let five = Percent::from_points(5)?;

        // 5% of 0.50 is 0.025
        assert_eq!(
            five.portion_of(Money::from_minor(50, BRL))?,
            Money::from_minor(3, BRL)
        );

        Ok(())
    }

    #[test]
    fn fractional_points_are_supported() -> TestResult {
        let percent = Percent::new(Decimal::new(125, 1))?;

        assert_eq!(
            percent.portion_of(Money::from_minor(200_00, BRL))?,
            Money::from_minor(25_00, BRL)
        );
        assert_eq!(percent.to_string(), "12.5%");

        Ok(())
    }
}
