//! Prices
//!
//! Resolves the single price charged for an item, optionally in a chosen
//! variant. Precedence, highest first:
//!
//! 1. the variant's own price, when positive;
//! 2. the item's discount price, when positive;
//! 3. the base price reduced by the store-wide discount, when that discount is positive;
//! 4. the base price.
//!
//! The store-wide discount is a fallback for items without their own
//! discount and never stacks on top of a variant or item price. Non-positive
//! prices are treated as absent.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::{CatalogItem, Variant},
    money::is_positive,
    percent::{Percent, PercentError},
};

/// Errors that can occur while resolving prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A negative price was submitted for storage.
    #[error("price cannot be negative: {0}")]
    NegativePrice(i64),

    /// A discount price must be lower than the base price.
    #[error("discount price must be lower than the base price")]
    DiscountNotLower,

    /// Wrapped percentage arithmetic error.
    #[error(transparent)]
    Percent(#[from] PercentError),
}

/// A resolved price with the struck-through original, when it is lower than base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceDisplay<'a> {
    /// Price to charge
    pub price: Money<'a, Currency>,

    /// Base price to show struck through, present only when `price` is lower
    pub original: Option<Money<'a, Currency>>,
}

/// Resolve the price charged for `item`, optionally in `variant`.
///
/// # Errors
///
/// Returns [`PricingError::Percent`] when applying the store-wide discount overflows.
pub fn resolve_price<'a>(
    item: &CatalogItem<'a>,
    variant: Option<&Variant<'a>>,
    global_discount: Percent,
) -> Result<Money<'a, Currency>, PricingError> {
    if let Some(price) = variant.and_then(|variant| variant.price).filter(is_positive) {
        return Ok(price);
    }

    if let Some(price) = item.discount_price.filter(is_positive) {
        return Ok(price);
    }

    if !global_discount.is_zero() {
        return Ok(global_discount.discount(item.price)?);
    }

    Ok(item.price)
}

/// Resolve a price together with the original to display next to it.
///
/// # Errors
///
/// Returns [`PricingError::Percent`] when applying the store-wide discount overflows.
pub fn display_price<'a>(
    item: &CatalogItem<'a>,
    variant: Option<&Variant<'a>>,
    global_discount: Percent,
) -> Result<PriceDisplay<'a>, PricingError> {
    let price = resolve_price(item, variant, global_discount)?;

    let original = (price.to_minor_units() < item.price.to_minor_units()).then_some(item.price);

    Ok(PriceDisplay { price, original })
}

/// Validate a price entered through the back-office, in minor units.
///
/// # Errors
///
/// Returns [`PricingError::NegativePrice`] for negative amounts.
pub fn validate_price(minor: i64) -> Result<u64, PricingError> {
    u64::try_from(minor).map_err(|_negative| PricingError::NegativePrice(minor))
}

/// Validate an optional discount price against the base price, in minor units.
///
/// # Errors
///
/// - [`PricingError::NegativePrice`]: the discount price is negative.
/// - [`PricingError::DiscountNotLower`]: the discount price is not below the base price.
pub fn validate_discount_price(
    base: u64,
    discount: Option<i64>,
) -> Result<Option<u64>, PricingError> {
    let Some(discount) = discount else {
        return Ok(None);
    };

    let discount = validate_price(discount)?;

    if discount >= base {
        return Err(PricingError::DiscountNotLower);
    }

    Ok(Some(discount))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    fn item(base: i64) -> CatalogItem<'static> {
        CatalogItem::new(Uuid::now_v7(), "Dress", Money::from_minor(base, BRL))
    }

    fn variant_priced(item: &CatalogItem<'static>, price: Option<i64>) -> Variant<'static> {
        Variant {
            id: Uuid::now_v7(),
            item_id: item.id,
            color: None,
            color_name: Some("Blue".to_owned()),
            size: Some("P".to_owned()),
            price: price.map(|minor| Money::from_minor(minor, BRL)),
            stock: 3,
            image_url: None,
        }
    }

    #[test]
    fn item_discount_wins_over_global_discount() -> TestResult {
        let item = item(100_00).with_discount_price(Money::from_minor(80_00, BRL));

        let price = resolve_price(&item, None, Percent::from_points(10)?)?;

        assert_eq!(price, Money::from_minor(80_00, BRL));

        Ok(())
    }

    #[test]
    fn global_discount_applies_without_item_discount() -> TestResult {
        let price = resolve_price(&item(100_00), None, Percent::from_points(10)?)?;

        assert_eq!(price, Money::from_minor(90_00, BRL));

        Ok(())
    }

    #[test]
    fn variant_price_wins_over_item_discount() -> TestResult {
        let item = item(100_00).with_discount_price(Money::from_minor(30_00, BRL));
        let variant = variant_priced(&item, Some(50_00));

        let price = resolve_price(&item, Some(&variant), Percent::from_points(25)?)?;

        assert_eq!(price, Money::from_minor(50_00, BRL));

        Ok(())
    }

    #[test]
    fn variant_without_price_falls_back_to_item() -> TestResult {
        let item = item(100_00).with_discount_price(Money::from_minor(70_00, BRL));
        let variant = variant_priced(&item, None);

        let price = resolve_price(&item, Some(&variant), Percent::ZERO)?;

        assert_eq!(price, Money::from_minor(70_00, BRL));

        Ok(())
    }

    #[test]
    fn non_positive_prices_are_treated_as_absent() -> TestResult {
        let item = item(100_00).with_discount_price(Money::from_minor(-5_00, BRL));
        let variant = variant_priced(&item, Some(0));

        let price = resolve_price(&item, Some(&variant), Percent::from_points(20)?)?;

        assert_eq!(price, Money::from_minor(80_00, BRL));

        Ok(())
    }

    #[test]
    fn base_price_without_any_discount() -> TestResult {
        assert_eq!(
            resolve_price(&item(42_00), None, Percent::ZERO)?,
            Money::from_minor(42_00, BRL)
        );

        Ok(())
    }

    #[test]
    fn display_price_shows_original_only_when_lower() -> TestResult {
        let discounted = item(100_00).with_discount_price(Money::from_minor(80_00, BRL));
        let display = display_price(&discounted, None, Percent::ZERO)?;

        assert_eq!(display.original, Some(Money::from_minor(100_00, BRL)));

        let plain = display_price(&item(100_00), None, Percent::ZERO)?;

        assert_eq!(plain.original, None);

        // A variant priced above base shows no struck-through price.
        let base = item(100_00);
        let premium = variant_priced(&base, Some(120_00));
        let display = display_price(&base, Some(&premium), Percent::ZERO)?;

        assert_eq!(display.price, Money::from_minor(120_00, BRL));
        assert_eq!(display.original, None);

        Ok(())
    }

    #[test]
    fn validate_price_rejects_negative() {
        assert_eq!(validate_price(-1), Err(PricingError::NegativePrice(-1)));
        assert_eq!(validate_price(10_00), Ok(10_00));
    }

    #[test]
    fn validate_discount_price_must_be_lower() {
        assert_eq!(validate_discount_price(100_00, None), Ok(None));
        assert_eq!(validate_discount_price(100_00, Some(80_00)), Ok(Some(80_00)));
        assert_eq!(
            validate_discount_price(100_00, Some(100_00)),
            Err(PricingError::DiscountNotLower)
        );
    }
}
