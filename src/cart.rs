//! Cart
//!
//! Cart lines keyed by `(item, variant)` and the aggregation of a line set
//! into a subtotal with free shipping eligibility.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    catalog::{CatalogItem, Variant},
    pricing::{PricingError, resolve_price},
    settings::StoreSettings,
};

/// Errors that can occur while building or aggregating a cart.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Quantities must be at least one when adding.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The chosen variant belongs to another item.
    #[error("variant {variant} does not belong to item {item}")]
    VariantMismatch {
        /// Item identifier
        item: Uuid,
        /// Variant identifier
        variant: Uuid,
    },

    /// Items sold in variants must be added with one.
    #[error("item {0} requires a variant")]
    VariantRequired(Uuid),

    /// No line with the given key.
    #[error("line not found in cart")]
    LineNotFound,

    /// Line total overflowed.
    #[error("line total overflowed")]
    Overflow,

    /// Wrapped price resolution error.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Identity of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    /// Item identifier
    pub item: Uuid,

    /// Variant identifier, when the item sells in variants
    pub variant: Option<Uuid>,
}

/// A cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    /// Item
    pub item: CatalogItem<'a>,

    /// Chosen variant
    pub variant: Option<Variant<'a>>,

    /// Quantity, at least one
    pub quantity: u32,
}

impl<'a> CartLine<'a> {
    /// Create a line, checking the variant belongs to the item.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::VariantMismatch`]: the variant belongs to another item.
    pub fn new(
        item: CatalogItem<'a>,
        variant: Option<Variant<'a>>,
        quantity: u32,
    ) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if let Some(variant) = &variant
            && variant.item_id != item.id
        {
            return Err(CartError::VariantMismatch {
                item: item.id,
                variant: variant.id,
            });
        }

        Ok(Self {
            item,
            variant,
            quantity,
        })
    }

    /// Line identity.
    pub fn key(&self) -> LineKey {
        LineKey {
            item: self.item.id,
            variant: self.variant.as_ref().map(|variant| variant.id),
        }
    }

    /// Resolved unit price.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] when price resolution fails.
    pub fn unit_price(
        &self,
        settings: &StoreSettings<'_>,
    ) -> Result<Money<'a, Currency>, CartError> {
        Ok(resolve_price(
            &self.item,
            self.variant.as_ref(),
            settings.global_discount,
        )?)
    }

    /// Resolved unit price times quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::Pricing`]: price resolution failed.
    /// - [`CartError::Overflow`]: the line total does not fit in minor units.
    pub fn total(&self, settings: &StoreSettings<'_>) -> Result<Money<'a, Currency>, CartError> {
        let unit = self.unit_price(settings)?;

        let minor = unit
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(CartError::Overflow)?;

        Ok(Money::from_minor(minor, unit.currency()))
    }
}

/// Result of aggregating cart lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartSummary<'a> {
    /// Sum of resolved line totals
    pub subtotal: Money<'a, Currency>,

    /// Whether free shipping applies
    pub free_shipping_eligible: bool,

    /// How much more must be spent to reach the threshold, never negative
    pub amount_to_free_shipping: Money<'a, Currency>,

    /// Total units across lines
    pub item_count: u64,
}

/// Aggregate lines into a subtotal and free shipping eligibility.
///
/// Pure and independent of line order.
///
/// # Errors
///
/// - [`CartError::Pricing`]: price resolution failed.
/// - [`CartError::Overflow`]: a line total overflowed.
/// - [`CartError::Money`]: lines are priced in a currency other than the store's.
pub fn aggregate<'a>(
    lines: &[CartLine<'a>],
    settings: &StoreSettings<'a>,
) -> Result<CartSummary<'a>, CartError> {
    let currency = settings.currency();

    let subtotal = lines.iter().try_fold(
        Money::from_minor(0, currency),
        |acc, line| -> Result<_, CartError> { Ok(acc.add(line.total(settings)?)?) },
    )?;

    let threshold = settings.free_shipping.threshold;
    let remaining = threshold
        .to_minor_units()
        .saturating_sub(subtotal.to_minor_units())
        .max(0);

    Ok(CartSummary {
        subtotal,
        free_shipping_eligible: settings.free_shipping.is_eligible(&subtotal),
        amount_to_free_shipping: Money::from_minor(remaining, currency),
        item_count: lines.iter().map(|line| u64::from(line.quantity)).sum(),
    })
}

/// An in-memory cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
}

impl<'a> Cart<'a> {
    /// Empty cart.
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units. Adding an existing `(item, variant)` pair
    /// increments that line instead of creating another.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::VariantRequired`]: the item sells in variants and none was chosen.
    /// - [`CartError::VariantMismatch`]: the variant belongs to another item.
    /// - [`CartError::Overflow`]: the merged quantity overflowed.
    pub fn add(
        &mut self,
        item: CatalogItem<'a>,
        variant: Option<Variant<'a>>,
        quantity: u32,
    ) -> Result<LineKey, CartError> {
        if variant.is_none() && item.has_variants() {
            return Err(CartError::VariantRequired(item.id));
        }

        let line = CartLine::new(item, variant, quantity)?;
        let key = line.key();

        if let Some(existing) = self.lines.iter_mut().find(|existing| existing.key() == key) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CartError::Overflow)?;
        } else {
            self.lines.push(line);
        }

        Ok(key)
    }

    /// Set the quantity of a line. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] when no line matches `key`.
    pub fn update_quantity(&mut self, key: LineKey, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return if self.remove(key) {
                Ok(())
            } else {
                Err(CartError::LineNotFound)
            };
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.key() == key)
            .ok_or(CartError::LineNotFound)?;

        line.quantity = quantity;

        Ok(())
    }

    /// Remove a line, returning whether one was removed.
    pub fn remove(&mut self, key: LineKey) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.key() != key);

        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Aggregate the cart under `settings`.
    ///
    /// # Errors
    ///
    /// See [`aggregate`].
    pub fn summary(&self, settings: &StoreSettings<'a>) -> Result<CartSummary<'a>, CartError> {
        aggregate(&self.lines, settings)
    }
}
