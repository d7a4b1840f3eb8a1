//! Shipping
//!
//! Request and response shapes exchanged with the shipping-rate aggregator,
//! and the assembly of the options presented at checkout.

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    cart::{CartError, CartLine, CartSummary},
    money::parse_amount,
    settings::StoreSettings,
};

/// Identifier of the synthesized free shipping option.
pub const FREE_SHIPPING_QUOTE_ID: u32 = 0;

/// Estimated delivery days advertised for free shipping.
pub const FREE_SHIPPING_DELIVERY_DAYS: u32 = 7;

/// Default parcel width, in centimetres.
pub const DEFAULT_WIDTH_CM: Decimal = Decimal::from_parts(11, 0, 0, false, 0);

/// Default parcel height, in centimetres.
pub const DEFAULT_HEIGHT_CM: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Default parcel length, in centimetres.
pub const DEFAULT_LENGTH_CM: Decimal = Decimal::from_parts(16, 0, 0, false, 0);

/// Default parcel weight, in kilograms.
pub const DEFAULT_WEIGHT_KG: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Number of digits in a postal code.
pub const POSTAL_CODE_DIGITS: usize = 8;

/// Errors raised while preparing quotes.
#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    /// Postal code does not have the expected number of digits.
    #[error("postal code must have {POSTAL_CODE_DIGITS} digits")]
    InvalidPostalCode,

    /// The store has no origin postal code configured.
    #[error("store origin postal code is not configured")]
    MissingOrigin,

    /// Nothing to ship.
    #[error("cart is empty")]
    EmptyCart,

    /// No usable option was returned.
    #[error("no shipping options for this postal code")]
    NoOptions,

    /// Wrapped cart pricing error.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// A postal code reduced to its digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Parse a postal code, discarding punctuation such as `01310-100`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidPostalCode`] unless exactly eight digits remain.
    pub fn parse(value: &str) -> Result<Self, QuoteError> {
        let digits: String = value.chars().filter(char::is_ascii_digit).collect();

        if digits.len() != POSTAL_CODE_DIGITS {
            return Err(QuoteError::InvalidPostalCode);
        }

        Ok(Self(digits))
    }

    /// Digits only.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A delivery address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Postal code
    pub postal_code: PostalCode,

    /// Street
    pub street: String,

    /// Street number
    pub number: String,

    /// Apartment, block, etc.
    pub complement: Option<String>,

    /// Neighborhood
    pub neighborhood: String,

    /// City
    pub city: String,

    /// State
    pub state: String,
}

/// One parcel line sent to the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct Parcel<'a> {
    /// Item identifier
    pub id: Uuid,

    /// Width in centimetres
    pub width_cm: Decimal,

    /// Height in centimetres
    pub height_cm: Decimal,

    /// Length in centimetres
    pub length_cm: Decimal,

    /// Weight in kilograms
    pub weight_kg: Decimal,

    /// Declared value of one unit, the resolved price
    pub insurance_value: Money<'a, Currency>,

    /// Units
    pub quantity: u32,
}

impl<'a> Parcel<'a> {
    /// Build a parcel from a cart line, filling absent dimensions with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] when the line price cannot be resolved.
    pub fn from_line(
        line: &CartLine<'a>,
        settings: &StoreSettings<'_>,
    ) -> Result<Self, CartError> {
        let dimensions = line.item.dimensions;

        Ok(Self {
            id: line.item.id,
            width_cm: dimensions.width_cm.unwrap_or(DEFAULT_WIDTH_CM),
            height_cm: dimensions.height_cm.unwrap_or(DEFAULT_HEIGHT_CM),
            length_cm: dimensions.length_cm.unwrap_or(DEFAULT_LENGTH_CM),
            weight_kg: dimensions.weight_kg.unwrap_or(DEFAULT_WEIGHT_KG),
            insurance_value: line.unit_price(settings)?,
            quantity: line.quantity,
        })
    }
}

/// Quote request for the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest<'a> {
    /// Origin postal code
    pub origin: PostalCode,

    /// Destination address
    pub destination: Address,

    /// Parcels
    pub parcels: Vec<Parcel<'a>>,

    /// Carrier service identifiers to quote
    pub services: Vec<u32>,

    /// Declared value of the whole shipment, the cart subtotal
    pub declared_value: Money<'a, Currency>,
}

impl<'a> QuoteRequest<'a> {
    /// Build a request for the given lines.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::EmptyCart`]: there are no lines.
    /// - [`QuoteError::MissingOrigin`]: the store has no origin postal code.
    /// - [`QuoteError::InvalidPostalCode`]: the origin postal code is malformed.
    /// - [`QuoteError::Cart`]: pricing failed.
    pub fn build(
        lines: &[CartLine<'a>],
        destination: Address,
        services: Vec<u32>,
        settings: &StoreSettings<'a>,
        summary: &CartSummary<'a>,
    ) -> Result<Self, QuoteError> {
        if lines.is_empty() {
            return Err(QuoteError::EmptyCart);
        }

        let origin = settings
            .origin_postal_code
            .as_deref()
            .ok_or(QuoteError::MissingOrigin)
            .and_then(PostalCode::parse)?;

        let parcels = lines
            .iter()
            .map(|line| Parcel::from_line(line, settings))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            origin,
            destination,
            parcels,
            services,
            declared_value: summary.subtotal,
        })
    }
}

/// Carrier company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    /// Company identifier
    pub id: u32,

    /// Company name
    pub name: String,

    /// Logo URL
    pub picture: Option<String>,
}

/// Option as returned by the aggregator, possibly carrying an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteOption {
    /// Carrier service identifier
    pub id: u32,

    /// Service name
    pub name: String,

    /// Price as a decimal string
    pub price: Option<String>,

    /// Estimated delivery days
    pub delivery_time: Option<u32>,

    /// Carrier company
    pub company: Option<Carrier>,

    /// Error reported for this service
    pub error: Option<String>,
}

/// A usable shipping option.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingQuote<'a> {
    /// Carrier service identifier
    pub id: u32,

    /// Service name
    pub name: String,

    /// Price
    pub price: Money<'a, Currency>,

    /// Estimated delivery days
    pub delivery_days: u32,

    /// Carrier company
    pub company: Carrier,
}

impl<'a> ShippingQuote<'a> {
    /// The zero-cost option offered when the cart qualifies for free shipping.
    pub fn free_shipping(currency: &'a Currency) -> Self {
        Self {
            id: FREE_SHIPPING_QUOTE_ID,
            name: "Free Shipping".to_owned(),
            price: Money::from_minor(0, currency),
            delivery_days: FREE_SHIPPING_DELIVERY_DAYS,
            company: Carrier {
                id: FREE_SHIPPING_QUOTE_ID,
                name: "Free Shipping".to_owned(),
                picture: None,
            },
        }
    }

    /// Whether this is the synthesized free shipping option.
    pub fn is_free_shipping(&self) -> bool {
        self.id == FREE_SHIPPING_QUOTE_ID
    }

    fn from_option(option: QuoteOption, currency: &'a Currency) -> Option<Self> {
        if option.error.is_some() || option.id == FREE_SHIPPING_QUOTE_ID {
            return None;
        }

        let price = parse_amount(option.price.as_deref()?, currency).ok()?;

        if price.to_minor_units() < 0 {
            return None;
        }

        let company = option.company.unwrap_or_else(|| Carrier {
            id: option.id,
            name: option.name.clone(),
            picture: None,
        });

        Some(Self {
            id: option.id,
            name: option.name,
            price,
            delivery_days: option.delivery_time.unwrap_or_default(),
            company,
        })
    }
}

/// Turn aggregator options into the list shown at checkout.
///
/// Options carrying an error, or without a usable price, are dropped. When
/// the cart qualifies, a free shipping option is placed first.
///
/// # Errors
///
/// Returns [`QuoteError::NoOptions`] when nothing usable remains.
pub fn assemble_quotes<'a>(
    options: Vec<QuoteOption>,
    summary: &CartSummary<'a>,
) -> Result<Vec<ShippingQuote<'a>>, QuoteError> {
    let currency = summary.subtotal.currency();

    let mut quotes = Vec::with_capacity(options.len() + 1);

    if summary.free_shipping_eligible {
        quotes.push(ShippingQuote::free_shipping(currency));
    }

    quotes.extend(
        options
            .into_iter()
            .filter_map(|option| ShippingQuote::from_option(option, currency)),
    );

    if quotes.is_empty() {
        return Err(QuoteError::NoOptions);
    }

    Ok(quotes)
}
