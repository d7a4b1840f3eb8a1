//! Cart Handlers

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use storefront::{cart::CartSummary, pricing::display_price};
use uuid::Uuid;

use storefront_app::domain::carts::PricedCart;

use crate::{amounts::minor_units, extensions::*};

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod quotes;

/// Priced Cart
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub uuid: Uuid,
    pub lines: Vec<CartLineResponse>,
    pub summary: CartSummaryResponse,
    pub updated_at: String,
}

/// Cart Line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub product_uuid: Uuid,
    pub variant_uuid: Option<Uuid>,
    pub name: String,

    /// Colour and size, when bought in a variant
    pub variant: Option<String>,
    pub image_url: Option<String>,
    pub quantity: u32,

    /// Price charged per unit, in minor units
    pub unit_price: u64,

    /// Base price to show struck through, when higher than the unit price
    pub original_price: Option<u64>,
    pub total: u64,
}

/// Cart Totals
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartSummaryResponse {
    pub subtotal: u64,
    pub free_shipping_eligible: bool,

    /// Spend still missing for free shipping; zero when eligible or disabled
    pub amount_to_free_shipping: u64,
    pub item_count: u64,
}

impl TryFrom<&CartSummary<'_>> for CartSummaryResponse {
    type Error = StatusError;

    fn try_from(summary: &CartSummary<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            subtotal: minor_units(&summary.subtotal)?,
            free_shipping_eligible: summary.free_shipping_eligible,
            amount_to_free_shipping: minor_units(&summary.amount_to_free_shipping)?,
            item_count: summary.item_count,
        })
    }
}

impl TryFrom<PricedCart> for CartResponse {
    type Error = StatusError;

    fn try_from(priced: PricedCart) -> Result<Self, Self::Error> {
        let settings = &priced.settings;

        let lines = priced
            .lines
            .iter()
            .map(|line| {
                let display = display_price(
                    &line.item,
                    line.variant.as_ref(),
                    settings.global_discount,
                )
                .or_500("failed to price cart line")?;

                Ok(CartLineResponse {
                    product_uuid: line.item.id,
                    variant_uuid: line.variant.as_ref().map(|variant| variant.id),
                    name: line.item.name.clone(),
                    variant: line.variant.as_ref().map(|variant| variant.description()),
                    image_url: line
                        .variant
                        .as_ref()
                        .and_then(|variant| variant.image_url.clone())
                        .or_else(|| line.item.image_url.clone()),
                    quantity: line.quantity,
                    unit_price: minor_units(&display.price)?,
                    original_price: display.original.as_ref().map(minor_units).transpose()?,
                    total: minor_units(&line.total(settings).or_500("failed to total cart line")?)?,
                })
            })
            .collect::<Result<_, StatusError>>()?;

        Ok(Self {
            uuid: priced.cart.uuid.into_uuid(),
            lines,
            summary: CartSummaryResponse::try_from(&priced.summary)?,
            updated_at: priced.cart.updated_at.to_string(),
        })
    }
}
