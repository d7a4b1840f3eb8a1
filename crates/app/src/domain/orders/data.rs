//! Order Data

use rusty_money::{Money, iso::Currency};
use storefront::{
    cart::CartLine,
    checkout::{CheckoutTotals, Customer, PaymentMethod},
    orders::OrderStatus,
    settings::StoreSettings,
    shipping::ShippingQuote,
};

use crate::domain::{
    carts::records::CartUuid,
    customers::records::CustomerUuid,
    orders::{
        errors::OrdersServiceError,
        records::{OrderUuid, ShippingSelection},
    },
    products::records::{ProductUuid, VariantUuid},
};

const DEFAULT_VARIANT_DESCRIPTION: &str = "Standard";

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub customer_uuid: CustomerUuid,
    pub cart_uuid: Option<CartUuid>,
    pub customer: Customer,
    pub shipping: ShippingSelection,
    pub shipping_cost: u64,
    pub subtotal: u64,
    pub total_before_cashback: u64,
    pub applied_cashback: u64,
    pub final_total: u64,
    pub payment_method: PaymentMethod,
    pub lines: Vec<NewOrderLine>,
}

/// New Order Line Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
    pub name: String,
    pub variant_description: String,
    pub image_url: Option<String>,
    pub unit_price: u64,
    pub quantity: u32,
}

/// Everything checkout settled on, borrowed from the checkout flow.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutSnapshot<'s, 'a> {
    pub quote: &'s ShippingQuote<'a>,
    pub totals: &'s CheckoutTotals<'a>,
    pub payment_method: PaymentMethod,
    pub lines: &'s [CartLine<'a>],
    pub settings: &'s StoreSettings<'a>,
}

impl NewOrder {
    /// Snapshot a completed checkout into an order. Line prices are the
    /// resolved prices at this moment.
    ///
    /// # Errors
    ///
    /// - [`OrdersServiceError::MissingRequiredData`]: there are no lines.
    /// - [`OrdersServiceError::InvalidPrice`]: an amount is negative.
    /// - [`OrdersServiceError::Cart`]: a line price cannot be resolved.
    pub fn from_checkout(
        uuid: OrderUuid,
        customer_uuid: CustomerUuid,
        cart_uuid: Option<CartUuid>,
        customer: Customer,
        snapshot: CheckoutSnapshot<'_, '_>,
    ) -> Result<Self, OrdersServiceError> {
        if snapshot.lines.is_empty() {
            return Err(OrdersServiceError::MissingRequiredData);
        }

        let lines = snapshot
            .lines
            .iter()
            .map(|line| -> Result<_, OrdersServiceError> {
                Ok(NewOrderLine {
                    product_uuid: ProductUuid::from_uuid(line.item.id),
                    variant_uuid: line.variant.as_ref().map(|v| VariantUuid::from_uuid(v.id)),
                    name: line.item.name.clone(),
                    variant_description: line.variant.as_ref().map_or_else(
                        || DEFAULT_VARIANT_DESCRIPTION.to_owned(),
                        storefront::catalog::Variant::description,
                    ),
                    image_url: line
                        .variant
                        .as_ref()
                        .and_then(|v| v.image_url.clone())
                        .or_else(|| line.item.image_url.clone()),
                    unit_price: minor(line.unit_price(snapshot.settings)?)?,
                    quantity: line.quantity,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let totals = snapshot.totals;

        Ok(Self {
            uuid,
            customer_uuid,
            cart_uuid,
            customer,
            shipping: ShippingSelection {
                service_id: snapshot.quote.id,
                name: snapshot.quote.name.clone(),
                company: snapshot.quote.company.name.clone(),
                delivery_days: snapshot.quote.delivery_days,
            },
            shipping_cost: minor(totals.shipping_cost)?,
            subtotal: minor(totals.subtotal)?,
            total_before_cashback: minor(totals.total_before_cashback)?,
            applied_cashback: minor(totals.applied_cashback)?,
            final_total: minor(totals.final_total)?,
            payment_method: snapshot.payment_method,
            lines,
        })
    }
}

fn minor(money: Money<'_, Currency>) -> Result<u64, OrdersServiceError> {
    Ok(u64::try_from(money.to_minor_units())?)
}

/// Order listing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,

    /// Matches an order id prefix, or part of the e-mail or name
    pub search: Option<String>,
    pub limit: u32,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            limit: 100,
        }
    }
}
