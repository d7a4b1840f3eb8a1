//! Order Records

use jiff::Timestamp;
use storefront::{checkout::PaymentMethod, orders::OrderStatus, shipping::Address};

use crate::{
    domain::{
        carts::records::CartUuid,
        customers::records::CustomerUuid,
        products::records::{ProductUuid, VariantUuid},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Line UUID
pub type OrderLineUuid = TypedUuid<OrderLineRecord>;

/// Shipping option chosen at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingSelection {
    /// Aggregator service identifier, zero for free shipping
    pub service_id: u32,
    pub name: String,
    pub company: String,
    pub delivery_days: u32,
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer_uuid: CustomerUuid,

    /// Cart the order was placed from, cleared once payment settles
    pub cart_uuid: Option<CartUuid>,
    pub email: String,
    pub full_name: String,
    pub document: String,
    pub phone: Option<String>,
    pub address: Address,
    pub shipping: ShippingSelection,
    pub shipping_cost: u64,
    pub subtotal: u64,
    pub total_before_cashback: u64,
    pub applied_cashback: u64,
    pub final_total: u64,
    pub payment_method: PaymentMethod,
    pub payment_session_id: Option<String>,
    pub status: OrderStatus,
    pub lines: Vec<OrderLineRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Line Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineRecord {
    pub uuid: OrderLineUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
    pub name: String,
    pub variant_description: String,
    pub image_url: Option<String>,
    pub unit_price: u64,
    pub quantity: u32,
}

/// Back-office dashboard figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total_orders: u64,
    pub processing_orders: u64,
    pub paid_orders: u64,
    pub total_customers: u64,
    pub total_products: u64,

    /// Cashback credited on delivered orders, minor units
    pub total_cashback_credited: u64,

    /// Final totals of paid, shipped and delivered orders, minor units
    pub total_revenue: u64,
}
