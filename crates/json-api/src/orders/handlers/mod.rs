//! Order Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderLineRecord, OrderRecord};

pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod stats;
pub(crate) mod status;

/// Order
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub customer_uuid: Uuid,

    /// `processing`, `paid`, `shipped`, `delivered` or `cancelled`
    pub status: String,

    /// `card` or `pay_on_delivery`
    pub payment_method: String,
    pub email: String,
    pub full_name: String,
    pub document: String,
    pub phone: Option<String>,
    pub address: AddressResponse,
    pub shipping: ShippingResponse,

    /// Amounts in minor units
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub total_before_cashback: u64,
    pub applied_cashback: u64,
    pub final_total: u64,
    pub lines: Vec<OrderLineResponse>,
    pub created_at: String,
    pub updated_at: String,
}

/// Delivery address
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub postal_code: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Shipping option chosen at checkout
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingResponse {
    pub service_id: u32,
    pub name: String,
    pub company: String,
    pub delivery_days: u32,
}

/// Order line, priced when the order was placed
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub product_uuid: Uuid,
    pub variant_uuid: Option<Uuid>,
    pub name: String,
    pub variant_description: String,
    pub image_url: Option<String>,
    pub unit_price: u64,
    pub quantity: u32,
}

impl From<OrderLineRecord> for OrderLineResponse {
    fn from(line: OrderLineRecord) -> Self {
        Self {
            product_uuid: line.product_uuid.into_uuid(),
            variant_uuid: line.variant_uuid.map(Into::into),
            name: line.name,
            variant_description: line.variant_description,
            image_url: line.image_url,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            customer_uuid: order.customer_uuid.into_uuid(),
            status: order.status.as_str().to_string(),
            payment_method: order.payment_method.as_str().to_string(),
            email: order.email,
            full_name: order.full_name,
            document: order.document,
            phone: order.phone,
            address: AddressResponse {
                postal_code: order.address.postal_code.as_str().to_string(),
                street: order.address.street,
                number: order.address.number,
                complement: order.address.complement,
                neighborhood: order.address.neighborhood,
                city: order.address.city,
                state: order.address.state,
            },
            shipping: ShippingResponse {
                service_id: order.shipping.service_id,
                name: order.shipping.name,
                company: order.shipping.company,
                delivery_days: order.shipping.delivery_days,
            },
            subtotal: order.subtotal,
            shipping_cost: order.shipping_cost,
            total_before_cashback: order.total_before_cashback,
            applied_cashback: order.applied_cashback,
            final_total: order.final_total,
            lines: order.lines.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Orders
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<OrderRecord>> for OrdersResponse {
    fn from(orders: Vec<OrderRecord>) -> Self {
        Self {
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}
