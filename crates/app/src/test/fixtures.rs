//! In-memory records for service tests.

use jiff::Timestamp;
use rusty_money::iso::BRL;
use storefront::{
    catalog::{CategoryTags, ParcelDimensions},
    orders::OrderStatus,
    settings::StoreSettings,
    shipping::{Address, PostalCode, QuoteError},
};

use crate::domain::{
    carts::{
        PricedCart,
        records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
    },
    customers::records::{CustomerRecord, CustomerUuid},
    orders::{
        data::NewOrder,
        records::{OrderLineRecord, OrderLineUuid, OrderRecord},
    },
    products::records::{ProductRecord, ProductUuid},
    shipping_services::records::ShippingServiceRecord,
};

pub(crate) fn settings() -> StoreSettings<'static> {
    let mut settings = StoreSettings::defaults(BRL);

    settings.origin_postal_code = Some("01310-100".to_owned());

    settings
}

pub(crate) fn destination() -> Result<Address, QuoteError> {
    Ok(Address {
        postal_code: PostalCode::parse("20040-020")?,
        street: "Rua Primeiro de Março".to_owned(),
        number: "10".to_owned(),
        complement: None,
        neighborhood: "Centro".to_owned(),
        city: "Rio de Janeiro".to_owned(),
        state: "RJ".to_owned(),
    })
}

pub(crate) fn product(price: u64) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        name: "Hoodie".to_owned(),
        description: None,
        price,
        discount_price: None,
        image_url: None,
        gallery: Vec::new(),
        dimensions: ParcelDimensions::default(),
        categories: CategoryTags::default(),
        variants: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

/// A cart holding `quantity` of a single product priced at `price`.
pub(crate) fn priced_cart(
    price: u64,
    quantity: u32,
    settings: StoreSettings<'static>,
) -> Result<PricedCart, crate::domain::carts::CartsServiceError> {
    let cart_uuid = CartUuid::new();
    let product = product(price);

    let cart = CartRecord {
        uuid: cart_uuid,
        items: vec![CartItemRecord {
            uuid: CartItemUuid::new(),
            cart_uuid,
            product_uuid: product.uuid,
            variant_uuid: None,
            quantity,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    };

    PricedCart::price(cart, &[product], settings)
}

pub(crate) fn shipping_service(service_id: u32) -> ShippingServiceRecord {
    ShippingServiceRecord {
        service_id,
        name: format!("Service {service_id}"),
        active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn customer(uuid: CustomerUuid, cashback_balance: u64) -> CustomerRecord {
    CustomerRecord {
        uuid,
        full_name: "Ana Souza".to_owned(),
        email: "ana@example.com".to_owned(),
        cashback_balance,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// The record the orders service would return for `order`.
pub(crate) fn order_record(order: NewOrder) -> OrderRecord {
    let lines = order
        .lines
        .into_iter()
        .map(|line| OrderLineRecord {
            uuid: OrderLineUuid::new(),
            order_uuid: order.uuid,
            product_uuid: line.product_uuid,
            variant_uuid: line.variant_uuid,
            name: line.name,
            variant_description: line.variant_description,
            image_url: line.image_url,
            unit_price: line.unit_price,
            quantity: line.quantity,
        })
        .collect();

    OrderRecord {
        uuid: order.uuid,
        customer_uuid: order.customer_uuid,
        cart_uuid: order.cart_uuid,
        email: order.customer.email,
        full_name: order.customer.full_name,
        document: order.customer.document,
        phone: order.customer.phone,
        address: order.customer.address,
        shipping: order.shipping,
        shipping_cost: order.shipping_cost,
        subtotal: order.subtotal,
        total_before_cashback: order.total_before_cashback,
        applied_cashback: order.applied_cashback,
        final_total: order.final_total,
        payment_method: order.payment_method,
        payment_session_id: None,
        status: OrderStatus::Processing,
        lines,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
