//! Checkout Data

use storefront::{
    checkout::{CheckoutForm, PaymentMethod},
    shipping::ShippingQuote,
};

use crate::{
    domain::{
        carts::records::CartUuid, customers::records::CustomerUuid, orders::records::OrderRecord,
    },
    gateways::payments::{PaymentLineItem, PaymentSessionRequest},
};

/// A checkout submission.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub cart: CartUuid,
    pub customer: CustomerUuid,
    pub form: CheckoutForm,

    /// Option the shopper picked from the cart's quotes. Its price is
    /// re-quoted before the order is written.
    pub shipping: Option<ShippingQuote<'static>>,
    pub payment_method: PaymentMethod,

    /// Cashback the shopper asked to spend, in minor units
    pub cashback_requested: u64,
}

/// Where the shopper goes next.
#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    /// Pay on the processor's hosted page.
    PaymentPending {
        order: OrderRecord,
        redirect_url: String,
    },

    /// Order placed, paid when delivered.
    AwaitingDelivery { order: OrderRecord },
}

impl CheckoutOutcome {
    #[must_use]
    pub fn order(&self) -> &OrderRecord {
        match self {
            Self::PaymentPending { order, .. } | Self::AwaitingDelivery { order } => order,
        }
    }
}

/// Build the hosted payment page for `order`.
///
/// Orders paid partly with cashback are charged as a single line for the
/// final total, since the processor has no notion of store credit.
#[must_use]
pub fn payment_request(order: &OrderRecord, currency_code: &str) -> PaymentSessionRequest {
    let line_items = if order.applied_cashback > 0 {
        vec![PaymentLineItem {
            name: format!("Order {}", order.uuid),
            description: Some(format!(
                "{} item(s), shipping and cashback applied",
                order.lines.iter().map(|line| u64::from(line.quantity)).sum::<u64>()
            )),
            image_url: None,
            unit_amount: order.final_total,
            quantity: 1,
        }]
    } else {
        let mut items: Vec<PaymentLineItem> = order
            .lines
            .iter()
            .map(|line| PaymentLineItem {
                name: line.name.clone(),
                description: Some(line.variant_description.clone()),
                image_url: line.image_url.clone(),
                unit_amount: line.unit_price,
                quantity: line.quantity,
            })
            .collect();

        if order.shipping_cost > 0 {
            items.push(PaymentLineItem {
                name: format!("Shipping: {}", order.shipping.name),
                description: Some(order.shipping.company.clone()),
                image_url: None,
                unit_amount: order.shipping_cost,
                quantity: 1,
            });
        }

        items
    };

    PaymentSessionRequest {
        order_id: order.uuid.to_string(),
        customer_id: order.customer_uuid.to_string(),
        customer_email: order.email.clone(),
        currency: currency_code.to_lowercase(),
        line_items,
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use storefront::{
        orders::OrderStatus,
        shipping::{Address, PostalCode},
    };
    use testresult::TestResult;

    use crate::domain::{
        orders::records::{OrderLineRecord, OrderLineUuid, OrderUuid, ShippingSelection},
        products::records::ProductUuid,
    };

    use super::*;

    fn order(applied_cashback: u64, shipping_cost: u64) -> TestResult<OrderRecord> {
        let uuid = OrderUuid::new();
        let subtotal = 140_00;
        let total_before_cashback = subtotal + shipping_cost;

        Ok(OrderRecord {
            uuid,
            customer_uuid: CustomerUuid::new(),
            cart_uuid: Some(CartUuid::new()),
            email: "ana@example.com".to_owned(),
            full_name: "Ana Souza".to_owned(),
            document: "12345678900".to_owned(),
            phone: None,
            address: Address {
                postal_code: PostalCode::parse("20040020")?,
                street: "Rua A".to_owned(),
                number: "10".to_owned(),
                complement: None,
                neighborhood: "Centro".to_owned(),
                city: "Rio de Janeiro".to_owned(),
                state: "RJ".to_owned(),
            },
            shipping: ShippingSelection {
                service_id: 2,
                name: "SEDEX".to_owned(),
                company: "Correios".to_owned(),
                delivery_days: 2,
            },
            shipping_cost,
            subtotal,
            total_before_cashback,
            applied_cashback,
            final_total: total_before_cashback - applied_cashback,
            payment_method: PaymentMethod::Card,
            payment_session_id: None,
            status: OrderStatus::Processing,
            lines: vec![OrderLineRecord {
                uuid: OrderLineUuid::new(),
                order_uuid: uuid,
                product_uuid: ProductUuid::new(),
                variant_uuid: None,
                name: "Hoodie".to_owned(),
                variant_description: "Navy / L".to_owned(),
                image_url: Some("https://cdn.example.com/navy.jpg".to_owned()),
                unit_price: 70_00,
                quantity: 2,
            }],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        })
    }

    #[test]
    fn itemises_lines_and_shipping_without_cashback() -> TestResult {
        let order = order(0, 25_00)?;
        let request = payment_request(&order, "BRL");

        assert_eq!(request.currency, "brl");
        assert_eq!(request.order_id, order.uuid.to_string());
        assert_eq!(request.line_items.len(), 2);
        assert_eq!(
            request.line_items.last().map(|item| item.unit_amount),
            Some(25_00)
        );

        Ok(())
    }

    #[test]
    fn free_shipping_adds_no_shipping_line() -> TestResult {
        let request = payment_request(&order(0, 0)?, "BRL");

        assert_eq!(request.line_items.len(), 1);

        Ok(())
    }

    #[test]
    fn cashback_collapses_to_the_final_total() -> TestResult {
        let order = order(30_00, 25_00)?;
        let request = payment_request(&order, "BRL");

        assert_eq!(request.line_items.len(), 1);
        assert_eq!(
            request.line_items.first().map(|item| (item.unit_amount, item.quantity)),
            Some((135_00, 1))
        );

        let charged: u64 = request
            .line_items
            .iter()
            .map(|item| item.unit_amount * u64::from(item.quantity))
            .sum();

        assert_eq!(charged, order.final_total);

        Ok(())
    }
}
