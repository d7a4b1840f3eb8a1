//! Message bodies.

use rusty_money::{Money, iso::Currency};
use storefront::{checkout::PaymentMethod, money::format_amount};

use crate::{
    domain::{customers::records::CustomerRecord, orders::records::OrderRecord},
    gateways::mail::Email,
};

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

fn amount(minor: u64, currency: &Currency) -> String {
    let money = Money::from_minor(i64::try_from(minor).unwrap_or(i64::MAX), currency);

    format!("{} {}", currency.iso_alpha_code, format_amount(&money))
}

const fn payment_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Card => "Card",
        PaymentMethod::PayOnDelivery => "Pay on delivery",
    }
}

pub(crate) fn order_confirmation(
    order: &OrderRecord,
    store_name: &str,
    currency: &Currency,
) -> Email {
    let store = escape(store_name);
    let mut html = format!(
        "<h1>Thank you for your order, {}!</h1><p>Order <strong>{}</strong> was received by {store}.</p><table>",
        escape(&order.full_name),
        order.uuid,
    );

    for line in &order.lines {
        html.push_str(&format!(
            "<tr><td>{} ({})</td><td>{} x {}</td></tr>",
            escape(&line.name),
            escape(&line.variant_description),
            line.quantity,
            amount(line.unit_price, currency),
        ));
    }

    html.push_str(&format!(
        "</table><p>Subtotal: {}<br>Shipping ({}): {}<br>Cashback applied: {}<br><strong>Total: {}</strong></p>",
        amount(order.subtotal, currency),
        escape(&order.shipping.name),
        amount(order.shipping_cost, currency),
        amount(order.applied_cashback, currency),
        amount(order.final_total, currency),
    ));

    html.push_str(&format!(
        "<p>Payment: {}. Delivery to {}, {} - {}/{}.</p>",
        payment_label(order.payment_method),
        escape(&order.address.street),
        escape(&order.address.number),
        escape(&order.address.city),
        escape(&order.address.state),
    ));

    Email {
        to: vec![order.email.clone()],
        subject: format!("{store_name}: order {} confirmed", order.uuid),
        html,
    }
}

pub(crate) fn customer_registered(
    customer: &CustomerRecord,
    store_name: &str,
    admin_email: &str,
) -> Email {
    let store = escape(store_name);

    Email {
        to: vec![admin_email.to_owned()],
        subject: format!("New customer at {store_name}"),
        html: format!(
            "<h1>New customer registered</h1><p>A new customer signed up at {store}.</p><ul><li><strong>Customer:</strong> {}</li><li><strong>E-mail:</strong> {}</li><li><strong>Name:</strong> {}</li><li><strong>Registered:</strong> {}</li></ul>",
            customer.uuid,
            escape(&customer.email),
            escape(&customer.full_name),
            customer.created_at,
        ),
    }
}
