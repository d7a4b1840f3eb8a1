//! Settings Data

use rust_decimal::Decimal;

/// Settings Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsUpdate {
    pub store_name: String,
    pub contact_email: Option<String>,
    pub origin_postal_code: Option<String>,
    pub global_discount_percent: Decimal,
    pub free_shipping_active: bool,
    pub free_shipping_threshold: u64,
    pub cashback_active: bool,
    pub cashback_percent: Decimal,
    pub pay_on_delivery: bool,
}
