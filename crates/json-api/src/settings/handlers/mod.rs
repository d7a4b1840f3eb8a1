//! Settings Handlers

use rust_decimal::prelude::ToPrimitive;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::settings::records::SettingsRecord;

pub(crate) mod get;
pub(crate) mod update;

/// Store Settings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SettingsResponse {
    pub store_name: String,
    pub contact_email: Option<String>,
    pub origin_postal_code: Option<String>,

    /// Discount applied to products without their own sale price
    pub global_discount_percent: f64,
    pub free_shipping_active: bool,

    /// Minor units
    pub free_shipping_threshold: u64,
    pub cashback_active: bool,
    pub cashback_percent: f64,
    pub pay_on_delivery: bool,
    pub updated_at: Option<String>,
}

impl From<SettingsRecord> for SettingsResponse {
    fn from(settings: SettingsRecord) -> Self {
        Self {
            store_name: settings.store_name,
            contact_email: settings.contact_email,
            origin_postal_code: settings.origin_postal_code,
            global_discount_percent: settings.global_discount_percent.to_f64().unwrap_or_default(),
            free_shipping_active: settings.free_shipping_active,
            free_shipping_threshold: settings.free_shipping_threshold,
            cashback_active: settings.cashback_active,
            cashback_percent: settings.cashback_percent.to_f64().unwrap_or_default(),
            pay_on_delivery: settings.pay_on_delivery,
            updated_at: settings.updated_at.map(|at| at.to_string()),
        }
    }
}
