//! Shipping Service Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::shipping_services::records::ShippingServiceRecord;

pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod update;

/// Shipping Service
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingServiceResponse {
    /// Aggregator service identifier
    pub service_id: u32,
    pub name: String,
    pub active: bool,
}

impl From<ShippingServiceRecord> for ShippingServiceResponse {
    fn from(service: ShippingServiceRecord) -> Self {
        Self {
            service_id: service.service_id,
            name: service.name,
            active: service.active,
        }
    }
}

#[cfg(test)]
pub(crate) fn make_record(service_id: u32, active: bool) -> ShippingServiceRecord {
    ShippingServiceRecord {
        service_id,
        name: format!("Service {service_id}"),
        active,
        created_at: jiff::Timestamp::UNIX_EPOCH,
        updated_at: jiff::Timestamp::UNIX_EPOCH,
    }
}
