//! Shipping Service Records

use jiff::Timestamp;

/// Shipping Service Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingServiceRecord {
    /// Aggregator service identifier
    pub service_id: u32,
    pub name: String,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
