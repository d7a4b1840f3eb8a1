//! Shipping Service Data

/// New Shipping Service Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShippingService {
    pub service_id: u32,
    pub name: String,
    pub active: bool,
}
