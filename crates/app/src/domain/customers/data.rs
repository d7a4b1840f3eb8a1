//! Customer Data

use crate::domain::{
    customers::records::{CashbackKind, CustomerUuid},
    orders::records::OrderUuid,
};

/// New Customer Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub uuid: CustomerUuid,
    pub full_name: String,
    pub email: String,
}

/// A movement of cashback to record in the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCashbackEntry {
    pub customer_uuid: CustomerUuid,
    pub order_uuid: Option<OrderUuid>,
    pub kind: CashbackKind,
    pub amount: u64,
    pub description: String,
}
