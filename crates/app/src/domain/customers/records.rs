//! Customer Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{domain::orders::records::OrderUuid, uuids::TypedUuid};

/// Customer UUID
pub type CustomerUuid = TypedUuid<CustomerRecord>;

/// Customer Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub uuid: CustomerUuid,
    pub full_name: String,
    pub email: String,

    /// Spendable cashback in minor units
    pub cashback_balance: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cashback Entry UUID
pub type CashbackEntryUuid = TypedUuid<CashbackEntryRecord>;

/// Direction of a cashback ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashbackKind {
    /// Earned on a delivered order or refunded on cancellation
    Credit,

    /// Spent at checkout
    Usage,
}

impl CashbackKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Usage => "usage",
        }
    }
}

impl fmt::Display for CashbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CashbackKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "credit" => Ok(Self::Credit),
            "usage" => Ok(Self::Usage),
            other => Err(format!("unknown cashback entry kind: {other}")),
        }
    }
}

/// Cashback Entry Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashbackEntryRecord {
    pub uuid: CashbackEntryUuid,
    pub customer_uuid: CustomerUuid,
    pub order_uuid: Option<OrderUuid>,
    pub kind: CashbackKind,
    pub amount: u64,
    pub description: String,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn cashback_kinds_use_storage_names() -> TestResult {
        for kind in [CashbackKind::Credit, CashbackKind::Usage] {
            assert_eq!(kind.as_str().parse::<CashbackKind>()?, kind);
        }

        assert!("refund".parse::<CashbackKind>().is_err());

        Ok(())
    }
}
