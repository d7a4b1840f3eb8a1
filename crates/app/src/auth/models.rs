//! Auth data models.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use uuid::Uuid;

use crate::{auth::ApiTokenVersion, domain::customers::records::CustomerUuid};

/// Who a token acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    /// Back-office staff
    Admin,

    /// A single shopper
    Customer(CustomerUuid),
}

impl Principal {
    #[must_use]
    pub const fn role(self) -> ApiTokenRole {
        match self {
            Self::Admin => ApiTokenRole::Admin,
            Self::Customer(_) => ApiTokenRole::Customer,
        }
    }

    #[must_use]
    pub const fn customer(self) -> Option<CustomerUuid> {
        match self {
            Self::Admin => None,
            Self::Customer(customer) => Some(customer),
        }
    }

    /// Rebuild a principal from its stored role and customer.
    ///
    /// # Errors
    ///
    /// Returns the role when the customer column does not fit it.
    pub fn from_parts(
        role: ApiTokenRole,
        customer: Option<CustomerUuid>,
    ) -> Result<Self, ApiTokenRole> {
        match (role, customer) {
            (ApiTokenRole::Admin, None) => Ok(Self::Admin),
            (ApiTokenRole::Customer, Some(customer)) => Ok(Self::Customer(customer)),
            (role, _) => Err(role),
        }
    }
}

/// Stored token role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenRole {
    Admin,
    Customer,
}

impl ApiTokenRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for ApiTokenRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiTokenRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "customer" => Ok(Self::Customer),
            other => Err(format!("unknown token role: {other}")),
        }
    }
}

/// API token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub principal: Principal,

    /// Token format/hash version.
    pub version: ApiTokenVersion,

    /// SHA-256 digest of the token verifier input, hex encoded.
    pub token_hash: String,
}

/// API token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub principal: Principal,
    pub version: ApiTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub uuid: Uuid,
    pub principal: Principal,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}
