//! Cashback History Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::customers::records::CashbackEntryRecord;

use crate::{extensions::*, me::errors::into_status_error, state::State};

/// Cashback Ledger Entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CashbackEntryResponse {
    pub uuid: Uuid,
    pub order_uuid: Option<Uuid>,

    /// `credit` or `usage`
    pub kind: String,

    /// Minor units
    pub amount: u64,
    pub description: String,
    pub created_at: String,
}

impl From<CashbackEntryRecord> for CashbackEntryResponse {
    fn from(entry: CashbackEntryRecord) -> Self {
        Self {
            uuid: entry.uuid.into_uuid(),
            order_uuid: entry.order_uuid.map(Into::into),
            kind: entry.kind.as_str().to_string(),
            amount: entry.amount,
            description: entry.description,
            created_at: entry.created_at.to_string(),
        }
    }
}

/// Cashback History
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CashbackResponse {
    pub entries: Vec<CashbackEntryResponse>,
}

/// Cashback History Handler
#[endpoint(tags("me"), summary = "Cashback History", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CashbackResponse>, StatusError> {
    let customer = depot.customer_or_403()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let entries = state
        .app
        .customers
        .list_cashback(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CashbackResponse {
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}
