//! Shipping Services Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::try_get_count,
    domain::shipping_services::{data::NewShippingService, records::ShippingServiceRecord},
};

const LIST_SERVICES_SQL: &str = include_str!("sql/list_services.sql");
const CREATE_SERVICE_SQL: &str = include_str!("sql/create_service.sql");
const SET_ACTIVE_SQL: &str = include_str!("sql/set_active.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgShippingServicesRepository;

impl PgShippingServicesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_services(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        active_only: bool,
    ) -> Result<Vec<ShippingServiceRecord>, sqlx::Error> {
        query_as::<Postgres, ShippingServiceRecord>(LIST_SERVICES_SQL)
            .bind(active_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_service(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service: &NewShippingService,
    ) -> Result<ShippingServiceRecord, sqlx::Error> {
        let service_id = i32::try_from(service.service_id).map_err(|e| sqlx::Error::ColumnDecode {
            index: "service_id".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, ShippingServiceRecord>(CREATE_SERVICE_SQL)
            .bind(service_id)
            .bind(&service.name)
            .bind(service.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service_id: u32,
        active: bool,
    ) -> Result<ShippingServiceRecord, sqlx::Error> {
        // Ids beyond i32 cannot exist in the table.
        let Ok(service_id) = i32::try_from(service_id) else {
            return Err(sqlx::Error::RowNotFound);
        };

        query_as::<Postgres, ShippingServiceRecord>(SET_ACTIVE_SQL)
            .bind(service_id)
            .bind(active)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ShippingServiceRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            service_id: try_get_count(row, "service_id")?,
            name: row.try_get("name")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
