//! Customers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::{amount_param, try_get_amount},
    domain::{
        customers::{
            data::{NewCashbackEntry, NewCustomer},
            records::{CashbackEntryRecord, CashbackEntryUuid, CashbackKind, CustomerRecord, CustomerUuid},
        },
        orders::records::OrderUuid,
    },
};

const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const CREATE_CUSTOMER_SQL: &str = include_str!("sql/create_customer.sql");
const LIST_CASHBACK_ENTRIES_SQL: &str = include_str!("sql/list_cashback_entries.sql");
const DEBIT_BALANCE_SQL: &str = include_str!("sql/debit_balance.sql");
const CREDIT_BALANCE_SQL: &str = include_str!("sql/credit_balance.sql");
const INSERT_CASHBACK_ENTRY_SQL: &str = include_str!("sql/insert_cashback_entry.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(GET_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: &NewCustomer,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(CREATE_CUSTOMER_SQL)
            .bind(customer.uuid.into_uuid())
            .bind(customer.full_name.trim())
            .bind(customer.email.trim())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_cashback_entries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<CashbackEntryRecord>, sqlx::Error> {
        query_as::<Postgres, CashbackEntryRecord>(LIST_CASHBACK_ENTRIES_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Move cashback in or out of a customer's balance and record the
    /// movement. Returns `false` without writing anything when a usage
    /// exceeds the balance.
    #[tracing::instrument(
        name = "customers.repository.record_cashback",
        skip(self, tx, entry),
        fields(
            customer_uuid = %entry.customer_uuid,
            kind = %entry.kind,
            amount = entry.amount
        ),
        err
    )]
    pub(crate) async fn record_cashback(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: &NewCashbackEntry,
    ) -> Result<bool, sqlx::Error> {
        if entry.amount == 0 {
            return Ok(true);
        }

        let amount = amount_param(entry.amount, "amount")?;

        let sql = match entry.kind {
            CashbackKind::Credit => CREDIT_BALANCE_SQL,
            CashbackKind::Usage => DEBIT_BALANCE_SQL,
        };

        let rows_affected = query(sql)
            .bind(entry.customer_uuid.into_uuid())
            .bind(amount)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            debug!("cashback balance unchanged");

            return Ok(false);
        }

        query(INSERT_CASHBACK_ENTRY_SQL)
            .bind(CashbackEntryUuid::new().into_uuid())
            .bind(entry.customer_uuid.into_uuid())
            .bind(entry.order_uuid.map(OrderUuid::into_uuid))
            .bind(entry.kind.as_str())
            .bind(amount)
            .bind(&entry.description)
            .execute(&mut **tx)
            .await?;

        Ok(true)
    }
}

impl<'r> FromRow<'r, PgRow> for CustomerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CustomerUuid::from_uuid(row.try_get("uuid")?),
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            cashback_balance: try_get_amount(row, "cashback_balance")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CashbackEntryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;

        Ok(Self {
            uuid: CashbackEntryUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            order_uuid: row
                .try_get::<Option<Uuid>, _>("order_uuid")?
                .map(OrderUuid::from_uuid),
            kind: kind.parse().map_err(|e: String| sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: e.into(),
            })?,
            amount: try_get_amount(row, "amount")?,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
