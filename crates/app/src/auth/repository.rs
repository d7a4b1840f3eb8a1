//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenRole, ApiTokenVersion, NewApiToken, Principal,
        models::ActiveApiToken,
    },
    domain::customers::records::CustomerUuid,
};

const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const FIND_ACTIVE_API_TOKEN_SQL: &str = include_str!("sql/find_active_api_token.sql");
const LIST_API_TOKENS_SQL: &str = include_str!("sql/list_api_tokens.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");
const TOUCH_API_TOKEN_SQL: &str = include_str!("sql/touch_api_token.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_api_token(
        &self,
        token: &NewApiToken,
    ) -> Result<ApiTokenMetadata, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(CREATE_API_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.version.as_i16())
            .bind(&token.token_hash)
            .bind(token.principal.role().as_str())
            .bind(token.principal.customer().map(CustomerUuid::into_uuid))
            .bind(token.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_active_api_token(
        &self,
        token_uuid: Uuid,
        version: ApiTokenVersion,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error> {
        query_as::<Postgres, ActiveApiToken>(FIND_ACTIVE_API_TOKEN_SQL)
            .bind(token_uuid)
            .bind(version.as_i16())
            .fetch_optional(&self.pool)
            .await
    }

    /// Tokens newest first, optionally only those of one customer.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn list_api_tokens(
        &self,
        customer: Option<CustomerUuid>,
    ) -> Result<Vec<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(LIST_API_TOKENS_SQL)
            .bind(customer.map(CustomerUuid::into_uuid))
            .fetch_all(&self.pool)
            .await
    }

    /// Revoke an active token, returning its id when one was revoked.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(REVOKE_API_TOKEN_SQL)
            .bind(token_uuid)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_api_token(&self, token_uuid: Uuid) -> Result<u64, sqlx::Error> {
        query(TOUCH_API_TOKEN_SQL)
            .bind(token_uuid)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
    }
}

fn decode_error(col: &str, message: String) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: message.into(),
    }
}

fn try_get_version(row: &PgRow) -> Result<ApiTokenVersion, sqlx::Error> {
    ApiTokenVersion::try_from(row.try_get::<i16, _>("version")?)
        .map_err(|error| decode_error("version", error.to_string()))
}

fn try_get_principal(row: &PgRow) -> Result<Principal, sqlx::Error> {
    let role = row
        .try_get::<String, _>("role")?
        .parse::<ApiTokenRole>()
        .map_err(|message| decode_error("role", message))?;

    let customer = row
        .try_get::<Option<Uuid>, _>("customer_uuid")?
        .map(CustomerUuid::from_uuid);

    Principal::from_parts(role, customer)
        .map_err(|role| decode_error("customer_uuid", format!("does not fit role {role}")))
}

impl<'r> FromRow<'r, PgRow> for ActiveApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            principal: try_get_principal(row)?,
            version: try_get_version(row)?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            principal: try_get_principal(row)?,
            version: try_get_version(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
