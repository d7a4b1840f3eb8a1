//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken,
        Principal, digests_match, format_api_token, generate_api_token_secret, parse_api_token,
        repository::PgAuthRepository, token_digest,
    },
    domain::customers::records::CustomerUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token acting for `principal`.
    ///
    /// # Errors
    ///
    /// Returns an error if database insertion fails.
    pub async fn issue_api_token(
        &self,
        principal: Principal,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                principal,
                version,
                token_hash: token_digest(&token_uuid, version, &secret),
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List tokens, optionally only those of one customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        customer: Option<CustomerUuid>,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_api_tokens(customer).await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        Ok(self
            .repository
            .revoke_api_token(token_uuid)
            .await?
            .is_some())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let digest = token_digest(
            &parsed_token.token_uuid,
            parsed_token.version,
            &parsed_token.secret,
        );

        if token.version != parsed_token.version || !digests_match(&digest, &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        // Last-used tracking is best effort.
        let _touch_result = self
            .repository
            .touch_api_token(parsed_token.token_uuid)
            .await;

        Ok(token.principal)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;
}
