//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::customers::{
        data::NewCustomer,
        errors::CustomersServiceError,
        records::{CashbackEntryRecord, CustomerRecord, CustomerUuid},
        repository::PgCustomersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn get_profile(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let profile = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(profile)
    }

    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        validate(&customer)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_customer(&mut tx, &customer).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_cashback(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<CashbackEntryRecord>, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let entries = self
            .repository
            .list_cashback_entries(&mut tx, customer)
            .await?;

        tx.commit().await?;

        Ok(entries)
    }
}

fn validate(customer: &NewCustomer) -> Result<(), CustomersServiceError> {
    if customer.full_name.trim().is_empty() || customer.email.trim().is_empty() {
        return Err(CustomersServiceError::MissingRequiredData);
    }

    if !customer.email.contains('@') {
        return Err(CustomersServiceError::InvalidData);
    }

    Ok(())
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Profile with the current cashback balance.
    async fn get_profile(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Register a customer.
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Cashback ledger, newest first.
    async fn list_cashback(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<CashbackEntryRecord>, CustomersServiceError>;
}
