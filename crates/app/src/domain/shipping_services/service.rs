//! Shipping services service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::shipping_services::{
        data::NewShippingService, errors::ShippingServicesServiceError,
        records::ShippingServiceRecord, repository::PgShippingServicesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgShippingServicesService {
    db: Db,
    repository: PgShippingServicesRepository,
}

impl PgShippingServicesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgShippingServicesRepository::new(),
        }
    }
}

#[async_trait]
impl ShippingServicesService for PgShippingServicesService {
    async fn list_services(
        &self,
        active_only: bool,
    ) -> Result<Vec<ShippingServiceRecord>, ShippingServicesServiceError> {
        let mut tx = self.db.begin().await?;

        let services = self.repository.list_services(&mut tx, active_only).await?;

        tx.commit().await?;

        Ok(services)
    }

    async fn create_service(
        &self,
        service: NewShippingService,
    ) -> Result<ShippingServiceRecord, ShippingServicesServiceError> {
        validate(&service)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_service(&mut tx, &service).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn set_active(
        &self,
        service_id: u32,
        active: bool,
    ) -> Result<ShippingServiceRecord, ShippingServicesServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_active(&mut tx, service_id, active)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

fn validate(service: &NewShippingService) -> Result<(), ShippingServicesServiceError> {
    if service.name.trim().is_empty() {
        return Err(ShippingServicesServiceError::MissingRequiredData);
    }

    // Zero is reserved for the free shipping pseudo-quote.
    if service.service_id == 0 {
        return Err(ShippingServicesServiceError::InvalidData);
    }

    Ok(())
}

#[automock]
#[async_trait]
pub trait ShippingServicesService: Send + Sync {
    /// Configured services, optionally only the active ones.
    async fn list_services(
        &self,
        active_only: bool,
    ) -> Result<Vec<ShippingServiceRecord>, ShippingServicesServiceError>;

    /// Register an aggregator service.
    async fn create_service(
        &self,
        service: NewShippingService,
    ) -> Result<ShippingServiceRecord, ShippingServicesServiceError>;

    /// Enable or disable a service for quoting.
    async fn set_active(
        &self,
        service_id: u32,
        active: bool,
    ) -> Result<ShippingServiceRecord, ShippingServicesServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(service_id: u32, name: &str) -> NewShippingService {
        NewShippingService {
            service_id,
            name: name.to_owned(),
            active: true,
        }
    }

    #[test]
    fn accepts_named_services() {
        assert!(validate(&service(1, "PAC")).is_ok());
    }

    #[test]
    fn rejects_blank_names() {
        assert!(matches!(
            validate(&service(2, " ")),
            Err(ShippingServicesServiceError::MissingRequiredData)
        ));
    }

    #[test]
    fn reserves_the_free_shipping_id() {
        assert!(matches!(
            validate(&service(0, "Free")),
            Err(ShippingServicesServiceError::InvalidData)
        ));
    }
}
