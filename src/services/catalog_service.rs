// src/services/catalog_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ServiceRepository,
    models::service::{Service, ServicePayload},
};

// CRUD do catálogo de serviços: leitura pública, escrita para qualquer
// usuário autenticado. Não há dono; o único cuidado é a unicidade do nome
// e o conflito referencial no delete (tratados no repositório).
#[derive(Clone)]
pub struct CatalogService {
    service_repo: ServiceRepository,
}

impl CatalogService {
    pub fn new(service_repo: ServiceRepository) -> Self {
        Self { service_repo }
    }

    pub async fn create(&self, payload: &ServicePayload) -> Result<Service, AppError> {
        self.service_repo.create(&payload.name, payload.price).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Service, AppError> {
        self.service_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ServiceNotFound)
    }

    pub async fn list(&self) -> Result<Vec<Service>, AppError> {
        self.service_repo.list_all().await
    }

    pub async fn update(&self, id: Uuid, payload: &ServicePayload) -> Result<Service, AppError> {
        self.service_repo
            .update(id, &payload.name, payload.price)
            .await?
            .ok_or(AppError::ServiceNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.service_repo.delete(id).await?;
        if !deleted {
            return Err(AppError::ServiceNotFound);
        }
        Ok(())
    }
}
