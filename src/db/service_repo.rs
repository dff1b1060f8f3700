// src/db/service_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::service::Service};

const SERVICE_COLUMNS: &str = "id, name, price, created_at, updated_at";

fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::ServiceNameAlreadyExists;
        }
    }
    e.into()
}

// O repositório do catálogo de serviços, responsável pela tabela 'services'
#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str, price: Decimal) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(&format!(
            "INSERT INTO services (name, price) VALUES ($1, $2) RETURNING {SERVICE_COLUMNS}"
        ))
        .bind(name)
        .bind(price)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(service)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, AppError> {
        let maybe_service = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_service)
    }

    pub async fn list_all(&self) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(services)
    }

    // Busca os serviços existentes dentro do conjunto de IDs.
    // Quem compara contagens (pedidos x encontrados) é o serviço de agendamento.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(services)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        price: Decimal,
    ) -> Result<Option<Service>, AppError> {
        let maybe_service = sqlx::query_as::<_, Service>(&format!(
            r#"
            UPDATE services
            SET name = $2, price = $3, updated_at = now()
            WHERE id = $1
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(price)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(maybe_service)
    }

    // Deletar um serviço ainda vinculado a agendamentos viola a FK RESTRICT
    // da tabela de junção e vira 409, sem órfãos.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::ServiceInUse;
                    }
                }
                e.into()
            })?;
        Ok(result.rows_affected() > 0)
    }
}
