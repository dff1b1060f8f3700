// src/db/appointment_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        appointment::{Appointment, AppointmentStatus, DogSummary, ServiceSummary},
        dog::Dog,
        service::Service,
    },
};

const APPOINTMENT_COLUMNS: &str = "id, date, status, user_id, created_at, updated_at";

// O repositório de agendamentos: a linha principal e as duas tabelas de junção.
// As escritas recebem um `Executor` genérico para participarem da transação
// aberta pelo serviço (passando `&mut *tx`).
#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Escritas (participam de uma transação) ---

    pub async fn insert_appointment<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            INSERT INTO appointments (date, user_id)
            VALUES ($1, $2)
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(date)
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(appointment)
    }

    pub async fn update_scalars<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        date: Option<DateTime<Utc>>,
        status: Option<AppointmentStatus>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE appointments
            SET date   = COALESCE($2, date),
                status = COALESCE($3, status),
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(date)
        .bind(status)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn insert_dog_links<'e, E>(
        &self,
        executor: E,
        appointment_id: Uuid,
        dog_ids: &[Uuid],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // `unnest` insere todas as junções em uma única instrução; o DISTINCT
        // absorve IDs duplicados no payload sem violar a chave primária composta.
        sqlx::query(
            r#"
            INSERT INTO appointment_dogs (appointment_id, dog_id)
            SELECT DISTINCT $1, unnest($2::uuid[])
            "#,
        )
        .bind(appointment_id)
        .bind(dog_ids)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn insert_service_links<'e, E>(
        &self,
        executor: E,
        appointment_id: Uuid,
        service_ids: &[Uuid],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO appointment_services (appointment_id, service_id)
            SELECT DISTINCT $1, unnest($2::uuid[])
            "#,
        )
        .bind(appointment_id)
        .bind(service_ids)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn delete_dog_links<'e, E>(
        &self,
        executor: E,
        appointment_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM appointment_dogs WHERE appointment_id = $1")
            .bind(appointment_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete_service_links<'e, E>(
        &self,
        executor: E,
        appointment_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM appointment_services WHERE appointment_id = $1")
            .bind(appointment_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // --- Leituras ---

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, AppError> {
        let maybe = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    // Posse embutida na consulta: para quem não é dono, o agendamento não existe.
    pub async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Appointment>, AppError> {
        let maybe = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Appointment>, AppError> {
        let appointments = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE user_id = $1 ORDER BY date ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(appointments)
    }

    // Materializa os cães vinculados (entidades completas, não só IDs)
    pub async fn dogs_of(&self, appointment_id: Uuid) -> Result<Vec<Dog>, AppError> {
        let dogs = sqlx::query_as::<_, Dog>(
            r#"
            SELECT d.id, d.nome, d.idade, d.raca, d.porte, d.owner_id, d.created_at, d.updated_at
            FROM dogs d
            JOIN appointment_dogs ad ON ad.dog_id = d.id
            WHERE ad.appointment_id = $1
            ORDER BY d.nome ASC
            "#,
        )
        .bind(appointment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(dogs)
    }

    pub async fn services_of(&self, appointment_id: Uuid) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT s.id, s.name, s.price, s.created_at, s.updated_at
            FROM services s
            JOIN appointment_services aps ON aps.service_id = s.id
            WHERE aps.appointment_id = $1
            ORDER BY s.name ASC
            "#,
        )
        .bind(appointment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(services)
    }

    // Projeções leves para a listagem
    pub async fn dog_summaries_of(&self, appointment_id: Uuid) -> Result<Vec<DogSummary>, AppError> {
        let dogs = sqlx::query_as::<_, DogSummary>(
            r#"
            SELECT d.nome, d.raca
            FROM dogs d
            JOIN appointment_dogs ad ON ad.dog_id = d.id
            WHERE ad.appointment_id = $1
            ORDER BY d.nome ASC
            "#,
        )
        .bind(appointment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(dogs)
    }

    pub async fn service_summaries_of(
        &self,
        appointment_id: Uuid,
    ) -> Result<Vec<ServiceSummary>, AppError> {
        let services = sqlx::query_as::<_, ServiceSummary>(
            r#"
            SELECT s.name, s.price
            FROM services s
            JOIN appointment_services aps ON aps.service_id = s.id
            WHERE aps.appointment_id = $1
            ORDER BY s.name ASC
            "#,
        )
        .bind(appointment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(services)
    }

    // As junções caem em cascata junto com a linha principal.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
