// src/db/dog_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::dog::{Dog, DogOwner, Porte},
};

const DOG_COLUMNS: &str = "id, nome, idade, raca, porte, owner_id, created_at, updated_at";

// O repositório de cães, responsável pela tabela 'dogs'
#[derive(Clone)]
pub struct DogRepository {
    pool: PgPool,
}

impl DogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_dog(
        &self,
        nome: &str,
        idade: i32,
        raca: &str,
        porte: Porte,
        owner_id: Uuid,
    ) -> Result<Dog, AppError> {
        let dog = sqlx::query_as::<_, Dog>(&format!(
            r#"
            INSERT INTO dogs (nome, idade, raca, porte, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {DOG_COLUMNS}
            "#
        ))
        .bind(nome)
        .bind(idade)
        .bind(raca)
        .bind(porte)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(dog)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Dog>, AppError> {
        let maybe_dog = sqlx::query_as::<_, Dog>(&format!(
            "SELECT {DOG_COLUMNS} FROM dogs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_dog)
    }

    // Projeção do dono, usada em `GET /dogs/{id}?includeOwner=true`
    pub async fn find_owner(&self, owner_id: Uuid) -> Result<Option<DogOwner>, AppError> {
        let maybe_owner = sqlx::query_as::<_, DogOwner>(
            "SELECT id, nome, email, telefone FROM users WHERE id = $1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_owner)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Dog>, AppError> {
        let dogs = sqlx::query_as::<_, Dog>(&format!(
            "SELECT {DOG_COLUMNS} FROM dogs WHERE owner_id = $1 ORDER BY nome ASC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(dogs)
    }

    // Busca os cães do conjunto de IDs que pertencem ao dono informado.
    // A verificação de "todos resolveram?" fica no serviço, comparando contagens.
    pub async fn find_owned_by_ids(
        &self,
        ids: &[Uuid],
        owner_id: Uuid,
    ) -> Result<Vec<Dog>, AppError> {
        let dogs = sqlx::query_as::<_, Dog>(&format!(
            r#"
            SELECT {DOG_COLUMNS}
            FROM dogs
            WHERE id = ANY($1) AND owner_id = $2
            "#
        ))
        .bind(ids)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(dogs)
    }

    // Atualização parcial via COALESCE, como nas demais tabelas
    pub async fn update_dog(
        &self,
        id: Uuid,
        nome: Option<&str>,
        idade: Option<i32>,
        raca: Option<&str>,
        porte: Option<Porte>,
    ) -> Result<Option<Dog>, AppError> {
        let maybe_dog = sqlx::query_as::<_, Dog>(&format!(
            r#"
            UPDATE dogs
            SET nome  = COALESCE($2, nome),
                idade = COALESCE($3, idade),
                raca  = COALESCE($4, raca),
                porte = COALESCE($5, porte),
                updated_at = now()
            WHERE id = $1
            RETURNING {DOG_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(nome)
        .bind(idade)
        .bind(raca)
        .bind(porte)
        .fetch_optional(&self.pool)
        .await?;

        Ok(maybe_dog)
    }

    pub async fn delete_dog(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM dogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
