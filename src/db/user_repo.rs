// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::User};

const USER_COLUMNS: &str =
    "id, nome, email, cpf, idade, telefone, password_hash, created_at, updated_at";

// Traduz violação de unicidade (e-mail/CPF) para o erro de domínio.
fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::EmailOrCpfAlreadyExists;
        }
    }
    e.into()
}

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca por e-mail OU CPF: o login aceita qualquer um como identificador.
    pub async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 OR cpf = $1"
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    // Cria um novo usuário, com tratamento de erro para e-mail/CPF duplicados
    pub async fn create_user(
        &self,
        nome: &str,
        email: &str,
        cpf: &str,
        idade: i32,
        telefone: Option<&str>,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (nome, email, cpf, idade, telefone, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(nome)
        .bind(email)
        .bind(cpf)
        .bind(idade)
        .bind(telefone)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    // Atualização parcial: COALESCE mantém o valor atual quando o campo vem nulo.
    // `telefone` é a exceção: segue o mesmo COALESCE, então não dá para limpá-lo aqui.
    pub async fn update_user(
        &self,
        id: Uuid,
        nome: Option<&str>,
        email: Option<&str>,
        cpf: Option<&str>,
        idade: Option<i32>,
        telefone: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET nome     = COALESCE($2, nome),
                email    = COALESCE($3, email),
                cpf      = COALESCE($4, cpf),
                idade    = COALESCE($5, idade),
                telefone = COALESCE($6, telefone),
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(nome)
        .bind(email)
        .bind(cpf)
        .bind(idade)
        .bind(telefone)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(maybe_user)
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
