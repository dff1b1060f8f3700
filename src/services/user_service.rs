// src/services/user_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{UpdateUserPayload, User},
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    // Só o próprio perfil pode ser alterado. Aqui o 403 é honesto: a lista de
    // usuários é visível, então não há existência a esconder.
    pub async fn update_profile(
        &self,
        id: Uuid,
        caller_id: Uuid,
        payload: &UpdateUserPayload,
    ) -> Result<User, AppError> {
        if id != caller_id {
            return Err(AppError::Forbidden);
        }

        self.user_repo
            .update_user(
                id,
                payload.nome.as_deref(),
                payload.email.as_deref(),
                payload.cpf.as_deref(),
                payload.idade,
                payload.telefone.as_deref(),
            )
            .await?
            .ok_or(AppError::UserNotFound)
    }

    // Deleta o próprio perfil; cães e agendamentos caem em cascata.
    pub async fn delete_profile(&self, id: Uuid, caller_id: Uuid) -> Result<(), AppError> {
        if id != caller_id {
            return Err(AppError::Forbidden);
        }

        let deleted = self.user_repo.delete_user(id).await?;
        if !deleted {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }
}
