// src/services/dog_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DogRepository,
    models::dog::{CreateDogPayload, Dog, DogResponse, UpdateDogPayload},
    services::breed::{normalize_breed, BreedValidator},
};

#[derive(Clone)]
pub struct DogService {
    dog_repo: DogRepository,
    breed_validator: Arc<dyn BreedValidator>,
}

impl DogService {
    pub fn new(dog_repo: DogRepository, breed_validator: Arc<dyn BreedValidator>) -> Self {
        Self {
            dog_repo,
            breed_validator,
        }
    }

    // Normaliza e confere a raça na base externa antes de persistir
    async fn check_breed(&self, raca: &str) -> Result<String, AppError> {
        let normalized = normalize_breed(raca);
        if self.breed_validator.is_known_breed(&normalized).await {
            Ok(normalized)
        } else {
            Err(AppError::UnknownBreed(normalized))
        }
    }

    // O cão de outro dono é tratado como inexistente (404, não 403).
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> Result<Dog, AppError> {
        match self.dog_repo.find_by_id(id).await? {
            Some(dog) if dog.owner_id == owner_id => Ok(dog),
            _ => Err(AppError::DogNotFound),
        }
    }

    pub async fn create_dog(
        &self,
        owner_id: Uuid,
        payload: &CreateDogPayload,
    ) -> Result<Dog, AppError> {
        let raca = self.check_breed(&payload.raca).await?;
        self.dog_repo
            .create_dog(&payload.nome, payload.idade, &raca, payload.porte, owner_id)
            .await
    }

    // Leitura é aberta a qualquer usuário autenticado; o dono só é anexado
    // quando pedido E quando quem pede é o próprio dono.
    pub async fn get_dog(
        &self,
        id: Uuid,
        caller_id: Uuid,
        include_owner: bool,
    ) -> Result<DogResponse, AppError> {
        let dog = self.dog_repo.find_by_id(id).await?.ok_or(AppError::DogNotFound)?;

        let owner = if include_owner && dog.owner_id == caller_id {
            self.dog_repo.find_owner(dog.owner_id).await?
        } else {
            None
        };

        Ok(DogResponse::from_dog(dog, owner))
    }

    pub async fn list_my_dogs(&self, owner_id: Uuid) -> Result<Vec<Dog>, AppError> {
        self.dog_repo.list_by_owner(owner_id).await
    }

    pub async fn update_dog(
        &self,
        id: Uuid,
        owner_id: Uuid,
        payload: &UpdateDogPayload,
    ) -> Result<Dog, AppError> {
        self.find_owned(id, owner_id).await?;

        // Troca de raça passa pela mesma validação externa do cadastro.
        let raca = match &payload.raca {
            Some(raca) => Some(self.check_breed(raca).await?),
            None => None,
        };

        self.dog_repo
            .update_dog(
                id,
                payload.nome.as_deref(),
                payload.idade,
                raca.as_deref(),
                payload.porte,
            )
            .await?
            .ok_or(AppError::DogNotFound)
    }

    pub async fn delete_dog(&self, id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
        self.find_owned(id, owner_id).await?;

        let deleted = self.dog_repo.delete_dog(id).await?;
        if !deleted {
            return Err(AppError::DogNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::breed::test_support::StubBreedValidator;

    fn service_with_breeds(known: Vec<&'static str>) -> DogService {
        // O repositório nunca é tocado nestes testes; um pool "lazy" nunca conecta.
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/teste-nunca-conecta")
            .expect("pool lazy");
        DogService::new(
            DogRepository::new(pool),
            Arc::new(StubBreedValidator { known }),
        )
    }

    #[tokio::test]
    async fn raca_desconhecida_e_rejeitada_antes_de_persistir() {
        let service = service_with_breeds(vec!["labrador"]);
        let result = service.check_breed("vira-lata").await;
        assert!(matches!(result, Err(AppError::UnknownBreed(_))));
    }

    #[tokio::test]
    async fn raca_conhecida_sai_normalizada() {
        let service = service_with_breeds(vec!["labrador"]);
        let raca = service.check_breed("  Labrador ").await.unwrap();
        assert_eq!(raca, "labrador");
    }
}
