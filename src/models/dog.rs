// src/models/dog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Porte do cachorro, espelhado no enum `porte` do Postgres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "porte")]
pub enum Porte {
    #[sqlx(rename = "PEQUENO")]
    #[serde(rename = "PEQUENO")]
    Pequeno,
    #[sqlx(rename = "MEDIO")]
    #[serde(rename = "MEDIO")]
    Medio,
    #[sqlx(rename = "GRANDE")]
    #[serde(rename = "GRANDE")]
    Grande,
}

// Representa um cão vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    pub id: Uuid,
    pub nome: String,
    pub idade: i32,
    pub raca: String,
    pub porte: Porte,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Projeção do dono para `GET /dogs/{id}?includeOwner=true`
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DogOwner {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
}

// Resposta de um cão, com o dono anexado apenas quando solicitado e permitido
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DogResponse {
    pub id: Uuid,
    pub nome: String,
    pub idade: i32,
    pub raca: String,
    pub porte: Porte,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<DogOwner>,
}

impl DogResponse {
    pub fn from_dog(dog: Dog, owner: Option<DogOwner>) -> Self {
        Self {
            id: dog.id,
            nome: dog.nome,
            idade: dog.idade,
            raca: dog.raca,
            porte: dog.porte,
            owner_id: dog.owner_id,
            created_at: dog.created_at,
            updated_at: dog.updated_at,
            owner,
        }
    }
}

// Dados para cadastro de um novo cão.
// A raça é validada contra a base externa (dog.ceo) no serviço, não aqui.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDogPayload {
    #[validate(length(min = 1, message = "Nome do cão é obrigatório."))]
    #[schema(example = "Rex")]
    pub nome: String,

    #[validate(range(min = 1, max = 20, message = "Idade deve estar entre 1 e 20 anos."))]
    #[schema(example = 3)]
    pub idade: i32,

    #[validate(length(min = 1, message = "Raça é obrigatória."))]
    #[schema(example = "labrador")]
    pub raca: String,

    #[schema(example = "GRANDE")]
    pub porte: Porte,
}

// Atualização parcial de um cão (apenas o dono)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDogPayload {
    #[validate(length(min = 1, message = "Nome do cão é obrigatório."))]
    pub nome: Option<String>,

    #[validate(range(min = 1, max = 20, message = "Idade deve estar entre 1 e 20 anos."))]
    pub idade: Option<i32>,

    #[validate(length(min = 1, message = "Raça é obrigatória."))]
    pub raca: Option<String>,

    pub porte: Option<Porte>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idade_fora_do_intervalo_falha() {
        let mut p = CreateDogPayload {
            nome: "Rex".into(),
            idade: 0,
            raca: "labrador".into(),
            porte: Porte::Grande,
        };
        assert!(p.validate().is_err());

        p.idade = 21;
        assert!(p.validate().is_err());

        p.idade = 20;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn porte_serializa_em_maiusculas() {
        assert_eq!(serde_json::to_string(&Porte::Pequeno).unwrap(), "\"PEQUENO\"");
        let porte: Porte = serde_json::from_str("\"MEDIO\"").unwrap();
        assert_eq!(porte, Porte::Medio);
    }

    #[test]
    fn porte_desconhecido_nao_desserializa() {
        assert!(serde_json::from_str::<Porte>("\"GIGANTE\"").is_err());
    }
}
