// src/models/service.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Representa um serviço do petshop (banho, tosa...) vindo do banco
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Preço precisa ser estritamente positivo.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("price")
            .with_message("Preço deve ser um número positivo.".into()))
    }
}

// Payload único para criação e atualização (ambos exigem todos os campos)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    #[validate(length(min = 2, message = "Nome do serviço é obrigatório."))]
    #[schema(example = "Banho e tosa")]
    pub name: String,

    #[validate(custom(function = validate_price))]
    #[schema(example = 79.90)]
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preco_zero_ou_negativo_falha() {
        let mut p = ServicePayload {
            name: "Banho".into(),
            price: Decimal::ZERO,
        };
        assert!(p.validate().is_err());

        p.price = Decimal::from(-5);
        assert!(p.validate().is_err());

        p.price = Decimal::new(7990, 2); // 79.90
        assert!(p.validate().is_ok());
    }

    #[test]
    fn nome_curto_falha() {
        let p = ServicePayload {
            name: "B".into(),
            price: Decimal::from(50),
        };
        assert!(p.validate().is_err());
    }
}
