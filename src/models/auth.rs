// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub cpf: String,
    pub idade: i32,
    pub telefone: Option<String>,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// CPF: exatamente 11 dígitos numéricos.
pub fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    if cpf.len() == 11 && cpf.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("cpf").with_message("CPF deve conter exatamente 11 dígitos.".into()))
    }
}

// Telefone no padrão BR: (XX) 9XXXX-XXXX, com pontuação opcional.
pub fn validate_telefone_br(telefone: &str) -> Result<(), ValidationError> {
    let digits: Vec<char> = telefone.chars().filter(|c| c.is_ascii_digit()).collect();
    let extras_ok = telefone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '(' | ')' | '-' | ' '));

    // 11 dígitos: DDD + celular começando com 9.
    if extras_ok && digits.len() == 11 && digits[2] == '9' {
        Ok(())
    } else {
        Err(ValidationError::new("telefone")
            .with_message("Formato de telefone inválido. Use o padrão BR: (XX) 9XXXX-XXXX.".into()))
    }
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(length(min = 2, max = 100, message = "Nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Maria Silva")]
    pub nome: String,

    #[validate(email(message = "Formato de e-mail inválido."), length(max = 100))]
    #[schema(example = "maria@example.com")]
    pub email: String,

    #[validate(custom(function = validate_cpf))]
    #[schema(example = "12345678901")]
    pub cpf: String,

    #[validate(range(min = 1, message = "Idade deve ser um número inteiro positivo."))]
    #[schema(example = 30)]
    pub idade: i32,

    // Opcional, mas se vier precisa seguir o padrão BR.
    #[validate(custom(function = validate_telefone_br))]
    #[schema(example = "(11) 91234-5678")]
    pub telefone: Option<String>,

    #[validate(length(min = 8, message = "Senha deve ter no mínimo 8 caracteres."))]
    pub password: String,
}

// Dados para login: `identifier` pode ser e-mail ou CPF
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserPayload {
    #[validate(length(min = 1, message = "E-mail ou CPF é obrigatório."))]
    #[schema(example = "maria@example.com")]
    pub identifier: String,

    #[validate(length(min = 1, message = "Senha é obrigatória."))]
    pub password: String,
}

// Atualização do próprio perfil (todos os campos opcionais)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 2, max = 100, message = "Nome deve ter no mínimo 2 caracteres."))]
    pub nome: Option<String>,

    #[validate(email(message = "Formato de e-mail inválido."), length(max = 100))]
    pub email: Option<String>,

    #[validate(custom(function = validate_cpf))]
    pub cpf: Option<String>,

    #[validate(range(min = 1, message = "Idade deve ser um número inteiro positivo."))]
    pub idade: Option<i32>,

    #[validate(custom(function = validate_telefone_br))]
    pub telefone: Option<String>,
}

// Resposta de autenticação: usuário (sem hash) + token
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,      // Subject (ID do usuário)
    pub email: String,  // E-mail do usuário
    pub exp: usize,     // Expiration time (quando o token expira)
    pub iat: usize,     // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RegisterUserPayload {
        RegisterUserPayload {
            nome: "Maria Silva".into(),
            email: "maria@example.com".into(),
            cpf: "12345678901".into(),
            idade: 30,
            telefone: Some("(11) 91234-5678".into()),
            password: "segredo123".into(),
        }
    }

    #[test]
    fn register_payload_valido_passa() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn cpf_precisa_de_11_digitos() {
        let mut p = payload();
        p.cpf = "123".into();
        assert!(p.validate().is_err());

        p.cpf = "1234567890a".into();
        assert!(p.validate().is_err());
    }

    #[test]
    fn telefone_fora_do_padrao_br_falha() {
        let mut p = payload();
        p.telefone = Some("1234".into());
        assert!(p.validate().is_err());

        // Sem telefone é válido (campo opcional).
        p.telefone = None;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn telefone_aceita_variacoes_de_pontuacao() {
        for t in ["(11) 91234-5678", "11912345678", "11 91234-5678"] {
            assert!(validate_telefone_br(t).is_ok(), "deveria aceitar {t}");
        }
    }

    #[test]
    fn senha_curta_falha() {
        let mut p = payload();
        p.password = "1234567".into();
        assert!(p.validate().is_err());
    }
}
