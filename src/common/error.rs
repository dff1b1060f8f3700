use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante corresponde a um status HTTP contratual (ver IntoResponse).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Um ou mais IDs de cachorro são inválidos ou não pertencem a você")]
    InvalidDogReference,

    #[error("Um ou mais IDs de serviço são inválidos")]
    InvalidServiceReference,

    // A consulta à base externa também cai aqui: falha na API = raça desconhecida.
    #[error("Raça desconhecida: {0}")]
    UnknownBreed(String),

    #[error("E-mail ou CPF já cadastrado")]
    EmailOrCpfAlreadyExists,

    #[error("Serviço com este nome já existe")]
    ServiceNameAlreadyExists,

    #[error("Serviço associado a agendamentos existentes")]
    ServiceInUse,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token não fornecido")]
    MissingToken,

    #[error("Token inválido ou expirado")]
    InvalidToken,

    #[error("Acesso negado ao recurso")]
    Forbidden,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Cachorro não encontrado")]
    DogNotFound,

    #[error("Serviço não encontrado")]
    ServiceNotFound,

    #[error("Agendamento não encontrado")]
    AppointmentNotFound,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    // Status contratual de cada variante (ver tabela da API).
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidDogReference
            | AppError::InvalidServiceReference
            | AppError::UnknownBreed(_) => StatusCode::BAD_REQUEST,

            AppError::InvalidCredentials | AppError::MissingToken => StatusCode::UNAUTHORIZED,

            // Token presente porém inválido/expirado -> 403 (não 401).
            AppError::InvalidToken | AppError::Forbidden => StatusCode::FORBIDDEN,

            // A ausência e a posse por outro usuário são indistinguíveis de
            // propósito: ambas viram 404 para não vazar existência.
            AppError::UserNotFound
            | AppError::DogNotFound
            | AppError::ServiceNotFound
            | AppError::AppointmentNotFound => StatusCode::NOT_FOUND,

            AppError::EmailOrCpfAlreadyExists
            | AppError::ServiceNameAlreadyExists
            | AppError::ServiceInUse => StatusCode::CONFLICT,

            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Retorna todos os detalhes da validação, campo a campo.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Um ou mais campos são inválidos.",
                "details": details,
            }));
            return (status, body).into_response();
        }

        if let AppError::UnknownBreed(raca) = &self {
            let body = Json(json!({
                "error": format!(
                    "A raça '{raca}' não foi encontrada na base de dados de raças (dog.ceo)."
                ),
            }));
            return (status, body).into_response();
        }

        let error_message = match &self {
            AppError::InvalidDogReference => {
                "Um ou mais IDs de cachorro são inválidos ou não pertencem a você."
            }
            AppError::InvalidServiceReference => "Um ou mais IDs de serviço são inválidos.",
            AppError::EmailOrCpfAlreadyExists => "E-mail ou CPF já cadastrado.",
            AppError::ServiceNameAlreadyExists => "Serviço com este nome já existe.",
            AppError::ServiceInUse => {
                "Não é possível deletar. O serviço está associado a agendamentos existentes."
            }
            AppError::InvalidCredentials => "Credenciais inválidas.",
            AppError::MissingToken => "Acesso negado. Token não fornecido.",
            AppError::InvalidToken => "Token inválido ou expirado.",
            AppError::Forbidden => "Você não tem permissão para acessar este recurso.",
            AppError::UserNotFound => "Usuário não encontrado.",
            AppError::DogNotFound => "Cachorro não encontrado.",
            AppError::ServiceNotFound => "Serviço não encontrado.",
            AppError::AppointmentNotFound => "Agendamento não encontrado ou não pertence a você.",

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe algo genérico,
            // exceto em builds de desenvolvimento, que incluem o detalhe.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                if cfg!(debug_assertions) {
                    let body = Json(json!({
                        "error": "Erro interno do servidor.",
                        "detail": e.to_string(),
                    }));
                    return (status, body).into_response();
                }
                "Erro interno do servidor."
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_failures_are_indistinguishable_from_absence() {
        // 404 para ambos os casos, nunca 403, para não vazar existência.
        assert_eq!(
            AppError::AppointmentNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::DogNotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn reference_errors_are_bad_request() {
        assert_eq!(
            AppError::InvalidDogReference.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidServiceReference.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn token_errors_split_between_401_and_403() {
        assert_eq!(AppError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn conflicts_are_409() {
        assert_eq!(
            AppError::EmailOrCpfAlreadyExists.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::ServiceInUse.status_code(), StatusCode::CONFLICT);
    }
}
