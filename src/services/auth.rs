// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, RegisterUserPayload, User},
};

// Token válido por 1 dia
const TOKEN_TTL_DAYS: i64 = 1;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self {
            user_repo,
            jwt_secret,
        }
    }

    pub async fn register_user(
        &self,
        payload: &RegisterUserPayload,
    ) -> Result<(User, String), AppError> {
        // Hashing em um thread separado para não bloquear o runtime
        let password_clone = payload.password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // A violação de unicidade (e-mail/CPF) vira 409 no repositório.
        let new_user = self
            .user_repo
            .create_user(
                &payload.nome,
                &payload.email,
                &payload.cpf,
                payload.idade,
                payload.telefone.as_deref(),
                &hashed_password,
            )
            .await?;

        let token = create_token(&new_user, &self.jwt_secret)?;
        Ok((new_user, token))
    }

    // `identifier` pode ser e-mail ou CPF
    pub async fn login_user(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<(User, String), AppError> {
        let user = self
            .user_repo
            .find_by_identifier(identifier)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = create_token(&user, &self.jwt_secret)?;
        Ok((user, token))
    }

    // Resolve o token da requisição para o usuário dono dele.
    // A busca no banco garante que tokens de usuários deletados parem de valer.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_token(token, &self.jwt_secret)?;
        self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }
}

pub fn create_token(user: &User, jwt_secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?)
}

// Qualquer defeito no token (assinatura, expiração, formato) vira InvalidToken.
pub fn decode_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &validation,
    )
    .map_err(|_| AppError::InvalidToken)?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            nome: "Maria Silva".into(),
            email: "maria@example.com".into(),
            cpf: "12345678901".into(),
            idade: 30,
            telefone: None,
            password_hash: "hash".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn token_vai_e_volta_com_mesmas_claims() {
        let user = user();
        let token = create_token(&user, "segredo-de-teste").unwrap();
        let claims = decode_token(&token, "segredo-de-teste").unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_com_segredo_errado_falha() {
        let token = create_token(&user(), "segredo-a").unwrap();
        let result = decode_token(&token, "segredo-b");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn token_expirado_falha() {
        let user = user();
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            exp: (now - chrono::Duration::hours(2)).timestamp() as usize,
            iat: (now - chrono::Duration::hours(3)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("segredo".as_ref()),
        )
        .unwrap();

        let result = decode_token(&token, "segredo");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn lixo_nao_e_token() {
        assert!(matches!(
            decode_token("nao-e-um-jwt", "segredo"),
            Err(AppError::InvalidToken)
        ));
    }
}
