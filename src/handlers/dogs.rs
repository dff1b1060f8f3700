// src/handlers/dogs.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::dog::{CreateDogPayload, Dog, DogResponse, UpdateDogPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetDogQuery {
    // `?includeOwner=true` anexa os dados do dono (apenas para o próprio dono)
    #[serde(rename = "includeOwner", default)]
    pub include_owner: bool,
}

// POST /api/dogs
#[utoipa::path(
    post,
    path = "/api/dogs",
    tag = "Dogs",
    request_body = CreateDogPayload,
    responses(
        (status = 201, description = "Cachorro cadastrado", body = Dog),
        (status = 400, description = "Dados inválidos ou raça desconhecida")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_dog(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
    Json(payload): Json<CreateDogPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let dog = app_state
        .dog_service
        .create_dog(current_user.id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(dog)))
}

// GET /api/dogs - cães do usuário logado
#[utoipa::path(
    get,
    path = "/api/dogs",
    tag = "Dogs",
    responses((status = 200, description = "Cães do usuário logado", body = [Dog])),
    security(("api_jwt" = []))
)]
pub async fn list_dogs(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
) -> Result<Json<Vec<Dog>>, AppError> {
    let dogs = app_state.dog_service.list_my_dogs(current_user.id).await?;
    Ok(Json(dogs))
}

// GET /api/dogs/{id}
#[utoipa::path(
    get,
    path = "/api/dogs/{id}",
    tag = "Dogs",
    params(
        ("id" = Uuid, Path, description = "ID do cachorro"),
        GetDogQuery
    ),
    responses(
        (status = 200, description = "Cachorro encontrado", body = DogResponse),
        (status = 404, description = "Cachorro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dog(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<GetDogQuery>,
) -> Result<Json<DogResponse>, AppError> {
    let dog = app_state
        .dog_service
        .get_dog(id, current_user.id, query.include_owner)
        .await?;
    Ok(Json(dog))
}

// PUT /api/dogs/{id} - apenas o dono
#[utoipa::path(
    put,
    path = "/api/dogs/{id}",
    tag = "Dogs",
    params(("id" = Uuid, Path, description = "ID do cachorro")),
    request_body = UpdateDogPayload,
    responses(
        (status = 200, description = "Cachorro atualizado", body = Dog),
        (status = 404, description = "Cachorro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_dog(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDogPayload>,
) -> Result<Json<Dog>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let dog = app_state
        .dog_service
        .update_dog(id, current_user.id, &payload)
        .await?;

    Ok(Json(dog))
}

// DELETE /api/dogs/{id} - apenas o dono
#[utoipa::path(
    delete,
    path = "/api/dogs/{id}",
    tag = "Dogs",
    params(("id" = Uuid, Path, description = "ID do cachorro")),
    responses(
        (status = 204, description = "Cachorro deletado"),
        (status = 404, description = "Cachorro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_dog(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.dog_service.delete_dog(id, current_user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
