// src/handlers/services.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::service::{Service, ServicePayload},
};

// POST /api/services
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Services",
    request_body = ServicePayload,
    responses(
        (status = 201, description = "Serviço criado", body = Service),
        (status = 409, description = "Serviço com este nome já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    Json(payload): Json<ServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let service = app_state.catalog_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

// GET /api/services - leitura pública
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Services",
    responses((status = 200, description = "Catálogo de serviços", body = [Service]))
)]
pub async fn list_services(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = app_state.catalog_service.list().await?;
    Ok(Json(services))
}

// GET /api/services/{id} - leitura pública
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço encontrado", body = Service),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn get_service(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Service>, AppError> {
    let service = app_state.catalog_service.get(id).await?;
    Ok(Json(service))
}

// PUT /api/services/{id}
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    request_body = ServicePayload,
    responses(
        (status = 200, description = "Serviço atualizado", body = Service),
        (status = 404, description = "Serviço não encontrado"),
        (status = 409, description = "Serviço com este nome já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_service(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ServicePayload>,
) -> Result<Json<Service>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let service = app_state.catalog_service.update(id, &payload).await?;
    Ok(Json(service))
}

// DELETE /api/services/{id} - falha com 409 se ainda houver agendamentos
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = Uuid, Path, description = "ID do serviço")),
    responses(
        (status = 204, description = "Serviço deletado"),
        (status = 404, description = "Serviço não encontrado"),
        (status = 409, description = "Serviço associado a agendamentos existentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_service(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
