// src/handlers/appointments.rs

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
    middleware::auth::AuthenticatedUser,
    models::appointment::{
        AppointmentDetail, AppointmentSummary, CreateAppointmentPayload, UpdateAppointmentPayload,
    },
};

// POST /api/appointments
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Appointments",
    request_body = CreateAppointmentPayload,
    responses(
        (status = 201, description = "Agendamento criado", body = AppointmentDetail),
        (status = 400, description = "Referências de cão/serviço inválidas ou dados malformados")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
    Json(payload): Json<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let appointment = app_state
        .appointment_service
        .create(current_user.id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// GET /api/appointments - agendamentos do usuário logado, por data
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Appointments",
    responses((status = 200, description = "Agendamentos do usuário", body = [AppointmentSummary])),
    security(("api_jwt" = []))
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
) -> Result<Json<Vec<AppointmentSummary>>, AppError> {
    let appointments = app_state
        .appointment_service
        .list_for_user(current_user.id)
        .await?;
    Ok(Json(appointments))
}

// GET /api/appointments/{id}
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Agendamento encontrado", body = AppointmentDetail),
        (status = 404, description = "Agendamento não encontrado ou de outro usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_appointment(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentDetail>, AppError> {
    let appointment = app_state
        .appointment_service
        .get(id, current_user.id)
        .await?;
    Ok(Json(appointment))
}

// PUT /api/appointments/{id}
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    request_body = UpdateAppointmentPayload,
    responses(
        (status = 200, description = "Agendamento atualizado", body = AppointmentDetail),
        (status = 400, description = "Referências de cão/serviço inválidas"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_appointment(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentPayload>,
) -> Result<Json<AppointmentDetail>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let appointment = app_state
        .appointment_service
        .update(id, current_user.id, &payload)
        .await?;

    Ok(Json(appointment))
}

// DELETE /api/appointments/{id}
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 204, description = "Agendamento deletado"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_appointment(
    State(app_state): State<AppState>,
    AuthenticatedUser(current_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state
        .appointment_service
        .delete(id, current_user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
