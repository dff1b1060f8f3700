// src/models/appointment.rs

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{dog::Dog, service::Service};

// Antecedência mínima exigida para marcar um agendamento.
pub const FUTURE_BUFFER_SECS: i64 = 60;

// Status do agendamento, espelhado no enum `appointment_status` do Postgres.
// Nenhuma transição é proibida; AGENDADO -> CONCLUIDO/CANCELADO é o fluxo normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status")]
pub enum AppointmentStatus {
    #[sqlx(rename = "AGENDADO")]
    #[serde(rename = "AGENDADO")]
    Agendado,
    #[sqlx(rename = "CONCLUIDO")]
    #[serde(rename = "CONCLUIDO")]
    Concluido,
    #[sqlx(rename = "CANCELADO")]
    #[serde(rename = "CANCELADO")]
    Cancelado,
}

// Linha da tabela `appointments`, sem os conjuntos de relacionamento
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Agendamento materializado: cães e serviços completos, não apenas IDs
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetail {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub dogs: Vec<Dog>,
    pub services: Vec<Service>,
}

impl AppointmentDetail {
    pub fn assemble(appointment: Appointment, dogs: Vec<Dog>, services: Vec<Service>) -> Self {
        Self {
            id: appointment.id,
            date: appointment.date,
            status: appointment.status,
            user_id: appointment.user_id,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
            dogs,
            services,
        }
    }
}

// Projeções mais leves para a listagem (GET /appointments)
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DogSummary {
    pub nome: String,
    pub raca: String,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSummary {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub dogs: Vec<DogSummary>,
    pub services: Vec<ServiceSummary>,
}

// A data da consulta deve estar no futuro, com a antecedência mínima.
pub fn validate_future_date(date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *date >= Utc::now() + Duration::seconds(FUTURE_BUFFER_SECS) {
        Ok(())
    } else {
        Err(ValidationError::new("date")
            .with_message("A data do agendamento deve ser no futuro.".into()))
    }
}

// Dados para criação de um agendamento
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    #[validate(custom(function = validate_future_date))]
    pub date: DateTime<Utc>,

    #[validate(length(min = 1, message = "Pelo menos um ID de cachorro é obrigatório."))]
    pub dog_ids: Vec<Uuid>,

    #[validate(length(min = 1, message = "Pelo menos um ID de serviço é obrigatório."))]
    pub service_ids: Vec<Uuid>,
}

// Atualização parcial: campos ausentes não são tocados.
// Em particular, omitir `dogIds`/`serviceIds` preserva os vínculos atuais.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentPayload {
    #[validate(custom(function = validate_future_date))]
    pub date: Option<DateTime<Utc>>,

    pub status: Option<AppointmentStatus>,

    #[validate(length(min = 1, message = "Pelo menos um ID de cachorro é obrigatório."))]
    pub dog_ids: Option<Vec<Uuid>>,

    #[validate(length(min = 1, message = "Pelo menos um ID de serviço é obrigatório."))]
    pub service_ids: Option<Vec<Uuid>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload(date: DateTime<Utc>) -> CreateAppointmentPayload {
        CreateAppointmentPayload {
            date,
            dog_ids: vec![Uuid::new_v4()],
            service_ids: vec![Uuid::new_v4()],
        }
    }

    #[test]
    fn data_no_passado_falha() {
        let p = create_payload(Utc::now() - Duration::hours(1));
        assert!(p.validate().is_err());
    }

    #[test]
    fn data_dentro_do_buffer_falha() {
        // 30s à frente ainda está dentro da antecedência mínima de 60s.
        let p = create_payload(Utc::now() + Duration::seconds(30));
        assert!(p.validate().is_err());
    }

    #[test]
    fn data_futura_passa() {
        let p = create_payload(Utc::now() + Duration::days(1));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn listas_vazias_falham() {
        let mut p = create_payload(Utc::now() + Duration::days(1));
        p.dog_ids.clear();
        assert!(p.validate().is_err());

        let mut p = create_payload(Utc::now() + Duration::days(1));
        p.service_ids.clear();
        assert!(p.validate().is_err());
    }

    #[test]
    fn patch_somente_status_e_valido() {
        let json = r#"{ "status": "CONCLUIDO" }"#;
        let p: UpdateAppointmentPayload = serde_json::from_str(json).unwrap();
        assert!(p.validate().is_ok());
        assert_eq!(p.status, Some(AppointmentStatus::Concluido));
        assert!(p.date.is_none());
        assert!(p.dog_ids.is_none());
        assert!(p.service_ids.is_none());
    }

    #[test]
    fn patch_com_lista_vazia_falha() {
        let json = r#"{ "dogIds": [] }"#;
        let p: UpdateAppointmentPayload = serde_json::from_str(json).unwrap();
        assert!(p.validate().is_err());
    }

    #[test]
    fn status_serializa_em_maiusculas() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Agendado).unwrap(),
            "\"AGENDADO\""
        );
    }
}
