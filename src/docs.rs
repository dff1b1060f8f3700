// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Dogs ---
        handlers::dogs::create_dog,
        handlers::dogs::list_dogs,
        handlers::dogs::get_dog,
        handlers::dogs::update_dog,
        handlers::dogs::delete_dog,

        // --- Services ---
        handlers::services::create_service,
        handlers::services::list_services,
        handlers::services::get_service,
        handlers::services::update_service,
        handlers::services::delete_service,

        // --- Appointments ---
        handlers::appointments::create_appointment,
        handlers::appointments::list_appointments,
        handlers::appointments::get_appointment,
        handlers::appointments::update_appointment,
        handlers::appointments::delete_appointment,
    ),
    components(
        schemas(
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::AuthResponse,
            models::dog::Dog,
            models::dog::DogOwner,
            models::dog::DogResponse,
            models::dog::Porte,
            models::dog::CreateDogPayload,
            models::dog::UpdateDogPayload,
            models::service::Service,
            models::service::ServicePayload,
            models::appointment::Appointment,
            models::appointment::AppointmentDetail,
            models::appointment::AppointmentSummary,
            models::appointment::AppointmentStatus,
            models::appointment::DogSummary,
            models::appointment::ServiceSummary,
            models::appointment::CreateAppointmentPayload,
            models::appointment::UpdateAppointmentPayload,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registro e login"),
        (name = "Users", description = "Gestão de usuários"),
        (name = "Dogs", description = "Cães do usuário logado"),
        (name = "Services", description = "Catálogo de serviços do petshop"),
        (name = "Appointments", description = "Agendamentos de banho, tosa e afins")
    ),
    info(
        title = "Petshop Scheduling API",
        description = "Backend de agendamentos de petshop: usuários, cães, serviços e agendamentos."
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
