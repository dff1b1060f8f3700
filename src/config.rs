// src/config.rs

use std::sync::Arc;
use std::{env, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{AppointmentRepository, DogRepository, ServiceRepository, UserRepository},
    services::{
        appointment_service::AppointmentService, auth::AuthService, breed::DogCeoBreedValidator,
        catalog_service::CatalogService, dog_service::DogService, user_service::UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub dog_service: DogService,
    pub catalog_service: CatalogService,
    pub appointment_service: AppointmentService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let dog_repo = DogRepository::new(db_pool.clone());
        let service_repo = ServiceRepository::new(db_pool.clone());
        let appointment_repo = AppointmentRepository::new(db_pool.clone());

        // A base de raças entra como capacidade injetada (stub nos testes)
        let breed_validator = Arc::new(DogCeoBreedValidator::new());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let user_service = UserService::new(user_repo);
        let dog_service = DogService::new(dog_repo.clone(), breed_validator);
        let catalog_service = CatalogService::new(service_repo.clone());
        let appointment_service =
            AppointmentService::new(appointment_repo, dog_repo, service_repo, db_pool.clone());

        Ok(Self {
            db_pool,
            auth_service,
            user_service,
            dog_service,
            catalog_service,
            appointment_service,
        })
    }
}
