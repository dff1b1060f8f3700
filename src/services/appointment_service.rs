// src/services/appointment_service.rs
//
// O motor de agendamentos: orquestra a linha principal e os dois conjuntos
// many-to-many (cães e serviços), validando posse/existência ANTES de qualquer
// escrita e aplicando todas as escritas em uma única transação.

use std::collections::HashSet;

use anyhow::anyhow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, DogRepository, ServiceRepository},
    models::{
        appointment::{
            Appointment, AppointmentDetail, AppointmentSummary, CreateAppointmentPayload,
            UpdateAppointmentPayload,
        },
        dog::Dog,
        service::Service,
    },
};

// Todos os IDs pedidos resolveram? Duplicatas no payload são toleradas:
// o que conta é o conjunto distinto.
fn all_ids_resolved(requested: &[Uuid], found: usize) -> bool {
    let distinct: HashSet<&Uuid> = requested.iter().collect();
    found == distinct.len()
}

#[derive(Clone)]
pub struct AppointmentService {
    appointment_repo: AppointmentRepository,
    dog_repo: DogRepository,
    service_repo: ServiceRepository,
    pool: PgPool,
}

impl AppointmentService {
    pub fn new(
        appointment_repo: AppointmentRepository,
        dog_repo: DogRepository,
        service_repo: ServiceRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            appointment_repo,
            dog_repo,
            service_repo,
            pool,
        }
    }

    // Valida que todos os cães existem E pertencem ao usuário
    async fn validate_owned_dogs(
        &self,
        dog_ids: &[Uuid],
        user_id: Uuid,
    ) -> Result<Vec<Dog>, AppError> {
        if dog_ids.is_empty() {
            return Err(AppError::InvalidDogReference);
        }
        let dogs = self.dog_repo.find_owned_by_ids(dog_ids, user_id).await?;
        if !all_ids_resolved(dog_ids, dogs.len()) {
            return Err(AppError::InvalidDogReference);
        }
        Ok(dogs)
    }

    // Valida que todos os serviços existem (serviços são globais, sem dono)
    async fn validate_services(&self, service_ids: &[Uuid]) -> Result<Vec<Service>, AppError> {
        if service_ids.is_empty() {
            return Err(AppError::InvalidServiceReference);
        }
        let services = self.service_repo.find_by_ids(service_ids).await?;
        if !all_ids_resolved(service_ids, services.len()) {
            return Err(AppError::InvalidServiceReference);
        }
        Ok(services)
    }

    // Agendamento com cães e serviços completos, não apenas IDs
    async fn materialize(&self, appointment: Appointment) -> Result<AppointmentDetail, AppError> {
        let dogs = self.appointment_repo.dogs_of(appointment.id).await?;
        let services = self.appointment_repo.services_of(appointment.id).await?;
        Ok(AppointmentDetail::assemble(appointment, dogs, services))
    }

    // Trata o agendamento de outro usuário como inexistente (404).
    fn owned_or_not_found(
        maybe: Option<Appointment>,
        user_id: Uuid,
    ) -> Result<Appointment, AppError> {
        match maybe {
            Some(a) if a.user_id == user_id => Ok(a),
            _ => Err(AppError::AppointmentNotFound),
        }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        payload: &CreateAppointmentPayload,
    ) -> Result<AppointmentDetail, AppError> {
        // Revalida as listas aqui: o motor não assume que o schema já barrou
        // payloads vazios. Nenhuma escrita acontece antes destas checagens.
        self.validate_owned_dogs(&payload.dog_ids, user_id).await?;
        self.validate_services(&payload.service_ids).await?;

        // Linha principal + junções em uma única transação: tudo ou nada.
        let mut tx = self.pool.begin().await?;

        let appointment = self
            .appointment_repo
            .insert_appointment(&mut *tx, user_id, payload.date)
            .await?;
        self.appointment_repo
            .insert_dog_links(&mut *tx, appointment.id, &payload.dog_ids)
            .await?;
        self.appointment_repo
            .insert_service_links(&mut *tx, appointment.id, &payload.service_ids)
            .await?;

        tx.commit().await?;

        self.materialize(appointment).await
    }

    pub async fn get(&self, id: Uuid, user_id: Uuid) -> Result<AppointmentDetail, AppError> {
        // A posse está embutida na consulta: ausência e posse alheia são o mesmo 404.
        let appointment = self
            .appointment_repo
            .find_by_id_for_user(id, user_id)
            .await?
            .ok_or(AppError::AppointmentNotFound)?;

        self.materialize(appointment).await
    }

    // Listagem ordenada por data, com projeções leves dos vínculos
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AppointmentSummary>, AppError> {
        let appointments = self.appointment_repo.list_for_user(user_id).await?;

        let mut summaries = Vec::with_capacity(appointments.len());
        for appointment in appointments {
            let dogs = self.appointment_repo.dog_summaries_of(appointment.id).await?;
            let services = self
                .appointment_repo
                .service_summaries_of(appointment.id)
                .await?;
            summaries.push(AppointmentSummary {
                id: appointment.id,
                date: appointment.date,
                status: appointment.status,
                dogs,
                services,
            });
        }
        Ok(summaries)
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        payload: &UpdateAppointmentPayload,
    ) -> Result<AppointmentDetail, AppError> {
        let existing = self.appointment_repo.find_by_id(id).await?;
        let existing = Self::owned_or_not_found(existing, user_id)?;

        // Valida os conjuntos ANTES de abrir a transação: erro de referência
        // não pode deixar nenhum efeito colateral.
        if let Some(dog_ids) = &payload.dog_ids {
            self.validate_owned_dogs(dog_ids, user_id).await?;
        }
        if let Some(service_ids) = &payload.service_ids {
            self.validate_services(service_ids).await?;
        }

        // Campos escalares + substituição integral de cada conjunto fornecido
        // (deleta tudo e insere de novo), em uma única unidade atômica.
        // O que o patch omitiu não é tocado: nem os conjuntos, nem os escalares
        // (um patch só de vínculos não reescreve date/status nem o updated_at).
        let mut tx = self.pool.begin().await?;

        if payload.date.is_some() || payload.status.is_some() {
            self.appointment_repo
                .update_scalars(&mut *tx, existing.id, payload.date, payload.status)
                .await?;
        }

        if let Some(dog_ids) = &payload.dog_ids {
            self.appointment_repo
                .delete_dog_links(&mut *tx, existing.id)
                .await?;
            self.appointment_repo
                .insert_dog_links(&mut *tx, existing.id, dog_ids)
                .await?;
        }

        if let Some(service_ids) = &payload.service_ids {
            self.appointment_repo
                .delete_service_links(&mut *tx, existing.id)
                .await?;
            self.appointment_repo
                .insert_service_links(&mut *tx, existing.id, service_ids)
                .await?;
        }

        tx.commit().await?;

        // Rebusca para devolver o estado commitado; se a linha sumiu no meio
        // do caminho, isso é inconsistência interna (500), não 404.
        let full = self
            .appointment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("agendamento {} desapareceu após a transação de update", id))?;

        self.materialize(full).await
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        let existing = self.appointment_repo.find_by_id(id).await?;
        let existing = Self::owned_or_not_found(existing, user_id)?;

        // As junções caem em cascata.
        let deleted = self.appointment_repo.delete(existing.id).await?;
        if !deleted {
            return Err(AppError::AppointmentNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_duplicados_sao_tolerados() {
        let id = Uuid::new_v4();
        // Duas ocorrências do mesmo ID resolvem para uma única entidade.
        assert!(all_ids_resolved(&[id, id], 1));
    }

    #[test]
    fn id_nao_resolvido_falha() {
        let ids = [Uuid::new_v4(), Uuid::new_v4()];
        // Só uma das duas entidades distintas foi encontrada.
        assert!(!all_ids_resolved(&ids, 1));
    }

    #[test]
    fn conjunto_exato_passa() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        assert!(all_ids_resolved(&ids, 3));
    }

    #[test]
    fn encontrado_a_mais_tambem_falha() {
        // Contagem maior que o conjunto distinto indicaria consulta errada.
        let ids = [Uuid::new_v4()];
        assert!(!all_ids_resolved(&ids, 2));
    }

    #[test]
    fn posse_alheia_vira_not_found() {
        use crate::models::appointment::AppointmentStatus;
        use chrono::Utc;

        let dono = Uuid::new_v4();
        let intruso = Uuid::new_v4();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            date: Utc::now(),
            status: AppointmentStatus::Agendado,
            user_id: dono,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let result = AppointmentService::owned_or_not_found(Some(appointment), intruso);
        assert!(matches!(result, Err(AppError::AppointmentNotFound)));

        let result = AppointmentService::owned_or_not_found(None, intruso);
        assert!(matches!(result, Err(AppError::AppointmentNotFound)));
    }

    // Testes contra um Postgres real (banco por teste, migrações aplicadas
    // automaticamente), cobrindo a transacionalidade e as tabelas de junção.
    mod transacional {
        use chrono::{Duration, Utc};
        use rust_decimal::Decimal;
        use sqlx::PgPool;

        use super::super::*;
        use crate::{
            db::UserRepository,
            models::{appointment::AppointmentStatus, dog::Porte},
        };

        fn motor(pool: &PgPool) -> AppointmentService {
            AppointmentService::new(
                AppointmentRepository::new(pool.clone()),
                DogRepository::new(pool.clone()),
                ServiceRepository::new(pool.clone()),
                pool.clone(),
            )
        }

        async fn seed_user(pool: &PgPool, email: &str, cpf: &str) -> Uuid {
            UserRepository::new(pool.clone())
                .create_user("Tutor de Teste", email, cpf, 30, None, "hash-irrelevante")
                .await
                .expect("seed de usuário")
                .id
        }

        async fn seed_dog(pool: &PgPool, nome: &str, owner_id: Uuid) -> Uuid {
            DogRepository::new(pool.clone())
                .create_dog(nome, 4, "vira-lata", Porte::Medio, owner_id)
                .await
                .expect("seed de cão")
                .id
        }

        async fn seed_service(pool: &PgPool, name: &str) -> Uuid {
            ServiceRepository::new(pool.clone())
                .create(name, Decimal::new(7990, 2))
                .await
                .expect("seed de serviço")
                .id
        }

        async fn dog_links(pool: &PgPool, appointment_id: Uuid) -> Vec<Uuid> {
            sqlx::query_scalar(
                "SELECT dog_id FROM appointment_dogs WHERE appointment_id = $1 ORDER BY dog_id",
            )
            .bind(appointment_id)
            .fetch_all(pool)
            .await
            .expect("leitura de appointment_dogs")
        }

        async fn service_links(pool: &PgPool, appointment_id: Uuid) -> Vec<Uuid> {
            sqlx::query_scalar(
                "SELECT service_id FROM appointment_services WHERE appointment_id = $1 ORDER BY service_id",
            )
            .bind(appointment_id)
            .fetch_all(pool)
            .await
            .expect("leitura de appointment_services")
        }

        fn amanha() -> chrono::DateTime<Utc> {
            Utc::now() + Duration::days(1)
        }

        #[sqlx::test]
        async fn criar_e_buscar_devolvem_os_mesmos_conjuntos(pool: PgPool) {
            let service = motor(&pool);
            let user_id = seed_user(&pool, "ana@example.com", "11111111111").await;
            let d1 = seed_dog(&pool, "Rex", user_id).await;
            let d2 = seed_dog(&pool, "Bela", user_id).await;
            let s1 = seed_service(&pool, "Banho").await;
            let s2 = seed_service(&pool, "Tosa").await;

            let created = service
                .create(
                    user_id,
                    &CreateAppointmentPayload {
                        date: amanha(),
                        dog_ids: vec![d1, d2],
                        service_ids: vec![s1, s2],
                    },
                )
                .await
                .expect("create deveria passar");

            assert_eq!(created.status, AppointmentStatus::Agendado);

            let fetched = service.get(created.id, user_id).await.expect("get");
            let mut dog_ids: Vec<Uuid> = fetched.dogs.iter().map(|d| d.id).collect();
            dog_ids.sort();
            let mut expected_dogs = vec![d1, d2];
            expected_dogs.sort();
            assert_eq!(dog_ids, expected_dogs);

            let mut service_ids: Vec<Uuid> = fetched.services.iter().map(|s| s.id).collect();
            service_ids.sort();
            let mut expected_services = vec![s1, s2];
            expected_services.sort();
            assert_eq!(service_ids, expected_services);
        }

        #[sqlx::test]
        async fn cao_alheio_invalida_o_create_sem_efeitos(pool: PgPool) {
            let service = motor(&pool);
            let ana = seed_user(&pool, "ana@example.com", "11111111111").await;
            let beto = seed_user(&pool, "beto@example.com", "22222222222").await;
            let dog_do_beto = seed_dog(&pool, "Thor", beto).await;
            let s1 = seed_service(&pool, "Banho").await;

            let result = service
                .create(
                    ana,
                    &CreateAppointmentPayload {
                        date: amanha(),
                        dog_ids: vec![dog_do_beto],
                        service_ids: vec![s1],
                    },
                )
                .await;
            assert!(matches!(result, Err(AppError::InvalidDogReference)));

            // Nenhuma linha pode ter sobrado de um create rejeitado.
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
                .fetch_one(&pool)
                .await
                .expect("contagem de appointments");
            assert_eq!(total, 0);
        }

        #[sqlx::test]
        async fn patch_de_caes_substitui_o_conjunto_inteiro(pool: PgPool) {
            let service = motor(&pool);
            let user_id = seed_user(&pool, "ana@example.com", "11111111111").await;
            let d1 = seed_dog(&pool, "Rex", user_id).await;
            let d2 = seed_dog(&pool, "Bela", user_id).await;
            let s1 = seed_service(&pool, "Banho").await;

            let created = service
                .create(
                    user_id,
                    &CreateAppointmentPayload {
                        date: amanha(),
                        dog_ids: vec![d1],
                        service_ids: vec![s1],
                    },
                )
                .await
                .expect("create");

            service
                .update(
                    created.id,
                    user_id,
                    &UpdateAppointmentPayload {
                        date: None,
                        status: None,
                        dog_ids: Some(vec![d2]),
                        service_ids: None,
                    },
                )
                .await
                .expect("update");

            // Substituição integral: só o conjunto novo, sem resto do antigo.
            assert_eq!(dog_links(&pool, created.id).await, vec![d2]);
            assert_eq!(service_links(&pool, created.id).await, vec![s1]);
        }

        #[sqlx::test]
        async fn patch_so_de_status_nao_toca_nos_vinculos(pool: PgPool) {
            let service = motor(&pool);
            let user_id = seed_user(&pool, "ana@example.com", "11111111111").await;
            let d1 = seed_dog(&pool, "Rex", user_id).await;
            let d2 = seed_dog(&pool, "Bela", user_id).await;
            let s1 = seed_service(&pool, "Banho").await;

            let created = service
                .create(
                    user_id,
                    &CreateAppointmentPayload {
                        date: amanha(),
                        dog_ids: vec![d1, d2],
                        service_ids: vec![s1],
                    },
                )
                .await
                .expect("create");

            let antes_dogs = dog_links(&pool, created.id).await;
            let antes_services = service_links(&pool, created.id).await;

            let updated = service
                .update(
                    created.id,
                    user_id,
                    &UpdateAppointmentPayload {
                        date: None,
                        status: Some(AppointmentStatus::Concluido),
                        dog_ids: None,
                        service_ids: None,
                    },
                )
                .await
                .expect("update");

            assert_eq!(updated.status, AppointmentStatus::Concluido);
            assert_eq!(dog_links(&pool, created.id).await, antes_dogs);
            assert_eq!(service_links(&pool, created.id).await, antes_services);
        }

        #[sqlx::test]
        async fn patch_so_de_vinculos_preserva_os_escalares(pool: PgPool) {
            let service = motor(&pool);
            let user_id = seed_user(&pool, "ana@example.com", "11111111111").await;
            let d1 = seed_dog(&pool, "Rex", user_id).await;
            let d2 = seed_dog(&pool, "Bela", user_id).await;
            let s1 = seed_service(&pool, "Banho").await;

            let created = service
                .create(
                    user_id,
                    &CreateAppointmentPayload {
                        date: amanha(),
                        dog_ids: vec![d1],
                        service_ids: vec![s1],
                    },
                )
                .await
                .expect("create");

            let antes = AppointmentRepository::new(pool.clone())
                .find_by_id(created.id)
                .await
                .expect("find_by_id")
                .expect("linha criada");

            service
                .update(
                    created.id,
                    user_id,
                    &UpdateAppointmentPayload {
                        date: None,
                        status: None,
                        dog_ids: Some(vec![d2]),
                        service_ids: None,
                    },
                )
                .await
                .expect("update");

            let depois = AppointmentRepository::new(pool.clone())
                .find_by_id(created.id)
                .await
                .expect("find_by_id")
                .expect("linha ainda existe");

            // Patch só de vínculos não reescreve a linha principal.
            assert_eq!(depois.date, antes.date);
            assert_eq!(depois.status, antes.status);
            assert_eq!(depois.updated_at, antes.updated_at);
        }

        #[sqlx::test]
        async fn servico_vinculado_nao_pode_ser_excluido(pool: PgPool) {
            let service = motor(&pool);
            let user_id = seed_user(&pool, "ana@example.com", "11111111111").await;
            let d1 = seed_dog(&pool, "Rex", user_id).await;
            let s1 = seed_service(&pool, "Banho").await;

            let created = service
                .create(
                    user_id,
                    &CreateAppointmentPayload {
                        date: amanha(),
                        dog_ids: vec![d1],
                        service_ids: vec![s1],
                    },
                )
                .await
                .expect("create");

            let result = ServiceRepository::new(pool.clone()).delete(s1).await;
            assert!(matches!(result, Err(AppError::ServiceInUse)));

            // O serviço e o vínculo precisam continuar intactos.
            let ainda_existe: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM services WHERE id = $1")
                    .bind(s1)
                    .fetch_one(&pool)
                    .await
                    .expect("contagem de services");
            assert_eq!(ainda_existe, 1);
            assert_eq!(service_links(&pool, created.id).await, vec![s1]);
        }
    }
}
