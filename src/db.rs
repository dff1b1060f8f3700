pub mod appointment_repo;
pub mod dog_repo;
pub mod service_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepository;
pub use dog_repo::DogRepository;
pub use service_repo::ServiceRepository;
pub use user_repo::UserRepository;
