pub mod appointments;
pub mod auth;
pub mod dogs;
pub mod services;
pub mod users;
