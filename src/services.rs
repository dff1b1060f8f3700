pub mod appointment_service;
pub mod auth;
pub mod breed;
pub mod catalog_service;
pub mod dog_service;
pub mod user_service;
