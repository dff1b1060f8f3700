pub mod appointment;
pub mod auth;
pub mod dog;
pub mod service;
