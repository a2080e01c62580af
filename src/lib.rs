pub mod config;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;
