//! Portal de cadastro de empresas
//!
//! Backend del portal: cadastro de empresas (persona jurídica, física o
//! extranjera), validación de CNPJ/CPF, documentos y flujo de
//! aprobación/reprobación.

pub mod client;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
