//! Configuración de base de datos
//!
//! Este módulo maneja la conexión y configuración de PostgreSQL con SQLx.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::env;
use std::time::Duration;

use crate::config::environment::ConfigError;

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub auto_migrate: bool,
}

impl DatabaseConfig {
    /// `DATABASE_URL`, o la URL armada con `DATABASE_HOST`, `DATABASE_PORT`,
    /// `DATABASE_USER`, `DATABASE_PASSWORD` y `DATABASE_NAME`
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let host = env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string());
                let port = env::var("DATABASE_PORT").unwrap_or_else(|_| "5432".to_string());
                if port.parse::<u16>().is_err() {
                    return Err(ConfigError::InvalidValue {
                        name: "DATABASE_PORT",
                        value: port,
                    });
                }
                let user = env::var("DATABASE_USER").unwrap_or_else(|_| "admin".to_string());
                let password = env::var("DATABASE_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
                let name = env::var("DATABASE_NAME").unwrap_or_else(|_| "portal_empresas".to_string());
                format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name)
            }
        };

        let auto_migrate = match env::var("DATABASE_AUTO_MIGRATE") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "DATABASE_AUTO_MIGRATE",
                value,
            })?,
            Err(_) => true,
        };

        Ok(Self {
            url,
            max_connections: 20,
            min_connections: 2,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
            auto_migrate,
        })
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}
