//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno del portal. Todas las
//! variables tienen valor por defecto salvo que se indique lo contrario.

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Errores al leer la configuración
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} has an invalid value: '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error("{0} must be set outside development")]
    Missing(&'static str),
}

/// Dónde se guardan empresas y documentos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(()),
        }
    }
}

const DEV_JWT_SECRET: &str = "portal-empresas-dev-secret";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub max_document_bytes: usize,
    pub storage_backend: StorageBackend,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration: 8 * 3600,
            cors_origins: Vec::new(),
            max_document_bytes: 5 * 1024 * 1024,
            storage_backend: StorageBackend::Postgres,
            log_level: tracing::Level::INFO,
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde el entorno (tras `dotenvy`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "development" => defaults.jwt_secret,
            _ => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?,
            cors_origins,
            max_document_bytes: parse_var("MAX_DOCUMENT_BYTES", defaults.max_document_bytes)?,
            storage_backend: parse_var("STORAGE_BACKEND", defaults.storage_backend)?,
            log_level: parse_var("LOG_LEVEL", defaults.log_level)?,
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Límite del cuerpo HTTP: dos documentos en base64 más el resto del JSON
    pub fn max_body_bytes(&self) -> usize {
        (self.max_document_bytes.saturating_mul(8) / 3).saturating_add(64 * 1024)
    }
}
