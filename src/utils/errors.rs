//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del portal
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::company::CompanyStatus;
use crate::utils::validation::first_validation_message;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Duplicate document: {0}")]
    DuplicateDocument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: CompanyStatus,
        to: CompanyStatus,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: code.to_string(),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl AppError {
    /// Código HTTP asociado a cada variante
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::InvalidIdentifier(_)
            | AppError::DuplicateDocument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidTransition { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            AppError::Database(e) => {
                tracing::error!("❌ Error de base de datos: {}", e);
                ErrorResponse::new(
                    "Database Error",
                    "An error occurred while accessing the database".to_string(),
                    "DB_ERROR",
                )
            }

            AppError::Validation(e) => {
                tracing::warn!("Error de validación: {}", e);
                ErrorResponse::new("Validation Error", first_validation_message(&e), "VALIDATION_ERROR")
                    .with_details(json!(e))
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("Solicitud inválida: {}", msg);
                ErrorResponse::new("Bad Request", msg, "BAD_REQUEST")
            }

            AppError::InvalidIdentifier(msg) => {
                tracing::warn!("Identificador fiscal inválido: {}", msg);
                ErrorResponse::new("Bad Request", msg, "INVALID_IDENTIFIER")
            }

            AppError::DuplicateDocument(msg) => {
                tracing::warn!("Documento duplicado: {}", msg);
                ErrorResponse::new("Bad Request", msg, "DUPLICATE_DOCUMENT")
            }

            AppError::NotFound(msg) => {
                tracing::debug!("Recurso no encontrado: {}", msg);
                ErrorResponse::new("Not Found", msg, "NOT_FOUND")
            }

            AppError::InvalidTransition { from, to } => {
                tracing::warn!("Transición de estado rechazada: {} -> {}", from, to);
                ErrorResponse::new(
                    "Conflict",
                    format!("Transição de status não permitida: {} -> {}", from, to),
                    "INVALID_TRANSITION",
                )
            }

            AppError::Unauthorized(msg) => {
                tracing::warn!("Acceso no autorizado: {}", msg);
                ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED")
            }

            AppError::Forbidden(msg) => {
                tracing::warn!("Acceso prohibido: {}", msg);
                ErrorResponse::new("Forbidden", msg, "FORBIDDEN")
            }

            AppError::Internal(msg) => {
                tracing::error!("❌ Error interno: {}", msg);
                ErrorResponse::new(
                    "Internal Server Error",
                    "An unexpected error occurred".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación de un solo campo
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use std::borrow::Cow;
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(Cow::Borrowed(message));

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Error estándar de empresa inexistente
pub fn company_not_found() -> AppError {
    AppError::NotFound("Empresa não encontrada".to_string())
}
