//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! de identificadores brasileños y JWT.

pub mod errors;
pub mod jwt;
pub mod validation;

pub use errors::{AppError, AppResult};
