//! Rol de quien llama a la API
//!
//! Sustituye la bandera booleana de "usuario interno": el circuito interno
//! solo lo obtiene quien presenta un token con rol `internal`.

use crate::models::company::CompanyStatus;

pub const INTERNAL_ROLE: &str = "internal";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerRole {
    /// Cadastro público, queda pendiente de revisión
    Registrant,
    /// Usuario interno autenticado; su cadastro entra aprobado
    Internal { username: String },
}

impl CallerRole {
    pub fn is_internal(&self) -> bool {
        matches!(self, CallerRole::Internal { .. })
    }

    pub fn initial_status(&self) -> CompanyStatus {
        match self {
            CallerRole::Registrant => CompanyStatus::Pending,
            CallerRole::Internal { .. } => CompanyStatus::Approved,
        }
    }

    /// Usuario responsable del cadastro: solo existe en el circuito interno,
    /// y si el payload no lo trae es el propio usuario del token
    pub fn responsible_user(&self, requested: Option<String>) -> Option<String> {
        match self {
            CallerRole::Registrant => None,
            CallerRole::Internal { username } => requested
                .filter(|value| !value.trim().is_empty())
                .or_else(|| Some(username.clone())),
        }
    }
}
