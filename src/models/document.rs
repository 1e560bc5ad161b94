//! Modelo de documentos
//!
//! Los documentos se guardan aparte del registro de empresa, direccionados
//! por el SHA-256 de su contenido (tabla `company_documents`).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Documento almacenado
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StoredDocument {
    pub digest: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub content: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// Qué documento de la empresa se pide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Supporting,
    Optional,
}

impl DocumentKind {
    pub fn as_path(&self) -> &'static str {
        match self {
            DocumentKind::Supporting => "comprobatorio",
            DocumentKind::Optional => "opcional",
        }
    }

    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "comprobatorio" => Some(DocumentKind::Supporting),
            "opcional" => Some(DocumentKind::Optional),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segment_is_shared_by_server_and_client() {
        for kind in [DocumentKind::Supporting, DocumentKind::Optional] {
            assert_eq!(DocumentKind::from_path(kind.as_path()), Some(kind));
        }
        assert_eq!(DocumentKind::from_path("Opcional"), None);
        assert_eq!(DocumentKind::from_path(""), None);
    }
}
