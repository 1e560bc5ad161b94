//! Repositorios
//!
//! Acceso a datos detrás de dos traits: registros de empresa y documentos.
//! Hay implementación PostgreSQL y una en memoria para desarrollo y tests.

pub mod company_repository;
pub mod document_repository;
pub mod memory_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::company::Company;
use crate::models::document::StoredDocument;
use crate::utils::errors::AppResult;

pub use company_repository::CompanyRepository;
pub use document_repository::DocumentRepository;
pub use memory_repository::{InMemoryCompanyRepository, InMemoryDocumentRepository};

/// Persistencia de registros de empresa
#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn insert(&self, company: &Company) -> AppResult<Company>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>>;

    /// Todos los registros, más recientes primero
    async fn list_newest_first(&self) -> AppResult<Vec<Company>>;

    /// Sobrescribe el registro completo; `None` si el id ya no existe
    async fn save(&self, company: &Company) -> AppResult<Option<Company>>;
}

/// Almacén de documentos direccionado por contenido
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Guarda el documento; si el digest ya existe no hace nada
    async fn put(&self, document: &StoredDocument) -> AppResult<()>;

    async fn get(&self, digest: &str) -> AppResult<Option<StoredDocument>>;
}
