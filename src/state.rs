//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    CompanyRepository, CompanyStore, DocumentRepository, DocumentStore, InMemoryCompanyRepository,
    InMemoryDocumentRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<dyn CompanyStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(
        companies: Arc<dyn CompanyStore>,
        documents: Arc<dyn DocumentStore>,
        config: EnvironmentConfig,
    ) -> Self {
        Self {
            companies,
            documents,
            config,
        }
    }

    /// Estado respaldado por PostgreSQL
    pub fn with_pool(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self::new(
            Arc::new(CompanyRepository::new(pool.clone())),
            Arc::new(DocumentRepository::new(pool)),
            config,
        )
    }

    /// Estado en memoria, para desarrollo local y tests
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self::new(
            Arc::new(InMemoryCompanyRepository::new()),
            Arc::new(InMemoryDocumentRepository::new()),
            config,
        )
    }
}
