//! Repositorios en memoria
//!
//! Mismo contrato que los repositorios PostgreSQL, sobre mapas protegidos
//! con `RwLock`. Se usan con `STORAGE_BACKEND=memory` y en los tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::company::Company;
use crate::models::document::StoredDocument;
use crate::repositories::{CompanyStore, DocumentStore};
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
pub struct InMemoryCompanyRepository {
    companies: RwLock<HashMap<Uuid, Company>>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyStore for InMemoryCompanyRepository {
    async fn insert(&self, company: &Company) -> AppResult<Company> {
        let mut companies = self.companies.write().await;
        if companies.contains_key(&company.id) {
            return Err(AppError::Internal(format!("Id duplicado: {}", company.id)));
        }
        companies.insert(company.id, company.clone());
        Ok(company.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>> {
        Ok(self.companies.read().await.get(&id).cloned())
    }

    async fn list_newest_first(&self) -> AppResult<Vec<Company>> {
        let mut companies: Vec<Company> = self.companies.read().await.values().cloned().collect();
        companies.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(companies)
    }

    async fn save(&self, company: &Company) -> AppResult<Option<Company>> {
        let mut companies = self.companies.write().await;
        match companies.get_mut(&company.id) {
            Some(stored) => {
                *stored = Company {
                    created_at: stored.created_at,
                    ..company.clone()
                };
                Ok(Some(stored.clone()))
            }
            None => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<HashMap<String, StoredDocument>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentRepository {
    async fn put(&self, document: &StoredDocument) -> AppResult<()> {
        self.documents
            .write()
            .await
            .entry(document.digest.clone())
            .or_insert_with(|| document.clone());
        Ok(())
    }

    async fn get(&self, digest: &str) -> AppResult<Option<StoredDocument>> {
        Ok(self.documents.read().await.get(digest).cloned())
    }
}
