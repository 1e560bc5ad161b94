//! Servicio de cadastro de empresas
//!
//! Operaciones sobre el registro de empresa: alta, consulta, actualización
//! parcial, aprobación y reprobación. Toda la validación ocurre antes de
//! escribir nada.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::company_dto::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::models::caller::CallerRole;
use crate::models::company::Company;
use crate::models::document::{DocumentKind, StoredDocument};
use crate::repositories::{CompanyStore, DocumentStore};
use crate::services::document_service::{DecodedDocument, DocumentService};
use crate::utils::errors::{company_not_found, validation_error, AppError, AppResult};
use crate::utils::validation::{validate_document_pair, validate_identity};

pub struct CompanyService {
    companies: Arc<dyn CompanyStore>,
    documents: Arc<dyn DocumentStore>,
    decoder: DocumentService,
}

/// Documento opcional tal como llega en un patch
enum OptionalPatch {
    Keep,
    Clear,
    Replace(DecodedDocument),
}

fn required<T>(value: Option<T>, field: &'static str, message: &'static str) -> AppResult<T> {
    value.ok_or_else(|| validation_error(field, message))
}

impl CompanyService {
    pub fn new(
        companies: Arc<dyn CompanyStore>,
        documents: Arc<dyn DocumentStore>,
        max_document_bytes: usize,
    ) -> Self {
        Self {
            companies,
            documents,
            decoder: DocumentService::new(max_document_bytes),
        }
    }

    pub async fn create(&self, mut request: CreateCompanyRequest, caller: &CallerRole) -> AppResult<Company> {
        request.retain_identity_fields();
        request.validate()?;

        let person_type = required(request.person_type, "person_type", "Tipo de pessoa é obrigatório")?;
        let trade_name = required(request.trade_name, "trade_name", "Nome Fantasia é obrigatório")?;
        let profile = required(request.profile, "profile", "Selecione um perfil para a empresa")?;
        let supporting_payload = required(
            request.supporting_document,
            "supporting_document",
            "É necessário enviar os arquivos obrigatórios para prosseguir",
        )?;

        let supporting = self.decoder.decode("supporting_document", &supporting_payload)?;
        let optional = match request.optional_document.as_deref().map(str::trim) {
            Some(payload) if !payload.is_empty() => {
                Some(self.decoder.decode("optional_document", payload)?)
            }
            _ => None,
        };
        if let Some(optional) = &optional {
            validate_document_pair(&supporting.bytes, &optional.bytes)?;
        }

        let now = Utc::now();
        let mut company = Company {
            id: Uuid::new_v4(),
            person_type,
            legal_name: request.legal_name,
            cnpj: request.cnpj,
            full_name: request.full_name,
            cpf: request.cpf,
            foreign_identifier: request.foreign_identifier,
            trade_name,
            profile,
            direct_billing: request.direct_billing.unwrap_or(false),
            status: caller.initial_status(),
            supporting_document_digest: supporting.digest.clone(),
            optional_document_digest: optional.as_ref().map(|doc| doc.digest.clone()),
            rejection_reason: None,
            responsible_user: caller.responsible_user(request.responsible_user),
            created_at: now,
            updated_at: now,
        };
        company.normalize_identity();
        validate_identity(&company)?;

        self.documents.put(&supporting.into_stored()).await?;
        if let Some(optional) = optional {
            self.documents.put(&optional.into_stored()).await?;
        }
        let saved = self.companies.insert(&company).await?;

        info!(
            "✅ Empresa {} cadastrada ({:?}) con estado {} (interno: {})",
            saved.id,
            saved.person_type,
            saved.status,
            caller.is_internal()
        );
        Ok(saved)
    }

    pub async fn list(&self) -> AppResult<Vec<Company>> {
        self.companies.list_newest_first().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Company> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or_else(company_not_found)
    }

    pub async fn approve(&self, id: Uuid) -> AppResult<Company> {
        let mut company = self.get(id).await?;
        company.approve()?;

        let saved = self.persist(&company).await?;
        info!("✅ Empresa {} aprobada", saved.id);
        Ok(saved)
    }

    pub async fn reject(&self, id: Uuid, reason: Option<String>) -> AppResult<Company> {
        let mut company = self.get(id).await?;

        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .ok_or_else(|| validation_error("motivo", "Motivo da reprovação é obrigatório"))?;
        company.reject(reason)?;

        let saved = self.persist(&company).await?;
        info!("🚫 Empresa {} reprobada", saved.id);
        Ok(saved)
    }

    /// Aplica solo las claves presentes en el patch. Los documentos se validan
    /// contra el par resultante y la identidad se vuelve a verificar si el
    /// patch la toca.
    ///
    /// `usuarioResponsavel` solo lo cambia un usuario interno.
    pub async fn update(
        &self,
        id: Uuid,
        mut patch: UpdateCompanyRequest,
        caller: &CallerRole,
    ) -> AppResult<Company> {
        let mut company = self.get(id).await?;
        patch.retain_identity_fields(patch.person_type.unwrap_or(company.person_type));
        patch.validate()?;

        let supporting = patch
            .supporting_document
            .as_deref()
            .map(|payload| self.decoder.decode("supporting_document", payload))
            .transpose()?;
        let optional = match patch.optional_document.as_deref().map(str::trim) {
            None => OptionalPatch::Keep,
            Some("") => OptionalPatch::Clear,
            Some(payload) => OptionalPatch::Replace(self.decoder.decode("optional_document", payload)?),
        };

        if patch.touches_documents() {
            let supporting_digest = supporting
                .as_ref()
                .map(|doc| doc.digest.as_str())
                .unwrap_or(company.supporting_document_digest.as_str());
            let optional_digest = match &optional {
                OptionalPatch::Keep => company.optional_document_digest.as_deref().unwrap_or(""),
                OptionalPatch::Clear => "",
                OptionalPatch::Replace(doc) => doc.digest.as_str(),
            };
            validate_document_pair(supporting_digest.as_bytes(), optional_digest.as_bytes())?;
        }

        let touches_identity = patch.touches_identity();
        if let Some(person_type) = patch.person_type {
            company.person_type = person_type;
        }
        if patch.legal_name.is_some() {
            company.legal_name = patch.legal_name;
        }
        if patch.cnpj.is_some() {
            company.cnpj = patch.cnpj;
        }
        if patch.full_name.is_some() {
            company.full_name = patch.full_name;
        }
        if patch.cpf.is_some() {
            company.cpf = patch.cpf;
        }
        if patch.foreign_identifier.is_some() {
            company.foreign_identifier = patch.foreign_identifier;
        }
        if let Some(trade_name) = patch.trade_name {
            company.trade_name = trade_name;
        }
        if let Some(profile) = patch.profile {
            company.profile = profile;
        }
        if let Some(direct_billing) = patch.direct_billing {
            company.direct_billing = direct_billing;
        }
        if caller.is_internal() && patch.responsible_user.is_some() {
            company.responsible_user = caller.responsible_user(patch.responsible_user);
        }

        if touches_identity {
            company.normalize_identity();
            validate_identity(&company)?;
        }

        if let Some(doc) = supporting {
            company.supporting_document_digest = doc.digest.clone();
            self.documents.put(&doc.into_stored()).await?;
        }
        match optional {
            OptionalPatch::Keep => {}
            OptionalPatch::Clear => company.optional_document_digest = None,
            OptionalPatch::Replace(doc) => {
                company.optional_document_digest = Some(doc.digest.clone());
                self.documents.put(&doc.into_stored()).await?;
            }
        }
        company.updated_at = Utc::now();

        let saved = self.persist(&company).await?;
        info!("✏️ Empresa {} actualizada", saved.id);
        Ok(saved)
    }

    /// Documento comprobatorio u opcional de una empresa
    pub async fn document(&self, id: Uuid, kind: DocumentKind) -> AppResult<StoredDocument> {
        let company = self.get(id).await?;

        let digest = match kind {
            DocumentKind::Supporting => Some(company.supporting_document_digest),
            DocumentKind::Optional => company.optional_document_digest,
        }
        .ok_or_else(|| AppError::NotFound("Documento não encontrado".to_string()))?;

        self.documents
            .get(&digest)
            .await?
            .ok_or_else(|| AppError::NotFound("Documento não encontrado".to_string()))
    }

    async fn persist(&self, company: &Company) -> AppResult<Company> {
        self.companies
            .save(company)
            .await?
            .ok_or_else(company_not_found)
    }
}
