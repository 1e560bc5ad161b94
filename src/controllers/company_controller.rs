use uuid::Uuid;

use crate::dto::company_dto::{
    ApiResponse, CompanyResponse, CreateCompanyRequest, RejectCompanyRequest, UpdateCompanyRequest,
};
use crate::models::caller::CallerRole;
use crate::models::document::{DocumentKind, StoredDocument};
use crate::services::company_service::CompanyService;
use crate::state::AppState;
use crate::utils::errors::{company_not_found, AppError};

pub struct CompanyController {
    service: CompanyService,
}

/// Un id que no es UUID no puede existir: se responde como no encontrado
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| company_not_found())
}

fn parse_kind(kind: &str) -> Result<DocumentKind, AppError> {
    DocumentKind::from_path(kind).ok_or_else(|| AppError::NotFound("Documento não encontrado".to_string()))
}

impl CompanyController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: CompanyService::new(
                state.companies.clone(),
                state.documents.clone(),
                state.config.max_document_bytes,
            ),
        }
    }

    pub async fn create(
        &self,
        request: CreateCompanyRequest,
        caller: &CallerRole,
    ) -> Result<ApiResponse<CompanyResponse>, AppError> {
        let company = self.service.create(request, caller).await?;

        Ok(ApiResponse::with_message(
            company.into(),
            "Empresa cadastrada com sucesso",
        ))
    }

    pub async fn list(&self) -> Result<Vec<CompanyResponse>, AppError> {
        let companies = self.service.list().await?;
        Ok(companies.into_iter().map(CompanyResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<CompanyResponse, AppError> {
        let company = self.service.get(parse_id(id)?).await?;
        Ok(company.into())
    }

    pub async fn approve(&self, id: &str) -> Result<ApiResponse<CompanyResponse>, AppError> {
        let company = self.service.approve(parse_id(id)?).await?;

        Ok(ApiResponse::with_message(
            company.into(),
            "Empresa aprovada com sucesso",
        ))
    }

    pub async fn reject(
        &self,
        id: &str,
        request: RejectCompanyRequest,
    ) -> Result<ApiResponse<CompanyResponse>, AppError> {
        let company = self.service.reject(parse_id(id)?, request.motivo).await?;

        Ok(ApiResponse::with_message(
            company.into(),
            "Empresa reprovada com sucesso",
        ))
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateCompanyRequest,
        caller: &CallerRole,
    ) -> Result<ApiResponse<CompanyResponse>, AppError> {
        let company = self.service.update(parse_id(id)?, request, caller).await?;

        Ok(ApiResponse::with_message(
            company.into(),
            "Empresa atualizada com sucesso",
        ))
    }

    pub async fn document(&self, id: &str, kind: &str) -> Result<StoredDocument, AppError> {
        let id = parse_id(id)?;
        let kind = parse_kind(kind)?;
        self.service.document(id, kind).await
    }
}
