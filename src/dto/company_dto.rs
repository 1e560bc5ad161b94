use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::company::{Company, CompanyProfile, CompanyStatus, PersonType};
use crate::models::document::DocumentKind;
use crate::utils::validation::{CNPJ_DIGITS, CPF_DIGITS};

// Request para cadastrar una empresa
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[serde(rename = "tipoPessoa")]
    #[validate(required(message = "Tipo de pessoa é obrigatório"))]
    pub person_type: Option<PersonType>,

    #[serde(rename = "razaoSocial", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 255, message = "Mínimo de 3 caracteres"))]
    pub legal_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = "CNPJ_DIGITS", message = "CNPJ inválido"))]
    pub cnpj: Option<String>,

    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 255, message = "Mínimo de 3 caracteres"))]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = "CPF_DIGITS", message = "CPF inválido"))]
    pub cpf: Option<String>,

    #[serde(rename = "identificadorEstrangeiro", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 100, message = "Mínimo de 3 caracteres"))]
    pub foreign_identifier: Option<String>,

    #[serde(rename = "nomeFantasia")]
    #[validate(
        required(message = "Nome Fantasia é obrigatório"),
        length(min = 3, max = 255, message = "Mínimo de 3 caracteres")
    )]
    pub trade_name: Option<String>,

    #[serde(rename = "perfil")]
    #[validate(required(message = "Selecione um perfil para a empresa"))]
    pub profile: Option<CompanyProfile>,

    #[serde(rename = "faturamentoDireto", default, skip_serializing_if = "Option::is_none")]
    pub direct_billing: Option<bool>,

    #[serde(rename = "documentoComprobatorio")]
    #[validate(
        required(message = "É necessário enviar os arquivos obrigatórios para prosseguir"),
        length(min = 1, message = "É necessário enviar os arquivos obrigatórios para prosseguir")
    )]
    pub supporting_document: Option<String>,

    #[serde(rename = "documentoOpcional", default, skip_serializing_if = "Option::is_none")]
    pub optional_document: Option<String>,

    #[serde(rename = "usuarioResponsavel", default, skip_serializing_if = "Option::is_none")]
    pub responsible_user: Option<String>,
}

impl CreateCompanyRequest {
    /// Descarta los campos de identidad que no corresponden al tipo de persona,
    /// que así no se validan ni se guardan
    pub fn retain_identity_fields(&mut self) {
        if let Some(person_type) = self.person_type {
            retain_identity(
                person_type,
                &mut self.legal_name,
                &mut self.cnpj,
                &mut self.full_name,
                &mut self.cpf,
                &mut self.foreign_identifier,
            );
        }
    }
}

fn retain_identity(
    person_type: PersonType,
    legal_name: &mut Option<String>,
    cnpj: &mut Option<String>,
    full_name: &mut Option<String>,
    cpf: &mut Option<String>,
    foreign_identifier: &mut Option<String>,
) {
    match person_type {
        PersonType::LegalEntity => {
            *full_name = None;
            *cpf = None;
            *foreign_identifier = None;
        }
        PersonType::NaturalPerson => {
            *legal_name = None;
            *cnpj = None;
            *foreign_identifier = None;
        }
        PersonType::ForeignEntity => {
            *cnpj = None;
            *full_name = None;
            *cpf = None;
        }
    }
}

// Request para actualizar una empresa: solo se tocan las claves enviadas
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[serde(rename = "tipoPessoa", default, skip_serializing_if = "Option::is_none")]
    pub person_type: Option<PersonType>,

    #[serde(rename = "razaoSocial", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 255, message = "Mínimo de 3 caracteres"))]
    pub legal_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = "CNPJ_DIGITS", message = "CNPJ inválido"))]
    pub cnpj: Option<String>,

    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 255, message = "Mínimo de 3 caracteres"))]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = "CPF_DIGITS", message = "CPF inválido"))]
    pub cpf: Option<String>,

    #[serde(rename = "identificadorEstrangeiro", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 100, message = "Mínimo de 3 caracteres"))]
    pub foreign_identifier: Option<String>,

    #[serde(rename = "nomeFantasia", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 255, message = "Mínimo de 3 caracteres"))]
    pub trade_name: Option<String>,

    #[serde(rename = "perfil", default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<CompanyProfile>,

    #[serde(rename = "faturamentoDireto", default, skip_serializing_if = "Option::is_none")]
    pub direct_billing: Option<bool>,

    #[serde(rename = "documentoComprobatorio", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "É necessário enviar os arquivos obrigatórios para prosseguir"))]
    pub supporting_document: Option<String>,

    #[serde(rename = "documentoOpcional", default, skip_serializing_if = "Option::is_none")]
    pub optional_document: Option<String>,

    #[serde(rename = "usuarioResponsavel", default, skip_serializing_if = "Option::is_none")]
    pub responsible_user: Option<String>,
}

impl UpdateCompanyRequest {
    /// Igual que en el alta, contra el tipo de persona resultante del patch
    pub fn retain_identity_fields(&mut self, person_type: PersonType) {
        retain_identity(
            person_type,
            &mut self.legal_name,
            &mut self.cnpj,
            &mut self.full_name,
            &mut self.cpf,
            &mut self.foreign_identifier,
        );
    }

    pub fn touches_documents(&self) -> bool {
        self.supporting_document.is_some() || self.optional_document.is_some()
    }

    pub fn touches_identity(&self) -> bool {
        self.person_type.is_some()
            || self.legal_name.is_some()
            || self.cnpj.is_some()
            || self.full_name.is_some()
            || self.cpf.is_some()
            || self.foreign_identifier.is_some()
    }
}

// Request para reprobar una empresa
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RejectCompanyRequest {
    #[serde(default)]
    pub motivo: Option<String>,
}

// Query del alta: `?internal=true` pide el circuito interno
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCompanyQuery {
    pub internal: Option<bool>,
}

// Referencia a un documento guardado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub digest: String,
    pub url: String,
}

impl DocumentRef {
    fn new(company_id: Uuid, kind: DocumentKind, digest: String) -> Self {
        Self {
            digest,
            url: format!("/companies/{}/documents/{}", company_id, kind.as_path()),
        }
    }
}

// Response de empresa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub id: Uuid,
    #[serde(rename = "tipoPessoa")]
    pub person_type: PersonType,
    #[serde(rename = "razaoSocial")]
    pub legal_name: Option<String>,
    pub cnpj: Option<String>,
    #[serde(rename = "nome")]
    pub full_name: Option<String>,
    pub cpf: Option<String>,
    #[serde(rename = "identificadorEstrangeiro")]
    pub foreign_identifier: Option<String>,
    #[serde(rename = "nomeFantasia")]
    pub trade_name: String,
    #[serde(rename = "perfil")]
    pub profile: CompanyProfile,
    #[serde(rename = "faturamentoDireto")]
    pub direct_billing: bool,
    pub status: CompanyStatus,
    #[serde(rename = "documentoComprobatorio")]
    pub supporting_document: DocumentRef,
    #[serde(rename = "documentoOpcional")]
    pub optional_document: Option<DocumentRef>,
    #[serde(rename = "motivoReprovacao")]
    pub rejection_reason: Option<String>,
    #[serde(rename = "usuarioResponsavel")]
    pub responsible_user: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            person_type: company.person_type,
            legal_name: company.legal_name,
            cnpj: company.cnpj,
            full_name: company.full_name,
            cpf: company.cpf,
            foreign_identifier: company.foreign_identifier,
            trade_name: company.trade_name,
            profile: company.profile,
            direct_billing: company.direct_billing,
            status: company.status,
            supporting_document: DocumentRef::new(
                company.id,
                DocumentKind::Supporting,
                company.supporting_document_digest,
            ),
            optional_document: company
                .optional_document_digest
                .map(|digest| DocumentRef::new(company.id, DocumentKind::Optional, digest)),
            rejection_reason: company.rejection_reason,
            responsible_user: company.responsible_user,
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}

// Response de las mutaciones: `{ message, data }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn with_message(data: T, message: &str) -> Self {
        Self {
            message: message.to_string(),
            data,
        }
    }
}
