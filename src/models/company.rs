//! Modelo de Company
//!
//! Este módulo contiene el struct Company (tabla `empresas`), sus enums
//! y la tabla de transiciones de estado del flujo de aprobación.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

/// Tipo de persona - mapea al ENUM tipo_pessoa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "tipo_pessoa")]
pub enum PersonType {
    /// Persona jurídica, identificada por CNPJ
    #[serde(rename = "JURIDICA")]
    #[sqlx(rename = "JURIDICA")]
    LegalEntity,
    /// Persona física, identificada por CPF
    #[serde(rename = "FISICA")]
    #[sqlx(rename = "FISICA")]
    NaturalPerson,
    /// Empresa extranjera, identificador libre
    #[serde(rename = "ESTRANGEIRA")]
    #[sqlx(rename = "ESTRANGEIRA")]
    ForeignEntity,
}

/// Perfil de negocio - mapea al ENUM perfil_empresa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "perfil_empresa")]
pub enum CompanyProfile {
    #[serde(rename = "DESPACHANTE")]
    #[sqlx(rename = "DESPACHANTE")]
    CustomsBroker,
    #[serde(rename = "BENEFICIARIO")]
    #[sqlx(rename = "BENEFICIARIO")]
    Beneficiary,
    #[serde(rename = "CONSIGNATARIO")]
    #[sqlx(rename = "CONSIGNATARIO")]
    Consignee,
    #[serde(rename = "ARMADOR")]
    #[sqlx(rename = "ARMADOR")]
    Shipowner,
    #[serde(rename = "AGENTE_CARGA")]
    #[sqlx(rename = "AGENTE_CARGA")]
    CargoAgent,
    #[serde(rename = "TRANSPORTADORA")]
    #[sqlx(rename = "TRANSPORTADORA")]
    Carrier,
}

/// Estado del cadastro - mapea al ENUM status_empresa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "status_empresa")]
pub enum CompanyStatus {
    #[serde(rename = "PENDENTE")]
    #[sqlx(rename = "PENDENTE")]
    Pending,
    #[serde(rename = "APROVADA")]
    #[sqlx(rename = "APROVADA")]
    Approved,
    #[serde(rename = "REPROVADA")]
    #[sqlx(rename = "REPROVADA")]
    Rejected,
}

impl CompanyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Pending => "PENDENTE",
            CompanyStatus::Approved => "APROVADA",
            CompanyStatus::Rejected => "REPROVADA",
        }
    }

    /// Tabla de transiciones permitidas.
    ///
    /// Aprobar y reprobar se pueden aplicar desde cualquier estado, incluso
    /// sobre una decisión previa; volver a PENDENTE nunca está permitido.
    pub fn can_transition_to(self, next: CompanyStatus) -> bool {
        use CompanyStatus::*;

        match (self, next) {
            (Pending, Approved) | (Pending, Rejected) => true,
            (Approved, Rejected) | (Rejected, Approved) => true,
            (Approved, Approved) | (Rejected, Rejected) => true,
            (_, Pending) => false,
        }
    }
}

impl fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Company principal - mapea exactamente a la tabla empresas
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub person_type: PersonType,
    pub legal_name: Option<String>,
    pub cnpj: Option<String>,
    pub full_name: Option<String>,
    pub cpf: Option<String>,
    pub foreign_identifier: Option<String>,
    pub trade_name: String,
    pub profile: CompanyProfile,
    pub direct_billing: bool,
    pub status: CompanyStatus,
    pub supporting_document_digest: String,
    pub optional_document_digest: Option<String>,
    pub rejection_reason: Option<String>,
    pub responsible_user: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Deja poblado solo el juego de identidad del tipo de persona.
    /// Para persona física la razón social es siempre el nombre.
    pub fn normalize_identity(&mut self) {
        match self.person_type {
            PersonType::LegalEntity => {
                self.full_name = None;
                self.cpf = None;
                self.foreign_identifier = None;
            }
            PersonType::NaturalPerson => {
                self.legal_name = self.full_name.clone();
                self.cnpj = None;
                self.foreign_identifier = None;
            }
            PersonType::ForeignEntity => {
                self.cnpj = None;
                self.full_name = None;
                self.cpf = None;
            }
        }
    }

    fn transition(&mut self, next: CompanyStatus) -> AppResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn approve(&mut self) -> AppResult<()> {
        self.transition(CompanyStatus::Approved)?;
        self.rejection_reason = None;
        Ok(())
    }

    pub fn reject(&mut self, reason: String) -> AppResult<()> {
        self.transition(CompanyStatus::Rejected)?;
        self.rejection_reason = Some(reason);
        Ok(())
    }
}
