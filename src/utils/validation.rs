//! Utilidades de validación
//!
//! Validación de identificadores fiscales brasileños (CNPJ/CPF), de pares
//! de documentos y de la coherencia de los campos de identidad según el
//! tipo de persona. Todas las funciones son puras.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationErrors;

use crate::models::company::{Company, PersonType};
use crate::utils::errors::{validation_error, AppError, AppResult};

lazy_static! {
    /// CNPJ sin máscara: exactamente 14 dígitos
    pub static ref CNPJ_DIGITS: Regex = Regex::new(r"^\d{14}$").unwrap();
    /// CPF sin máscara: exactamente 11 dígitos
    pub static ref CPF_DIGITS: Regex = Regex::new(r"^\d{11}$").unwrap();
}

const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Orden del formulario; decide cuál es el "primer" mensaje de error.
/// Cada campo aparece con su nombre Rust y con su nombre en el JSON.
const FIELD_ORDER: &[&str] = &[
    "person_type",
    "tipoPessoa",
    "legal_name",
    "razaoSocial",
    "cnpj",
    "full_name",
    "nome",
    "cpf",
    "foreign_identifier",
    "identificadorEstrangeiro",
    "trade_name",
    "nomeFantasia",
    "profile",
    "perfil",
    "direct_billing",
    "faturamentoDireto",
    "supporting_document",
    "documentoComprobatorio",
    "optional_document",
    "documentoOpcional",
    "responsible_user",
    "usuarioResponsavel",
    "motivo",
];

fn digits_of(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

/// Dígito verificador módulo 11: 0 si el resto es < 2, si no `11 - resto`
fn check_digit(digits: &[u32], weights: impl IntoIterator<Item = u32>) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

/// Validar un CNPJ (se ignoran los caracteres que no son dígitos)
pub fn is_valid_cnpj(value: &str) -> bool {
    let digits = digits_of(value);
    if digits.len() != 14 || all_same(&digits) {
        return false;
    }

    if check_digit(&digits[..12], CNPJ_FIRST_WEIGHTS) != digits[12] {
        return false;
    }
    check_digit(&digits[..13], CNPJ_SECOND_WEIGHTS) == digits[13]
}

/// Validar un CPF (se ignoran los caracteres que no son dígitos)
pub fn is_valid_cpf(value: &str) -> bool {
    let digits = digits_of(value);
    if digits.len() != 11 || all_same(&digits) {
        return false;
    }

    if check_digit(&digits[..9], (2..=10).rev()) != digits[9] {
        return false;
    }
    check_digit(&digits[..10], (2..=11).rev()) == digits[10]
}

/// Rechazar dos documentos idénticos byte a byte
pub fn validate_document_pair(a: &[u8], b: &[u8]) -> AppResult<()> {
    if !a.is_empty() && !b.is_empty() && a == b {
        return Err(AppError::DuplicateDocument("Arquivo duplicado".to_string()));
    }
    Ok(())
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Verificar los campos de identidad exigidos por el tipo de persona.
///
/// Primero la presencia (error de validación) y después los dígitos
/// verificadores (identificador inválido).
pub fn validate_identity(company: &Company) -> AppResult<()> {
    match company.person_type {
        PersonType::LegalEntity => {
            if is_blank(company.legal_name.as_deref()) {
                return Err(validation_error("legal_name", "Razão Social é obrigatória"));
            }
            let cnpj = company.cnpj.as_deref();
            if is_blank(cnpj) {
                return Err(validation_error("cnpj", "CNPJ é obrigatório"));
            }
            if !cnpj.map_or(false, is_valid_cnpj) {
                return Err(AppError::InvalidIdentifier("CNPJ fornecido inválido".to_string()));
            }
        }
        PersonType::NaturalPerson => {
            if is_blank(company.full_name.as_deref()) {
                return Err(validation_error("full_name", "Nome é obrigatório"));
            }
            let cpf = company.cpf.as_deref();
            if is_blank(cpf) {
                return Err(validation_error("cpf", "CPF é obrigatório"));
            }
            if !cpf.map_or(false, is_valid_cpf) {
                return Err(AppError::InvalidIdentifier("CPF inválido".to_string()));
            }
        }
        PersonType::ForeignEntity => {
            if is_blank(company.legal_name.as_deref()) {
                return Err(validation_error("legal_name", "Razão Social é obrigatória"));
            }
            if is_blank(company.foreign_identifier.as_deref()) {
                return Err(validation_error(
                    "foreign_identifier",
                    "Identificador estrangeiro é obrigatório",
                ));
            }
        }
    }
    Ok(())
}

/// Primer mensaje de un conjunto de errores, en el orden del formulario
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    let mut remaining: Vec<&str> = field_errors
        .keys()
        .copied()
        .filter(|field| !FIELD_ORDER.contains(field))
        .collect();
    remaining.sort_unstable();

    FIELD_ORDER
        .iter()
        .copied()
        .chain(remaining)
        .find_map(|field| {
            field_errors.get(field).and_then(|list| list.first()).map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Campo inválido: {}", field))
            })
        })
        .unwrap_or_else(|| "Dados inválidos".to_string())
}
