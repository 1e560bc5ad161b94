//! Services module
//!
//! Este módulo contiene la lógica de negocio del portal: el cadastro de
//! empresas y la decodificación de documentos.

pub mod company_service;
pub mod document_service;

pub use company_service::CompanyService;
pub use document_service::DocumentService;
