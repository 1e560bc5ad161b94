//! DTOs de la API
//!
//! Formas de entrada y salida del recurso `companies`, con los nombres de
//! campo que usa el portal.

pub mod company_dto;
