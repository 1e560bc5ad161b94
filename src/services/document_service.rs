//! Servicio de documentos
//!
//! Decodifica los documentos que llegan en el cadastro (data URL o base64
//! plano), aplica las reglas de tipo y tamaño y calcula el digest con el que
//! se guardan.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::models::document::StoredDocument;
use crate::utils::errors::{validation_error, AppResult};

pub const PDF: &str = "application/pdf";
pub const PNG: &str = "image/png";
pub const JPEG: &str = "image/jpeg";

/// Tipos aceptados en data URLs; `image/jpg` lo envían algunos navegadores
const ACCEPTED_DECLARED_TYPES: [&str; 4] = [PDF, PNG, JPEG, "image/jpg"];

/// Documento ya decodificado, listo para guardar
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDocument {
    pub digest: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl DecodedDocument {
    pub fn into_stored(self) -> StoredDocument {
        StoredDocument {
            size_bytes: self.bytes.len() as i64,
            digest: self.digest,
            content_type: self.content_type.to_string(),
            content: self.bytes,
            created_at: Utc::now(),
        }
    }
}

/// Digest hexadecimal (minúsculas) del contenido
pub fn content_digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Detectar el tipo por los bytes mágicos
pub fn sniff_content_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"%PDF-") {
        Some(PDF)
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some(PNG)
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(JPEG)
    } else {
        None
    }
}

pub struct DocumentService {
    max_document_bytes: usize,
}

impl DocumentService {
    pub fn new(max_document_bytes: usize) -> Self {
        Self { max_document_bytes }
    }

    /// Decodificar un documento del campo `field`
    pub fn decode(&self, field: &'static str, payload: &str) -> AppResult<DecodedDocument> {
        let payload = payload.trim();

        let encoded = match payload.strip_prefix("data:") {
            Some(rest) => {
                let (header, data) = rest
                    .split_once(',')
                    .ok_or_else(|| validation_error(field, "Arquivo inválido"))?;
                let (mime, encoding) = header.split_once(';').unwrap_or((header, ""));
                if encoding != "base64" {
                    return Err(validation_error(field, "Arquivo inválido"));
                }
                if !ACCEPTED_DECLARED_TYPES.contains(&mime.to_ascii_lowercase().as_str()) {
                    return Err(validation_error(
                        field,
                        "Formato de arquivo não suportado. Use PDF, PNG, JPG ou JPEG",
                    ));
                }
                data
            }
            None => payload,
        };

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| validation_error(field, "Arquivo inválido"))?;

        if bytes.is_empty() {
            return Err(validation_error(
                field,
                "É necessário enviar os arquivos obrigatórios para prosseguir",
            ));
        }

        if bytes.len() > self.max_document_bytes {
            return Err(validation_error(field, "O arquivo excede o tamanho máximo permitido"));
        }

        let content_type = sniff_content_type(&bytes).ok_or_else(|| {
            validation_error(
                field,
                "Formato de arquivo não suportado. Use PDF, PNG, JPG ou JPEG",
            )
        })?;

        Ok(DecodedDocument {
            digest: content_digest(&bytes),
            content_type,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    const MAX: usize = 5 * 1024 * 1024;

    fn data_url(mime: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
    }

    #[test]
    fn test_decode_data_url_pdf() {
        let service = DocumentService::new(MAX);
        let doc = service
            .decode("supporting_document", &data_url(PDF, b"%PDF-1.4 contrato social"))
            .unwrap();

        assert_eq!(doc.content_type, PDF);
        assert_eq!(doc.bytes, b"%PDF-1.4 contrato social");
        assert_eq!(doc.digest, content_digest(b"%PDF-1.4 contrato social"));
        assert_eq!(doc.digest.len(), 64);
    }

    #[test]
    fn test_decode_bare_base64_png() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];
        let service = DocumentService::new(MAX);
        let doc = service.decode("optional_document", &STANDARD.encode(png)).unwrap();
        assert_eq!(doc.content_type, PNG);
    }

    #[test]
    fn test_decode_accepts_image_jpg_label() {
        let service = DocumentService::new(MAX);
        let doc = service
            .decode("optional_document", &data_url("image/jpg", &[0xFF, 0xD8, 0xFF, 0xE0, 1, 2]))
            .unwrap();
        assert_eq!(doc.content_type, JPEG);
    }

    #[test]
    fn test_decode_rejects_unsupported_content() {
        let service = DocumentService::new(MAX);
        assert!(matches!(
            service.decode("supporting_document", &data_url("text/plain", b"hola")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.decode("supporting_document", &data_url(PDF, b"no es un pdf")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.decode("supporting_document", "%%% no es base64 %%%"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.decode("supporting_document", "data:application/pdf;base64,"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_decode_enforces_size_limit() {
        let service = DocumentService::new(16);
        let mut big = b"%PDF-".to_vec();
        big.extend(std::iter::repeat(b'x').take(32));

        assert!(matches!(
            service.decode("supporting_document", &data_url(PDF, &big)),
            Err(AppError::Validation(_))
        ));
    }
}
