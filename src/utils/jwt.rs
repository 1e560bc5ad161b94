//! Utilidades JWT
//!
//! Tokens de rol para el circuito interno del portal: quien presenta un
//! token válido con rol `internal` cadastra empresas ya aprobadas.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::environment::EnvironmentConfig;
use crate::models::caller::{CallerRole, INTERNAL_ROLE};
use crate::utils::errors::AppError;

/// Claims del token de rol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerClaims {
    pub sub: String,  // usuario
    pub role: String, // "internal" u otro
    pub exp: usize,
    pub iat: usize,
}

impl CallerClaims {
    pub fn into_role(self) -> CallerRole {
        if self.role == INTERNAL_ROLE {
            CallerRole::Internal { username: self.sub }
        } else {
            CallerRole::Registrant
        }
    }
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: u64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: config.jwt_expiration,
        }
    }
}

/// Generar token para un usuario interno
pub fn generate_internal_token(username: &str, config: &JwtConfig) -> Result<String, AppError> {
    generate_token(username, INTERNAL_ROLE, config)
}

/// Generar token con un rol arbitrario
pub fn generate_token(username: &str, role: &str, config: &JwtConfig) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.expiration as i64);

    let claims = CallerClaims {
        sub: username.to_string(),
        role: role.to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar un token de rol
pub fn decode_caller_token(token: &str, secret: &str) -> Result<CallerClaims, AppError> {
    decode::<CallerClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Token inválido ou expirado".to_string()))
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::Unauthorized(
            "Header Authorization deve usar o esquema Bearer".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "segredo-de-teste".to_string(),
            expiration: 3600,
        }
    }

    #[test]
    fn test_internal_token_decodes_to_internal_role() {
        let token = generate_internal_token("ana.revisora", &config()).unwrap();
        let claims = decode_caller_token(&token, "segredo-de-teste").unwrap();

        assert_eq!(
            claims.into_role(),
            CallerRole::Internal {
                username: "ana.revisora".to_string()
            }
        );
    }

    #[test]
    fn test_other_roles_are_registrants() {
        let token = generate_token("visitante", "viewer", &config()).unwrap();
        let claims = decode_caller_token(&token, "segredo-de-teste").unwrap();
        assert_eq!(claims.into_role(), CallerRole::Registrant);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = generate_internal_token("ana.revisora", &config()).unwrap();
        assert!(matches!(
            decode_caller_token(&token, "outro-segredo"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(extract_token_from_header("Basic dXNlcjpwYXNz").is_err());
        assert!(extract_token_from_header("Bearer ").is_err());
    }
}
