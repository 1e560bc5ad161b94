//! Extracción del rol de quien llama
//!
//! Sin header Authorization la petición es de un registrante. Con header,
//! el token tiene que ser válido; el rol sale de sus claims.

use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};

use crate::models::caller::CallerRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{decode_caller_token, extract_token_from_header};

#[async_trait]
impl FromRequestParts<AppState> for CallerRole {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
            return Ok(CallerRole::Registrant);
        };

        let auth_header = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Header Authorization inválido".to_string()))?;
        let token = extract_token_from_header(auth_header)?;
        let claims = decode_caller_token(token, &state.config.jwt_secret)?;

        Ok(claims.into_role())
    }
}

/// Resolver el circuito del cadastro a partir del rol y de `?internal=`.
///
/// Pedir el circuito interno sin rol interno está prohibido; un usuario
/// interno puede optar por el circuito normal con `internal=false`.
pub fn resolve_submission_role(caller: CallerRole, internal: Option<bool>) -> Result<CallerRole, AppError> {
    match (caller, internal) {
        (CallerRole::Registrant, Some(true)) => Err(AppError::Forbidden(
            "Cadastro interno requer credencial de usuário interno".to_string(),
        )),
        (CallerRole::Internal { .. }, Some(false)) => Ok(CallerRole::Registrant),
        (caller, _) => Ok(caller),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn internal() -> CallerRole {
        CallerRole::Internal {
            username: "ana.revisora".to_string(),
        }
    }

    #[test]
    fn test_resolve_submission_role() {
        assert_eq!(
            resolve_submission_role(CallerRole::Registrant, None).unwrap(),
            CallerRole::Registrant
        );
        assert_eq!(
            resolve_submission_role(CallerRole::Registrant, Some(false)).unwrap(),
            CallerRole::Registrant
        );
        assert!(matches!(
            resolve_submission_role(CallerRole::Registrant, Some(true)),
            Err(AppError::Forbidden(_))
        ));
        assert_eq!(resolve_submission_role(internal(), Some(true)).unwrap(), internal());
        assert_eq!(resolve_submission_role(internal(), None).unwrap(), internal());
        assert_eq!(
            resolve_submission_role(internal(), Some(false)).unwrap(),
            CallerRole::Registrant
        );
    }
}
