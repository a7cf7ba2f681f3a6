//! Utilidades JWT
//!
//! El gateway no emite tokens: solo decodifica el que entrega el servicio
//! de usuarios en el callback OAuth, con el secreto compartido.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::UserInfo;
use crate::utils::errors::AppError;

/// Claims del token del callback OAuth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackClaims {
    #[serde(alias = "userId")]
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

impl From<CallbackClaims> for UserInfo {
    fn from(claims: CallbackClaims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
            email: claims.email,
            premium: claims.premium,
        }
    }
}

/// Verificar y decodificar el token del callback.
///
/// `exp` se valida si está presente pero no es obligatorio.
pub fn verify_callback_token(token: &str, secret: &str) -> Result<CallbackClaims, AppError> {
    validate_token_format(token)?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();

    decode::<CallbackClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| AppError::Jwt(format!("Token invalide: {}", e)))
}

/// Validar formato de token (básico)
pub fn validate_token_format(token: &str) -> Result<(), AppError> {
    if token.is_empty() {
        return Err(AppError::Jwt("Le token ne peut pas être vide".to_string()));
    }

    if token.split('.').count() != 3 {
        return Err(AppError::Jwt("Le token doit avoir 3 parties séparées par des points".to_string()));
    }

    Ok(())
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Le header Authorization doit commencer par 'Bearer '".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AppError::Unauthorized("Token manquant".to_string()));
    }

    Ok(token)
}
