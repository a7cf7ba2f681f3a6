//! Modelos de usuario y autenticación

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{validate_email, validate_not_empty};

/// Usuario tal como lo devuelve el servicio de usuarios
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// El servicio de usuarios dice `id`, los tokens OAuth `userId`
    #[serde(alias = "userId")]
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium: Option<bool>,
}

/// Request de login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "validate_email")]
    pub email: String,
    #[validate(custom = "validate_not_empty")]
    pub password: String,
}

/// Request de registro
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50), custom = "validate_not_empty")]
    pub username: String,

    #[validate(custom = "validate_email")]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,

    #[validate(must_match = "password")]
    pub confirm_password: String,
}

/// Cuerpo reenviado a `POST /api/users`, sin la confirmación
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        Self {
            username: request.username.trim().to_string(),
            email: request.email.trim().to_string(),
            password: request.password,
        }
    }
}

/// `data` de la respuesta de login del servicio de usuarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserInfo,
}

/// Respuesta de login del gateway
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_info_accepts_user_id_alias() {
        let user: UserInfo = serde_json::from_value(json!({
            "userId": 7,
            "username": "marie",
            "email": "marie@example.com"
        }))
        .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.premium, None);
    }

    #[test]
    fn test_register_validation() {
        let ok = RegisterRequest {
            username: "marie".to_string(),
            email: "marie@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = RegisterRequest {
            password: "12345".to_string(),
            confirm_password: "12345".to_string(),
            ..ok.clone()
        };
        assert!(short.validate().unwrap_err().field_errors().contains_key("password"));

        let mismatch = RegisterRequest {
            confirm_password: "secret2".to_string(),
            ..ok.clone()
        };
        assert!(mismatch
            .validate()
            .unwrap_err()
            .field_errors()
            .contains_key("confirm_password"));

        let bad_email = RegisterRequest {
            email: "marie@".to_string(),
            ..ok
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_new_user_drops_confirmation() {
        let request = RegisterRequest {
            username: " marie ".to_string(),
            email: "marie@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };
        let body = serde_json::to_value(NewUser::from(request)).unwrap();
        assert_eq!(body["username"], "marie");
        assert!(body.get("confirm_password").is_none());
    }
}
