//! Servicio de autenticación
//!
//! Login, registro, callback OAuth y logout. El servicio de usuarios emite
//! los tokens; el gateway solo guarda la sesión asociada.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};
use validator::Validate;

use crate::clients::AuthApi;
use crate::dto::CallbackQuery;
use crate::models::user::{LoginRequest, LoginResponse, NewUser, RegisterRequest};
use crate::session::{SessionStore, UserSession};
use crate::utils::errors::{bad_request_error, AppError, AppResult};
use crate::utils::jwt::verify_callback_token;

pub struct AuthService {
    auth: Arc<dyn AuthApi>,
    sessions: SessionStore,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(auth: Arc<dyn AuthApi>, sessions: SessionStore, jwt_secret: impl Into<String>) -> Self {
        Self {
            auth,
            sessions,
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Login contra el servicio de usuarios y creación de la sesión
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let credentials = LoginRequest {
            email: request.email.trim().to_string(),
            password: request.password,
        };
        let payload = self.auth.login(&credentials).await?;
        let session = self.sessions.create(payload.token.clone(), payload.user).await;

        info!("🔐 Login correcto para {}", session.user.email);
        Ok(LoginResponse {
            token: session.token,
            user: session.user,
            expires_at: session.expires_at,
        })
    }

    /// Registro; no abre sesión
    pub async fn register(&self, request: RegisterRequest) -> AppResult<Value> {
        request.validate()?;

        let user = NewUser::from(request);
        let created = self.auth.register(&user).await?;
        info!("🆕 Usuario registrado: {}", user.username);
        Ok(created)
    }

    /// Callback OAuth: el servicio de usuarios redirige con `token` o `error`
    pub async fn callback(&self, query: CallbackQuery) -> AppResult<LoginResponse> {
        if let Some(error) = query.error.filter(|e| !e.trim().is_empty()) {
            warn!("🚫 Callback OAuth con error: {}", error);
            return Err(AppError::Unauthorized(error));
        }

        let token = query
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| bad_request_error("Token manquant dans le callback"))?;

        let claims = verify_callback_token(&token, &self.jwt_secret)?;
        let session = self.sessions.create(token, claims.into()).await;

        info!("🔐 Sesión OAuth abierta para {}", session.user.email);
        Ok(LoginResponse {
            token: session.token,
            user: session.user,
            expires_at: session.expires_at,
        })
    }

    /// Cierra la sesión local y avisa al servicio de usuarios
    pub async fn logout(&self, session: &UserSession) -> AppResult<()> {
        self.sessions.remove(&session.token).await;
        self.auth.logout(&session.token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::FakeAuth;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "test-secret";

    fn service() -> (AuthService, Arc<FakeAuth>, SessionStore) {
        let auth = Arc::new(FakeAuth::default());
        let sessions = SessionStore::new(24);
        (AuthService::new(auth.clone(), sessions.clone(), SECRET), auth, sessions)
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_creates_session() {
        let (service, _, sessions) = service();
        let response = service.login(login(" marie@example.com ", "secret1")).await.unwrap();

        assert_eq!(response.token, "token-marie");
        assert_eq!(response.user.username, "marie");
        let session = sessions.get("token-marie").await.unwrap();
        assert_eq!(session.user.id, 7);
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let (service, _, sessions) = service();
        let err = service.login(login("marie@example.com", "nope")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(sessions.is_empty().await);

        let err = service.login(login("not-an-email", "secret1")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_checks_confirmation() {
        let (service, auth, sessions) = service();
        let mismatch: RegisterRequest = serde_json::from_value(json!({
            "username": "luc",
            "email": "luc@example.com",
            "password": "secret1",
            "confirm_password": "secret2"
        }))
        .unwrap();
        assert!(matches!(service.register(mismatch).await, Err(AppError::Validation(_))));

        let ok: RegisterRequest = serde_json::from_value(json!({
            "username": " luc ",
            "email": "luc@example.com",
            "password": "secret1",
            "confirm_password": "secret1"
        }))
        .unwrap();
        service.register(ok).await.unwrap();
        assert_eq!(*auth.registered.lock().unwrap(), vec!["luc".to_string()]);
        assert!(sessions.is_empty().await);
    }

    #[tokio::test]
    async fn test_callback() {
        let (service, _, sessions) = service();
        let token = encode(
            &Header::default(),
            &json!({ "userId": 9, "username": "jo", "email": "jo@example.com" }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let response = service
            .callback(CallbackQuery {
                token: Some(token.clone()),
                error: None,
            })
            .await
            .unwrap();
        assert_eq!(response.user.id, 9);
        assert!(sessions.get(&token).await.is_some());
    }

    #[tokio::test]
    async fn test_callback_errors() {
        let (service, _, _) = service();
        let err = service
            .callback(CallbackQuery {
                token: None,
                error: Some("access_denied".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(msg) if msg == "access_denied"));

        let err = service
            .callback(CallbackQuery { token: None, error: None })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (service, auth, sessions) = service();
        service.login(login("marie@example.com", "secret1")).await.unwrap();
        let session = sessions.get("token-marie").await.unwrap();

        service.logout(&session).await.unwrap();
        assert!(sessions.get("token-marie").await.is_none());
        assert_eq!(*auth.logouts.lock().unwrap(), vec!["token-marie".to_string()]);
    }
}
