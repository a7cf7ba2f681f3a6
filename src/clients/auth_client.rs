//! Cliente del servicio de usuarios

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use super::{expect_success, read_payload, AuthApi};
use crate::models::user::{AuthPayload, LoginRequest, NewUser};
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, credentials: &LoginRequest) -> AppResult<AuthPayload> {
        info!("🔐 Login para {}", credentials.email);
        let response = self
            .client
            .post(format!("{}/api/users/login", self.base_url))
            .json(credentials)
            .send()
            .await?;

        // Un login rechazado no es un fallo del servicio
        read_payload(response, "/api/users/login")
            .await
            .map_err(|e| match e {
                AppError::ExternalApi(msg) | AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                    AppError::Unauthorized(msg)
                }
                other => other,
            })
    }

    async fn register(&self, user: &NewUser) -> AppResult<Value> {
        info!("📝 Registro de {}", user.username);
        let response = self
            .client
            .post(format!("{}/api/users", self.base_url))
            .json(user)
            .send()
            .await?;
        read_payload(response, "/api/users").await
    }

    async fn logout(&self, token: &str) -> AppResult<()> {
        let response = self
            .client
            .post(format!("{}/auth/logout", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        if let Err(e) = expect_success(response, "/auth/logout").await {
            warn!("⚠️ Logout remoto fallido: {}", e);
        }
        Ok(())
    }
}
