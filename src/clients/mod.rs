//! Clientes HTTP de los microservicios
//!
//! Cada microservicio tiene un trait con las operaciones que usa el gateway
//! y una implementación reqwest. Los servicios dependen del trait, así que
//! los tests pueden sustituirla por un fake.

pub mod ai_client;
pub mod auth_client;
pub mod bdd_client;
pub mod payment_client;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::dto::BddEnvelope;
use crate::models::chat::{AiChatRequest, ChatExchange, NewChatExchange};
use crate::models::payment::{PaymentIntent, PaymentIntentRequest};
use crate::models::salle::Salle;
use crate::models::seance::{NewSeance, Seance, SeanceStats, VoieSeanceBatch};
use crate::models::user::{AuthPayload, LoginRequest, NewUser};
use crate::models::voie::{NewVoie, UpdateVoieRequest, Voie};
use crate::utils::errors::{AppError, AppResult};

pub use ai_client::AiClient;
pub use auth_client::AuthClient;
pub use bdd_client::BddClient;
pub use payment_client::PaymentClient;

/// Resultado de sondear el servicio BDD
#[derive(Debug, Clone, Serialize)]
pub struct BddHealth {
    pub status: &'static str,
    pub bdd_service_url: String,
    pub health_status: Option<u16>,
    pub test_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BddHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == "success"
    }
}

/// Servicio BDD (salles, voies, séances, conversaciones)
#[async_trait]
pub trait BddApi: Send + Sync {
    async fn list_salles(&self) -> AppResult<Vec<Salle>>;
    async fn get_salle(&self, id: i64) -> AppResult<Salle>;
    async fn list_voies(&self, salle_id: i64) -> AppResult<Vec<Voie>>;
    async fn create_voie(&self, voie: &NewVoie) -> AppResult<Voie>;
    async fn update_voie(&self, id: i64, changes: &UpdateVoieRequest) -> AppResult<Voie>;
    async fn delete_voie(&self, id: i64) -> AppResult<()>;
    async fn create_seance(&self, seance: &NewSeance) -> AppResult<Seance>;
    async fn create_voie_seances(&self, batch: &VoieSeanceBatch) -> AppResult<()>;
    async fn list_user_seances(&self, user_id: i64) -> AppResult<Vec<Seance>>;
    async fn seance_stats(&self, user_id: i64) -> AppResult<SeanceStats>;
    /// Intercambios de una conversación; vacío si no existe
    async fn conversation(&self, conversation_uid: &str) -> AppResult<Vec<ChatExchange>>;
    async fn save_exchange(&self, exchange: &NewChatExchange) -> AppResult<()>;
    async fn health(&self) -> BddHealth;
}

/// Servicio de usuarios
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &LoginRequest) -> AppResult<AuthPayload>;
    async fn register(&self, user: &NewUser) -> AppResult<Value>;
    async fn logout(&self, token: &str) -> AppResult<()>;
}

/// Servicio IA del asistente
#[async_trait]
pub trait AiApi: Send + Sync {
    /// Respuesta ya normalizada a texto
    async fn chat(&self, request: &AiChatRequest) -> AppResult<String>;
}

/// Servicio de pago
#[async_trait]
pub trait PaymentApi: Send + Sync {
    async fn create_payment_intent(&self, request: &PaymentIntentRequest) -> AppResult<PaymentIntent>;
}

/// Cliente reqwest compartido por todos los microservicios
pub fn build_http_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("climbhelp-gateway/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Internal(format!("No se pudo crear el cliente HTTP: {}", e)))
}

/// Lee una respuesta de microservicio.
///
/// Acepta el envoltorio `{success, data, error}` o el payload directo. Los
/// estados de error del servicio se traducen a `AppError`.
pub(crate) async fn read_payload<T: DeserializeOwned>(response: Response, what: &str) -> AppResult<T> {
    let value = read_json(response, what).await?;
    decode_payload(value, what)
}

/// Cuerpo JSON de una respuesta correcta, sin desenvolver
pub(crate) async fn read_json(response: Response, what: &str) -> AppResult<Value> {
    let status = response.status();
    let body = response.text().await?;
    debug!("📥 {} → {} ({} bytes)", what, status, body.len());

    let value: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body)
            .map_err(|e| AppError::ExternalApi(format!("{}: réponse non JSON ({})", what, e)))?
    };

    if !status.is_success() {
        let message = upstream_message(&value).unwrap_or_else(|| format!("{} a répondu {}", what, status));
        return Err(status_error(status, message));
    }

    Ok(value)
}

/// Extrae `T` de un valor envuelto o directo
pub(crate) fn decode_payload<T: DeserializeOwned>(value: Value, what: &str) -> AppResult<T> {
    let is_envelope = value
        .as_object()
        .map(|o| o.contains_key("success") || o.contains_key("data"))
        .unwrap_or(false);

    if is_envelope {
        let envelope: BddEnvelope<T> = serde_json::from_value(value)
            .map_err(|e| AppError::ExternalApi(format!("{}: format inattendu ({})", what, e)))?;
        if !envelope.success {
            return Err(AppError::ExternalApi(envelope.error_message()));
        }
        return envelope
            .data
            .ok_or_else(|| AppError::ExternalApi(format!("{}: réponse sans données", what)));
    }

    serde_json::from_value(value).map_err(|e| AppError::ExternalApi(format!("{}: format inattendu ({})", what, e)))
}

/// Comprueba el estado de una respuesta cuyo cuerpo no interesa
pub(crate) async fn expect_success(response: Response, what: &str) -> AppResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| upstream_message(&v))
        .unwrap_or_else(|| format!("{} a répondu {}", what, status));
    Err(status_error(status, message))
}

fn upstream_message(value: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn status_error(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized(message),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::BadRequest(message)
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => AppError::ServiceUnavailable(message),
        _ => AppError::ExternalApi(message),
    }
}
