//! Modelos del asistente de chat

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Respuesta por defecto cuando el servicio IA no devuelve nada utilizable
pub const NO_RESPONSE_FALLBACK: &str = "Désolé, je n'ai pas pu générer de réponse.";

/// Intercambio guardado en `/chat-conversations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub message: String,
    pub response: String,
    #[serde(default)]
    pub conversation_uid: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Entrada del historial que se envía al servicio IA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub message: String,
    pub response: String,
}

impl From<&ChatExchange> for HistoryEntry {
    fn from(exchange: &ChatExchange) -> Self {
        Self {
            message: exchange.message.clone(),
            response: exchange.response.clone(),
        }
    }
}

/// Request de `POST /api/chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_uid: Option<String>,
}

/// Respuesta de `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub conversation_uid: String,
}

/// Mensaje plano del historial, listo para pintar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub is_user: bool,
    pub timestamp: Option<String>,
}

/// Aplana intercambios en mensajes `user-<id>` / `bot-<id>`
pub fn flatten_history(exchanges: &[ChatExchange]) -> Vec<ChatMessage> {
    exchanges
        .iter()
        .flat_map(|exchange| {
            [
                ChatMessage {
                    id: format!("user-{}", exchange.id),
                    content: exchange.message.clone(),
                    is_user: true,
                    timestamp: exchange.created_at.clone(),
                },
                ChatMessage {
                    id: format!("bot-{}", exchange.id),
                    content: exchange.response.clone(),
                    is_user: false,
                    timestamp: exchange.created_at.clone(),
                },
            ]
        })
        .collect()
}

/// Cuerpo de `POST /chat-conversations`
#[derive(Debug, Clone, Serialize)]
pub struct NewChatExchange {
    pub user_id: i64,
    pub message: String,
    pub response: String,
    pub conversation_uid: String,
}

/// Cuerpo de `POST /chat` en el servicio IA
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiChatRequest {
    pub message: String,
    pub conversation_history: Vec<HistoryEntry>,
}

/// Normaliza la respuesta del servicio IA a texto.
///
/// `response` puede ser un string, un objeto con `content` o `text`, u otra
/// cosa que se serializa tal cual.
pub fn normalize_ai_response(body: &Value) -> String {
    match body.get("response") {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(Value::Object(object)) => object
            .get("content")
            .or_else(|| object.get("text"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| Value::Object(object.clone()).to_string()),
        Some(Value::Null) | None => NO_RESPONSE_FALLBACK.to_string(),
        Some(Value::String(_)) => NO_RESPONSE_FALLBACK.to_string(),
        Some(other) => other.to_string(),
    }
}
