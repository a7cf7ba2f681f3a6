//! Cliente del servicio IA

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{read_json, AiApi};
use crate::models::chat::{normalize_ai_response, AiChatRequest};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AiClient {
    client: Client,
    base_url: String,
}

impl AiClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AiApi for AiClient {
    async fn chat(&self, request: &AiChatRequest) -> AppResult<String> {
        debug!(
            "🤖 Pregunta al servicio IA ({} intercambios de historial)",
            request.conversation_history.len()
        );
        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(request)
            .send()
            .await?;

        // El servicio IA responde `{response: ...}` sin envoltorio
        let body = read_json(response, "/chat").await?;
        Ok(normalize_ai_response(&body))
    }
}
