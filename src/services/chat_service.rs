//! Servicio del asistente de chat
//!
//! Reenvía la pregunta al servicio IA con el historial de la conversación y
//! guarda el intercambio en el servicio BDD.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::clients::{AiApi, BddApi};
use crate::models::chat::{
    flatten_history, AiChatRequest, ChatMessage, ChatReply, ChatRequest, HistoryEntry, NewChatExchange,
};
use crate::utils::errors::{bad_request_error, AppResult};

pub struct ChatService {
    bdd: Arc<dyn BddApi>,
    ai: Arc<dyn AiApi>,
}

impl ChatService {
    pub fn new(bdd: Arc<dyn BddApi>, ai: Arc<dyn AiApi>) -> Self {
        Self { bdd, ai }
    }

    pub async fn send(&self, user_id: i64, request: ChatRequest) -> AppResult<ChatReply> {
        let message = request.message.trim().to_string();
        if message.is_empty() {
            return Err(bad_request_error("Le message ne peut pas être vide"));
        }

        let conversation_uid = request
            .conversation_uid
            .filter(|uid| !uid.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let history = self.bdd.conversation(&conversation_uid).await?;
        let response = self
            .ai
            .chat(&AiChatRequest {
                message: message.clone(),
                conversation_history: history.iter().map(HistoryEntry::from).collect(),
            })
            .await?;

        let exchange = NewChatExchange {
            user_id,
            message,
            response: response.clone(),
            conversation_uid: conversation_uid.clone(),
        };
        match self.bdd.save_exchange(&exchange).await {
            Ok(()) => info!("💬 Intercambio guardado en la conversación {}", conversation_uid),
            Err(e) => warn!("⚠️ No se pudo guardar el intercambio de {}: {}", conversation_uid, e),
        }

        Ok(ChatReply {
            response,
            conversation_uid,
        })
    }

    pub async fn history(&self, conversation_uid: &str) -> AppResult<Vec<ChatMessage>> {
        let exchanges = self.bdd.conversation(conversation_uid).await?;
        Ok(flatten_history(&exchanges))
    }
}
