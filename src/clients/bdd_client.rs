//! Cliente del servicio BDD

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{expect_success, read_payload, BddApi, BddHealth};
use crate::models::chat::{ChatExchange, NewChatExchange};
use crate::models::salle::Salle;
use crate::models::seance::{NewSeance, Seance, SeanceStats, VoieSeanceBatch};
use crate::models::voie::{NewVoie, UpdateVoieRequest, Voie};
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct BddClient {
    client: Client,
    base_url: String,
}

impl BddClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        debug!("📤 GET {}", path);
        let response = self.client.get(self.url(path)).send().await?;
        read_payload(response, path).await
    }

    async fn probe(&self, path: &str) -> Result<(u16, Option<Value>), String> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = response.status();
        let body = response.json::<Value>().await.ok();
        Ok((status.as_u16(), if status.is_success() { body } else { None }))
    }
}

#[async_trait]
impl BddApi for BddClient {
    async fn list_salles(&self) -> AppResult<Vec<Salle>> {
        self.get("/api/salles").await
    }

    async fn get_salle(&self, id: i64) -> AppResult<Salle> {
        self.get(&format!("/api/salles/{}", id)).await
    }

    async fn list_voies(&self, salle_id: i64) -> AppResult<Vec<Voie>> {
        self.get(&format!("/api/salles/{}/voies", salle_id)).await
    }

    async fn create_voie(&self, voie: &NewVoie) -> AppResult<Voie> {
        info!("🧗 Creando voie en la salle {}", voie.salle_id);
        let response = self.client.post(self.url("/api/voies")).json(voie).send().await?;
        read_payload(response, "/api/voies").await
    }

    async fn update_voie(&self, id: i64, changes: &UpdateVoieRequest) -> AppResult<Voie> {
        let path = format!("/api/voies/{}", id);
        info!("✏️ Actualizando voie {}", id);
        let response = self.client.put(self.url(&path)).json(changes).send().await?;
        read_payload(response, &path).await
    }

    async fn delete_voie(&self, id: i64) -> AppResult<()> {
        let path = format!("/api/voies/{}", id);
        info!("🗑️ Eliminando voie {}", id);
        let response = self.client.delete(self.url(&path)).send().await?;
        expect_success(response, &path).await
    }

    async fn create_seance(&self, seance: &NewSeance) -> AppResult<Seance> {
        let response = self.client.post(self.url("/api/seances")).json(seance).send().await?;
        read_payload(response, "/api/seances").await
    }

    async fn create_voie_seances(&self, batch: &VoieSeanceBatch) -> AppResult<()> {
        let response = self
            .client
            .post(self.url("/api/voie-seances/batch"))
            .json(batch)
            .send()
            .await?;
        expect_success(response, "/api/voie-seances/batch").await
    }

    async fn list_user_seances(&self, user_id: i64) -> AppResult<Vec<Seance>> {
        self.get(&format!("/api/seances/user/{}", user_id)).await
    }

    async fn seance_stats(&self, user_id: i64) -> AppResult<SeanceStats> {
        self.get(&format!("/api/seances/user/{}/stats", user_id)).await
    }

    async fn conversation(&self, conversation_uid: &str) -> AppResult<Vec<ChatExchange>> {
        let path = format!(
            "/chat-conversations/session/{}",
            urlencoding::encode(conversation_uid)
        );
        match self.get(&path).await {
            Err(AppError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    async fn save_exchange(&self, exchange: &NewChatExchange) -> AppResult<()> {
        let response = self
            .client
            .post(self.url("/chat-conversations"))
            .json(exchange)
            .send()
            .await?;
        expect_success(response, "/chat-conversations").await
    }

    async fn health(&self) -> BddHealth {
        let (health, test) = tokio::join!(self.probe("/health"), self.probe("/api/test"));

        match (health, test) {
            (Ok((health_status, health)), Ok((test_status, test))) => {
                let ok = StatusCode::from_u16(health_status).map(|s| s.is_success()).unwrap_or(false)
                    && StatusCode::from_u16(test_status).map(|s| s.is_success()).unwrap_or(false);
                if !ok {
                    warn!("⚠️ Servicio BDD degradado: health={}, test={}", health_status, test_status);
                }
                BddHealth {
                    status: if ok { "success" } else { "error" },
                    bdd_service_url: self.base_url.clone(),
                    health_status: Some(health_status),
                    test_status: Some(test_status),
                    health,
                    test,
                    error: None,
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("❌ Servicio BDD injoignable: {}", e);
                BddHealth {
                    status: "error",
                    bdd_service_url: self.base_url.clone(),
                    health_status: None,
                    test_status: None,
                    health: None,
                    test: None,
                    error: Some(e),
                }
            }
        }
    }
}
