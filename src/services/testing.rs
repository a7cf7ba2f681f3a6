//! Fakes de los microservicios para los tests de servicios

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::clients::{AiApi, AuthApi, BddApi, BddHealth, PaymentApi};
use crate::models::chat::{AiChatRequest, ChatExchange, NewChatExchange};
use crate::models::payment::{PaymentIntent, PaymentIntentRequest};
use crate::models::salle::Salle;
use crate::models::seance::{NewSeance, Seance, SeanceStats, VoieSeanceBatch};
use crate::models::user::{AuthPayload, LoginRequest, NewUser, UserInfo};
use crate::models::voie::{parse_date_ouverture, NewVoie, UpdateVoieRequest, Voie};
use crate::utils::errors::{AppError, AppResult};

pub fn marie() -> UserInfo {
    UserInfo {
        id: 7,
        username: "marie".to_string(),
        email: "marie@example.com".to_string(),
        premium: None,
    }
}

#[derive(Default)]
pub struct FakeBdd {
    pub salles: Vec<Salle>,
    pub voies: Vec<Voie>,
    pub stats: Option<SeanceStats>,
    pub fail_save_exchange: bool,
    pub fail_batch: bool,
    pub seances: Mutex<Vec<Seance>>,
    pub batches: Mutex<Vec<VoieSeanceBatch>>,
    pub exchanges: Mutex<Vec<ChatExchange>>,
    pub created: Mutex<Vec<Voie>>,
}

impl FakeBdd {
    pub fn with_sample_data() -> Self {
        let salles = serde_json::from_value(json!([
            { "id": 1, "nom": "Vertical'Art", "description": "Grenoble, bloc et voie", "localisation": 4 },
            { "id": 2, "nom": "Climb Up", "description": "Annecy", "localisation": { "latitude": 45.9, "longitude": 6.12 } }
        ]))
        .unwrap();
        let voies = serde_json::from_value(json!([
            { "id": 1, "salle_id": 1, "nom": "Dalle", "cotation": "6a", "ouvreur": "Luc", "type_de_voie": "ouverte" },
            { "id": 2, "salle_id": 1, "nom": "Toit", "cotation": "5c", "ouvreur": "Marie", "type_de_voie": "fermee" },
            { "id": 3, "salle_id": 1, "nom": "Arête", "cotation": "6a+", "type_de_voie": "ouverte" },
            { "id": 4, "salle_id": 1, "nom": "Projet", "ouvreur": "Marie" }
        ]))
        .unwrap();

        Self {
            salles,
            voies,
            stats: Some(SeanceStats {
                ascensions: Some(42),
                salles_visitees: Some(3),
                niveau_max: Some("6c".to_string()),
                jours_grimpe: Some(12),
            }),
            ..Default::default()
        }
    }

    pub fn created_voies(&self) -> Vec<Voie> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl BddApi for FakeBdd {
    async fn list_salles(&self) -> AppResult<Vec<Salle>> {
        Ok(self.salles.clone())
    }

    async fn get_salle(&self, id: i64) -> AppResult<Salle> {
        self.salles
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Salle {}", id)))
    }

    async fn list_voies(&self, salle_id: i64) -> AppResult<Vec<Voie>> {
        Ok(self.voies.iter().filter(|v| v.salle_id == salle_id).cloned().collect())
    }

    async fn create_voie(&self, voie: &NewVoie) -> AppResult<Voie> {
        let mut created = self.created.lock().unwrap();
        let new = Voie {
            id: 100 + created.len() as i64,
            salle_id: voie.salle_id,
            nom: voie.voie.nom.clone(),
            cotation: Some(voie.voie.cotation.clone()),
            description: voie.voie.description.clone(),
            ouvreur: voie.voie.ouvreur.clone(),
            type_de_voie: voie.voie.type_de_voie.clone(),
            hauteur: voie.voie.hauteur,
            date_ouverture: voie.voie.date_ouverture.as_deref().and_then(parse_date_ouverture),
            couleur: voie.voie.couleur.clone(),
        };
        created.push(new.clone());
        Ok(new)
    }

    async fn update_voie(&self, id: i64, changes: &UpdateVoieRequest) -> AppResult<Voie> {
        let mut voie = self
            .voies
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Voie {}", id)))?;
        if let Some(cotation) = &changes.cotation {
            voie.cotation = Some(cotation.clone());
        }
        Ok(voie)
    }

    async fn delete_voie(&self, id: i64) -> AppResult<()> {
        if self.voies.iter().any(|v| v.id == id) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Voie {}", id)))
        }
    }

    async fn create_seance(&self, seance: &NewSeance) -> AppResult<Seance> {
        let mut seances = self.seances.lock().unwrap();
        let created = Seance {
            id: 500 + seances.len() as i64,
            user_id: seance.user_id,
            salle_id: Some(seance.salle_id),
            date: Some(seance.date.clone()),
            avis: seance.avis.clone(),
            voie: Vec::new(),
        };
        seances.push(created.clone());
        Ok(created)
    }

    async fn create_voie_seances(&self, batch: &VoieSeanceBatch) -> AppResult<()> {
        if self.fail_batch {
            return Err(AppError::ServiceUnavailable("BDD indisponible".to_string()));
        }
        self.batches.lock().unwrap().push(batch.clone());
        Ok(())
    }

    async fn list_user_seances(&self, user_id: i64) -> AppResult<Vec<Seance>> {
        Ok(self
            .seances
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn seance_stats(&self, _user_id: i64) -> AppResult<SeanceStats> {
        self.stats
            .clone()
            .ok_or_else(|| AppError::ExternalApi("stats indisponibles".to_string()))
    }

    async fn conversation(&self, conversation_uid: &str) -> AppResult<Vec<ChatExchange>> {
        Ok(self
            .exchanges
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.conversation_uid.as_deref() == Some(conversation_uid))
            .cloned()
            .collect())
    }

    async fn save_exchange(&self, exchange: &NewChatExchange) -> AppResult<()> {
        if self.fail_save_exchange {
            return Err(AppError::ServiceUnavailable("BDD hors service".to_string()));
        }
        let mut exchanges = self.exchanges.lock().unwrap();
        let id = exchanges.len() as i64 + 1;
        exchanges.push(ChatExchange {
            id,
            user_id: exchange.user_id,
            message: exchange.message.clone(),
            response: exchange.response.clone(),
            conversation_uid: Some(exchange.conversation_uid.clone()),
            created_at: None,
        });
        Ok(())
    }

    async fn health(&self) -> BddHealth {
        BddHealth {
            status: "success",
            bdd_service_url: "fake".to_string(),
            health_status: Some(200),
            test_status: Some(200),
            health: None,
            test: None,
            error: None,
        }
    }
}

#[derive(Default)]
pub struct FakeAuth {
    pub logouts: Mutex<Vec<String>>,
    pub registered: Mutex<Vec<String>>,
}

#[async_trait]
impl AuthApi for FakeAuth {
    async fn login(&self, credentials: &LoginRequest) -> AppResult<AuthPayload> {
        if credentials.email == "marie@example.com" && credentials.password == "secret1" {
            Ok(AuthPayload {
                token: "token-marie".to_string(),
                user: marie(),
            })
        } else {
            Err(AppError::Unauthorized("Identifiants invalides".to_string()))
        }
    }

    async fn register(&self, user: &NewUser) -> AppResult<Value> {
        self.registered.lock().unwrap().push(user.username.clone());
        Ok(json!({ "id": 8, "username": user.username, "email": user.email }))
    }

    async fn logout(&self, token: &str) -> AppResult<()> {
        self.logouts.lock().unwrap().push(token.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAi {
    pub requests: Mutex<Vec<AiChatRequest>>,
}

#[async_trait]
impl AiApi for FakeAi {
    async fn chat(&self, request: &AiChatRequest) -> AppResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(format!("Réponse à: {}", request.message))
    }
}

#[derive(Default)]
pub struct FakePayment {
    pub requests: Mutex<Vec<PaymentIntentRequest>>,
}

#[async_trait]
impl PaymentApi for FakePayment {
    async fn create_payment_intent(&self, request: &PaymentIntentRequest) -> AppResult<PaymentIntent> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(PaymentIntent {
            client_secret: Some("pi_secret".to_string()),
            id: Some("pi_1".to_string()),
        })
    }
}
