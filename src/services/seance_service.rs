//! Servicio de séances

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use validator::Validate;

use crate::clients::BddApi;
use crate::models::seance::{CreateSeanceRequest, NewSeance, NewVoieSeance, Seance, SeanceCreated, VoieSeanceBatch};
use crate::utils::errors::AppResult;

pub struct SeanceService {
    bdd: Arc<dyn BddApi>,
}

impl SeanceService {
    pub fn new(bdd: Arc<dyn BddApi>) -> Self {
        Self { bdd }
    }

    /// Registra una séance y sus intentos en una sola llamada batch
    pub async fn create(&self, user_id: i64, salle_id: i64, request: CreateSeanceRequest) -> AppResult<SeanceCreated> {
        request.validate()?;
        for tentative in &request.voies {
            tentative.validate()?;
        }

        let date = request
            .date
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| Utc::now().date_naive().format("%Y-%m-%d").to_string());

        let seance = self
            .bdd
            .create_seance(&NewSeance {
                user_id,
                salle_id,
                date,
                avis: request.avis.clone(),
            })
            .await?;

        let batch = VoieSeanceBatch {
            voie_seances: request
                .voies
                .iter()
                .map(|t| NewVoieSeance {
                    seance_id: seance.id,
                    voie_id: t.voie_id,
                    reussie: t.reussie,
                    avis: t.avis.clone(),
                })
                .collect(),
        };
        if let Err(e) = self.bdd.create_voie_seances(&batch).await {
            warn!(
                "⚠️ Séance {} creada sin intentos (usuario {}): {}",
                seance.id, user_id, e
            );
            return Err(e);
        }

        let total = batch.voie_seances.len();
        let reussies = batch.voie_seances.iter().filter(|v| v.reussie).count();
        info!(
            "📝 Séance {} registrada para el usuario {}: {}/{} voies réussies",
            seance.id, user_id, reussies, total
        );

        Ok(SeanceCreated { seance, total, reussies })
    }

    /// Séances del usuario, la más reciente primero
    pub async fn list(&self, user_id: i64) -> AppResult<Vec<Seance>> {
        let mut seances = self.bdd.list_user_seances(user_id).await?;
        seances.sort_by_key(|s| Reverse(s.timestamp()));
        Ok(seances)
    }
}
