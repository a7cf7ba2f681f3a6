//! Servicio del perfil
//!
//! Agrega estadísticas y última actividad. Un fallo de las estadísticas no
//! tumba la página: se muestran ceros.

use std::sync::Arc;

use tracing::warn;

use crate::clients::BddApi;
use crate::models::seance::{DerniereActivite, ProfileResponse, ProfileStats, Seance};
use crate::models::user::UserInfo;
use crate::utils::errors::AppResult;

const SALLE_INCONNUE: &str = "Salle inconnue";

pub struct ProfileService {
    bdd: Arc<dyn BddApi>,
}

impl ProfileService {
    pub fn new(bdd: Arc<dyn BddApi>) -> Self {
        Self { bdd }
    }

    pub async fn profile(&self, user: UserInfo) -> AppResult<ProfileResponse> {
        let (stats, seances) = tokio::join!(self.bdd.seance_stats(user.id), self.bdd.list_user_seances(user.id));

        let stats = match stats {
            Ok(stats) => ProfileStats::from(stats),
            Err(e) => {
                warn!("⚠️ Estadísticas no disponibles para el usuario {}: {}", user.id, e);
                ProfileStats::default()
            }
        };

        let derniere_activite = match latest(seances?) {
            Some(seance) => self.activity(seance).await,
            None => DerniereActivite::default(),
        };

        Ok(ProfileResponse {
            user,
            stats,
            derniere_activite,
        })
    }

    async fn activity(&self, seance: Seance) -> DerniereActivite {
        let salle = match seance.salle_id {
            Some(id) => match self.bdd.get_salle(id).await {
                Ok(salle) => salle.nom,
                Err(_) => format!("Salle #{}", id),
            },
            None => SALLE_INCONNUE.to_string(),
        };

        DerniereActivite {
            voies: seance.route_count(),
            date: seance.date,
            salle: Some(salle),
        }
    }
}

/// Séance más reciente; las que no tienen fecha legible van al final
fn latest(seances: Vec<Seance>) -> Option<Seance> {
    seances.into_iter().max_by_key(|s| s.timestamp())
}
