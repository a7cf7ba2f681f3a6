//! Modelos de Séance
//!
//! Una séance agrupa los intentos de voies de un usuario en una salle en
//! un día. Se crean reenviando al servicio BDD; el gateway no las guarda.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::UserInfo;
use crate::utils::validation::validate_iso_date;

/// Séance tal como la devuelve el servicio BDD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seance {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salle_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avis: Option<String>,
    /// Voies intentadas; el servicio BDD las embebe con forma variable
    #[serde(default)]
    pub voie: Vec<serde_json::Value>,
}

impl Seance {
    /// Instante de la séance. Acepta RFC 3339 o `YYYY-MM-DD`.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    pub fn route_count(&self) -> usize {
        self.voie.len()
    }
}

/// Intento de una voie dentro de la request de creación
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VoieTentative {
    #[validate(range(min = 1))]
    pub voie_id: i64,
    #[serde(default)]
    pub reussie: bool,
    #[validate(length(max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avis: Option<String>,
}

/// Request para registrar una séance
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSeanceRequest {
    #[validate(length(max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avis: Option<String>,

    #[validate(custom = "validate_iso_date")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[validate(length(min = 1))]
    pub voies: Vec<VoieTentative>,
}

/// Cuerpo de `POST /api/seances` en el servicio BDD
#[derive(Debug, Clone, Serialize)]
pub struct NewSeance {
    pub user_id: i64,
    pub salle_id: i64,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avis: Option<String>,
}

/// Una fila de `voie_seance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVoieSeance {
    pub seance_id: i64,
    pub voie_id: i64,
    pub reussie: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avis: Option<String>,
}

/// Cuerpo de `POST /api/voie-seances/batch`
#[derive(Debug, Clone, Serialize)]
pub struct VoieSeanceBatch {
    #[serde(rename = "voieSeances")]
    pub voie_seances: Vec<NewVoieSeance>,
}

/// Respuesta de creación: la séance y el resumen de intentos
#[derive(Debug, Clone, Serialize)]
pub struct SeanceCreated {
    pub seance: Seance,
    pub total: usize,
    pub reussies: usize,
}

/// Estadísticas calculadas por el servicio BDD
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeanceStats {
    #[serde(default)]
    pub ascensions: Option<i64>,
    #[serde(default, rename = "sallesVisitees")]
    pub salles_visitees: Option<i64>,
    #[serde(default, rename = "niveauMax")]
    pub niveau_max: Option<String>,
    #[serde(default, rename = "joursGrimpe")]
    pub jours_grimpe: Option<i64>,
}

/// Estadísticas mostradas en el perfil
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStats {
    pub total_ascensions: i64,
    pub salles_visitees: i64,
    pub niveau_max: String,
    pub jours_grimpe: i64,
}

impl Default for ProfileStats {
    fn default() -> Self {
        Self {
            total_ascensions: 0,
            salles_visitees: 0,
            niveau_max: "N/A".to_string(),
            jours_grimpe: 0,
        }
    }
}

impl From<SeanceStats> for ProfileStats {
    fn from(stats: SeanceStats) -> Self {
        Self {
            total_ascensions: stats.ascensions.unwrap_or(0),
            salles_visitees: stats.salles_visitees.unwrap_or(0),
            niveau_max: stats
                .niveau_max
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            jours_grimpe: stats.jours_grimpe.unwrap_or(0),
        }
    }
}

/// Última séance del usuario
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerniereActivite {
    pub date: Option<String>,
    pub salle: Option<String>,
    pub voies: usize,
}

/// Respuesta de `GET /api/profile`
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user: UserInfo,
    pub stats: ProfileStats,
    pub derniere_activite: DerniereActivite,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_seance_timestamp_formats() {
        let seance = |date: &str| -> Seance {
            serde_json::from_value(json!({ "id": 1, "date": date })).unwrap()
        };
        assert!(seance("2024-05-02").timestamp().is_some());
        assert!(seance("2024-05-02T18:30:00Z").timestamp().is_some());
        assert!(seance("2024-05-02T18:30:00.123").timestamp().is_some());
        assert!(seance("hier").timestamp().is_none());
        assert!(seance("2024-05-03").timestamp() > seance("2024-05-02T23:00:00Z").timestamp());
    }

    #[test]
    fn test_route_count() {
        let seance: Seance = serde_json::from_value(json!({
            "id": 1,
            "voie": [{ "voie_id": 3 }, { "voie_id": 4 }]
        }))
        .unwrap();
        assert_eq!(seance.route_count(), 2);
    }

    #[test]
    fn test_create_seance_validation() {
        let empty: CreateSeanceRequest = serde_json::from_value(json!({ "voies": [] })).unwrap();
        assert!(empty.validate().is_err());

        let ok: CreateSeanceRequest = serde_json::from_value(json!({
            "date": "2024-05-02",
            "voies": [{ "voie_id": 3, "reussie": true }]
        }))
        .unwrap();
        assert!(ok.validate().is_ok());

        let bad_date: CreateSeanceRequest = serde_json::from_value(json!({
            "date": "02/05/2024",
            "voies": [{ "voie_id": 3 }]
        }))
        .unwrap();
        assert!(bad_date.validate().is_err());

        let bad_voie = VoieTentative { voie_id: 0, reussie: false, avis: None };
        assert!(bad_voie.validate().is_err());
    }

    #[test]
    fn test_batch_uses_camel_case_key() {
        let batch = VoieSeanceBatch {
            voie_seances: vec![NewVoieSeance { seance_id: 8, voie_id: 3, reussie: true, avis: None }],
        };
        let value = serde_json::to_value(batch).unwrap();
        assert_eq!(value["voieSeances"][0]["seance_id"], 8);
        assert!(value["voieSeances"][0].get("avis").is_none());
    }

    #[test]
    fn test_profile_stats_defaults() {
        let stats: SeanceStats = serde_json::from_value(json!({
            "ascensions": 12,
            "sallesVisitees": null,
            "niveauMax": ""
        }))
        .unwrap();
        let profile = ProfileStats::from(stats);
        assert_eq!(profile.total_ascensions, 12);
        assert_eq!(profile.salles_visitees, 0);
        assert_eq!(profile.niveau_max, "N/A");
        assert_eq!(ProfileStats::default().niveau_max, "N/A");
    }
}
