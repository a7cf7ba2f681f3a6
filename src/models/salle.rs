//! Modelo de Salle
//!
//! El servicio BDD devuelve `localisation` de tres formas distintas según la
//! consulta: un id, un objeto `{latitude, longitude}` o un array de esos
//! objetos. `Salle` acepta las tres y expone coordenadas normalizadas.

use serde::{Deserialize, Serialize};

use crate::models::voie::Voie;
use crate::utils::validation::validate_coordinates;

/// Coordenadas GPS de una salle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordonnees {
    pub latitude: f64,
    pub longitude: f64,
}

/// `localisation` tal como llega del servicio BDD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Localisation {
    Identifiant(i64),
    Coordonnees(Coordonnees),
    Liste(Vec<Coordonnees>),
}

impl Localisation {
    /// Primeras coordenadas válidas, si las hay
    pub fn coordonnees(&self) -> Option<Coordonnees> {
        let candidate = match self {
            Localisation::Identifiant(_) => None,
            Localisation::Coordonnees(c) => Some(*c),
            Localisation::Liste(list) => list.first().copied(),
        }?;

        validate_coordinates(candidate.latitude, candidate.longitude)
            .ok()
            .map(|_| candidate)
    }

    pub fn identifiant(&self) -> Option<i64> {
        match self {
            Localisation::Identifiant(id) => Some(*id),
            _ => None,
        }
    }
}

/// Salle de escalada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salle {
    pub id: i64,
    pub nom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localisation: Option<Localisation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre_voies: Option<i64>,
}

impl Salle {
    /// Búsqueda sin distinguir mayúsculas en `nom` o `description`
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.nom.to_lowercase().contains(&term)
            || self
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&term))
                .unwrap_or(false)
    }
}

/// Salle expuesta al cliente, con la localisation normalizada
#[derive(Debug, Clone, Serialize)]
pub struct SalleResponse {
    pub id: i64,
    pub nom: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub localisation_id: Option<i64>,
    pub coordonnees: Option<Coordonnees>,
    pub nombre_voies: i64,
}

impl From<Salle> for SalleResponse {
    fn from(salle: Salle) -> Self {
        let coordonnees = salle.localisation.as_ref().and_then(Localisation::coordonnees);
        let localisation_id = salle.localisation.as_ref().and_then(Localisation::identifiant);
        Self {
            id: salle.id,
            nom: salle.nom,
            description: salle.description,
            email: salle.email,
            telephone: salle.telephone,
            localisation_id,
            coordonnees,
            nombre_voies: salle.nombre_voies.unwrap_or(0),
        }
    }
}

/// Detalle de una salle con sus voies (sin filtrar)
#[derive(Debug, Clone, Serialize)]
pub struct SalleDetail {
    #[serde(flatten)]
    pub salle: SalleResponse,
    pub voies: Vec<Voie>,
}
