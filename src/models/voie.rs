//! Modelo de Voie
//!
//! Una voie tal como la devuelve el servicio BDD. El gateway nunca la
//! modifica: los formularios de creación/edición se reenvían tal cual.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::catalog::grade::Cotation;
use crate::utils::validation::{
    validate_cotation, validate_iso_date, validate_hex_color, validate_type_de_voie,
};

/// Estado de una voie (`type_de_voie` en el servicio BDD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeDeVoie {
    Ouverte,
    Fermee,
    Maintenance,
}

impl TypeDeVoie {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeDeVoie::Ouverte => "ouverte",
            TypeDeVoie::Fermee => "fermee",
            TypeDeVoie::Maintenance => "maintenance",
        }
    }

    /// Parsea sin distinguir mayúsculas ni acentos.
    ///
    /// Acepta los valores guardados (`ouverte`, `fermee`, `maintenance`) y las
    /// etiquetas del selector de la UI (`Ouvertes`, `Fermées`, `En maintenance`).
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase().replace('é', "e");
        match normalized.as_str() {
            "ouverte" | "ouvertes" | "open" => Some(TypeDeVoie::Ouverte),
            "fermee" | "fermees" | "closed" => Some(TypeDeVoie::Fermee),
            "maintenance" | "en maintenance" => Some(TypeDeVoie::Maintenance),
            _ => None,
        }
    }
}

/// Voie principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voie {
    pub id: i64,
    #[serde(default)]
    pub salle_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cotation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ouvreur: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_de_voie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hauteur: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_date_ouverture",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_ouverture: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub couleur: Option<String>,
}

/// Acepta `YYYY-MM-DD` o un timestamp ISO (`2024-03-01T00:00:00.000Z`).
/// Una fecha ilegible se descarta en vez de rechazar toda la voie.
fn deserialize_date_ouverture<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date_ouverture))
}

pub fn parse_date_ouverture(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

impl Voie {
    /// Nombre mostrado: el `nom` o `Voie #<id>` si no tiene
    pub fn display_name(&self) -> String {
        match self.nom.as_deref().map(str::trim) {
            Some(nom) if !nom.is_empty() => nom.to_string(),
            _ => format!("Voie #{}", self.id),
        }
    }

    /// Cotation parseada; `None` si falta o está mal formada
    pub fn grade(&self) -> Option<Cotation> {
        self.cotation.as_deref().and_then(Cotation::parse)
    }

    /// Ouvreur no vacío
    pub fn ouvreur(&self) -> Option<&str> {
        self.ouvreur
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
    }

    pub fn status(&self) -> Option<TypeDeVoie> {
        self.type_de_voie.as_deref().and_then(TypeDeVoie::parse)
    }
}

/// Request para crear una voie en una salle
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVoieRequest {
    #[validate(length(min = 1, max = 100))]
    pub nom: Option<String>,

    #[validate(custom = "validate_cotation")]
    pub cotation: String,

    #[validate(length(max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ouvreur: Option<String>,

    #[validate(custom = "validate_type_de_voie")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_de_voie: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hauteur: Option<f64>,

    #[validate(custom = "validate_iso_date")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_ouverture: Option<String>,

    #[validate(custom = "validate_hex_color")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub couleur: Option<String>,
}

/// Request para actualizar una voie existente
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateVoieRequest {
    #[validate(length(min = 1, max = 100))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,

    #[validate(custom = "validate_cotation")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cotation: Option<String>,

    #[validate(length(max = 1000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ouvreur: Option<String>,

    #[validate(custom = "validate_type_de_voie")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_de_voie: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hauteur: Option<f64>,

    #[validate(custom = "validate_iso_date")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_ouverture: Option<String>,

    #[validate(custom = "validate_hex_color")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub couleur: Option<String>,
}

/// Cuerpo reenviado al servicio BDD al crear una voie
#[derive(Debug, Clone, Serialize)]
pub struct NewVoie {
    pub salle_id: i64,
    #[serde(flatten)]
    pub voie: CreateVoieRequest,
}
