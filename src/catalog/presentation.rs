//! Adaptador de presentación
//!
//! Colores por cotation, badges de estado y la vista de catálogo que
//! consume el cliente web.

use serde::Serialize;

use crate::catalog::grade::Cotation;
use crate::models::voie::{TypeDeVoie, Voie};

/// Color por defecto para cotations fuera de la escala 3–8 o inválidas
pub const FALLBACK_COLOR: &str = "#666";

pub const EMPTY_STATE_TITLE: &str = "Aucune voie trouvée";
pub const EMPTY_STATE_MESSAGE: &str =
    "Aucune voie ne correspond aux critères de filtrage sélectionnés.";

/// Color del nivel numérico de la cotation (sin el `+`)
pub fn grade_color(cotation: Option<&str>) -> &'static str {
    match cotation.and_then(Cotation::parse).map(|c| c.level()) {
        Some(3) => "#00ff00",
        Some(4) => "#ffff00",
        Some(5) => "#ff8000",
        Some(6) => "#ff0000",
        Some(7) => "#800080",
        Some(8) => "#000000",
        _ => FALLBACK_COLOR,
    }
}

/// Fondo pálido derivado de un color hex. El negro da un gris claro.
pub fn pale_background(hex: &str) -> String {
    let digits = hex.trim_start_matches('#');
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        _ => digits.to_string(),
    };

    if expanded.eq_ignore_ascii_case("000000") {
        return "#f0f0f0".to_string();
    }

    let channel = |range: std::ops::Range<usize>| {
        expanded
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
    };

    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) if expanded.len() == 6 => format!("rgba({},{},{},0.12)", r, g, b),
        _ => "#f0f0f0".to_string(),
    }
}

/// Badge de estado de una voie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub icon: &'static str,
    pub label: &'static str,
}

pub fn status_badge(status: TypeDeVoie) -> StatusBadge {
    match status {
        TypeDeVoie::Ouverte => StatusBadge { icon: "🟢", label: "Ouverte" },
        TypeDeVoie::Fermee => StatusBadge { icon: "🔴", label: "Fermée" },
        TypeDeVoie::Maintenance => StatusBadge { icon: "🟡", label: "En maintenance" },
    }
}

/// Voie con sus campos derivados, solo de salida
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoieView {
    #[serde(flatten)]
    pub voie: Voie,
    pub display_name: String,
    pub grade_color: &'static str,
    pub grade_background: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<StatusBadge>,
}

impl From<Voie> for VoieView {
    fn from(voie: Voie) -> Self {
        let color = grade_color(voie.cotation.as_deref());
        Self {
            display_name: voie.display_name(),
            grade_color: color,
            grade_background: pale_background(color),
            badge: voie.status().map(status_badge),
            voie,
        }
    }
}

/// Mensaje mostrado cuando el filtro no deja ninguna voie
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub message: &'static str,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: EMPTY_STATE_TITLE,
            message: EMPTY_STATE_MESSAGE,
        }
    }
}

/// Respuesta del catálogo de una salle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    pub salle_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salle_nom: Option<String>,
    /// Voies de la salle antes de filtrar
    pub total: usize,
    /// Voies mostradas
    pub count: usize,
    /// Ouvreurs presentes en la lista completa, para el selector
    pub ouvreurs: Vec<String>,
    pub voies: Vec<VoieView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
}

/// Ouvreurs distintos en orden de primera aparición
pub fn distinct_ouvreurs(voies: &[Voie]) -> Vec<String> {
    let mut ouvreurs: Vec<String> = Vec::new();
    for ouvreur in voies.iter().filter_map(Voie::ouvreur) {
        if !ouvreurs.iter().any(|o| o == ouvreur) {
            ouvreurs.push(ouvreur.to_string());
        }
    }
    ouvreurs
}
