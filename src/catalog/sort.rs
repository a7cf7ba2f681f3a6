//! Orden de voies
//!
//! Orden estable por nombre, cotation, difficulté o identificador. La
//! dirección invierte el resultado del comparador, no la lista final, así
//! que los empates conservan el orden original en ambos sentidos.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::grade::Cotation;
use crate::models::voie::Voie;

/// Clave de orden
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Nom,
    Cotation,
    /// Mismo orden que `Cotation`, separado solo para la UI
    Difficulte,
    /// El id hace de proxy de la fecha de creación
    Date,
}

impl SortKey {
    /// Acepta la clave (`nom`) o la etiqueta de la UI (`Par nom`)
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = fold_accents(raw.trim());
        let key = normalized.strip_prefix("par ").unwrap_or(&normalized);
        match key {
            "nom" | "name" => Some(SortKey::Nom),
            "cotation" | "grade" => Some(SortKey::Cotation),
            "difficulte" => Some(SortKey::Difficulte),
            "date" | "id" => Some(SortKey::Date),
            _ => None,
        }
    }
}

/// Dirección del orden
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Croissant,
    Decroissant,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match fold_accents(raw.trim()).as_str() {
            "asc" | "croissant" => Some(SortDirection::Croissant),
            "desc" | "decroissant" => Some(SortDirection::Decroissant),
            _ => None,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Croissant => ordering,
            SortDirection::Decroissant => ordering.reverse(),
        }
    }
}

/// Minúsculas sin acentos franceses, para comparar nombres
fn fold_accents(value: &str) -> String {
    let mut folded = String::with_capacity(value.len());
    for c in value.chars().flat_map(char::to_lowercase) {
        match c {
            'à' | 'â' | 'ä' | 'á' => folded.push('a'),
            'é' | 'è' | 'ê' | 'ë' => folded.push('e'),
            'î' | 'ï' | 'í' => folded.push('i'),
            'ô' | 'ö' | 'ó' => folded.push('o'),
            'ù' | 'û' | 'ü' | 'ú' => folded.push('u'),
            'ç' => folded.push('c'),
            'ÿ' => folded.push('y'),
            'œ' => folded.push_str("oe"),
            'æ' => folded.push_str("ae"),
            other => folded.push(other),
        }
    }
    folded
}

/// Comparación de nombres mostrados: primero sin mayúsculas ni acentos,
/// después el texto tal cual para desempatar
fn compare_names(a: &Voie, b: &Voie) -> Ordering {
    let (a, b) = (a.display_name(), b.display_name());
    fold_accents(&a)
        .cmp(&fold_accents(&b))
        .then_with(|| a.cmp(&b))
}

/// Copia ordenada de `voies`
pub fn sort(voies: &[Voie], key: SortKey, direction: SortDirection) -> Vec<Voie> {
    let mut sorted = voies.to_vec();
    match key {
        SortKey::Nom => sorted.sort_by(|a, b| direction.apply(compare_names(a, b))),
        SortKey::Date => sorted.sort_by(|a, b| direction.apply(a.id.cmp(&b.id))),
        SortKey::Cotation | SortKey::Difficulte => return sort_by_grade(voies, direction),
    }
    sorted
}

/// Las voies sin cotation válida no se comparan con nadie: se quedan en su
/// posición y las demás se ordenan en los huecos restantes. Así el
/// comparador sigue siendo un orden total.
fn sort_by_grade(voies: &[Voie], direction: SortDirection) -> Vec<Voie> {
    let mut graded: Vec<(Cotation, &Voie)> = voies
        .iter()
        .filter_map(|voie| voie.grade().map(|cotation| (cotation, voie)))
        .collect();
    graded.sort_by(|(a, _), (b, _)| direction.apply(a.cmp(b)));

    let mut graded = graded.into_iter().map(|(_, voie)| voie);
    voies
        .iter()
        .map(|voie| match voie.grade() {
            Some(_) => graded.next().unwrap_or(voie).clone(),
            None => voie.clone(),
        })
        .collect()
}
