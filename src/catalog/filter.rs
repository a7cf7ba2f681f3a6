//! Filtro de voies
//!
//! Aplica los predicados activos (cotation, ouvreurs, type de voie) como una
//! conjunción. Una voie a la que le falta el campo inspeccionado por un
//! predicado activo nunca lo satisface.

use std::collections::BTreeSet;

use crate::catalog::grade::{Cotation, MalformedGradeToken};
use crate::catalog::sort::{SortDirection, SortKey};
use crate::models::voie::{TypeDeVoie, Voie};

/// Valor del selector que desactiva el filtro de cotation
pub const TOUTES_LES_COTATIONS: &str = "Toutes les cotations";

/// Valor del selector que desactiva el filtro de type de voie
pub const TOUS_LES_TYPES: &str = "Tous";

/// Presets de cotation que ofrece la UI
pub const GRADE_BRACKETS: [&str; 5] = ["3a - 4c", "5a - 5c", "6a - 6c", "7a - 7c", "8a+"];

/// Filtro de cotation: una cotation exacta o un rango inclusivo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeFilter {
    Exact(Cotation),
    Bracket { min: Cotation, max: Cotation },
}

impl GradeFilter {
    /// Parsea `"5a - 6c"` (rango) o `"8a+"` (exacta).
    ///
    /// Vacío o `"Toutes les cotations"` devuelve `Ok(None)`: filtro inactivo.
    pub fn parse(raw: &str) -> Result<Option<Self>, MalformedGradeToken> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(TOUTES_LES_COTATIONS) {
            return Ok(None);
        }

        match raw.split_once('-') {
            Some((min, max)) => {
                let min: Cotation = min.parse()?;
                let max: Cotation = max.parse()?;
                Ok(Some(Self::bracket(min, max)))
            }
            None => Ok(Some(GradeFilter::Exact(raw.parse()?))),
        }
    }

    /// Rango con los extremos ordenados
    pub fn bracket(a: Cotation, b: Cotation) -> Self {
        if a <= b {
            GradeFilter::Bracket { min: a, max: b }
        } else {
            GradeFilter::Bracket { min: b, max: a }
        }
    }

    /// Ambos extremos son inclusivos. Un extremo superior sin `+` admite
    /// también su variante `+` ("6a - 6c" incluye "6c+").
    pub fn matches(&self, cotation: &Cotation) -> bool {
        match self {
            GradeFilter::Exact(expected) => expected == cotation,
            GradeFilter::Bracket { min, max } => {
                let upper = max.with_plus();
                min <= cotation && cotation <= &upper
            }
        }
    }
}

/// Criterios de filtrado y orden de una vista de catálogo
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub cotation: Option<GradeFilter>,
    pub ouvreurs: BTreeSet<String>,
    pub type_de_voie: Option<TypeDeVoie>,
    pub tri: SortKey,
    pub ordre: SortDirection,
}

impl FilterCriteria {
    /// Algún predicado activo
    pub fn is_active(&self) -> bool {
        self.cotation.is_some() || !self.ouvreurs.is_empty() || self.type_de_voie.is_some()
    }

    /// La voie satisface todos los predicados activos
    pub fn matches(&self, voie: &Voie) -> bool {
        if let Some(grade_filter) = &self.cotation {
            match voie.grade() {
                Some(cotation) if grade_filter.matches(&cotation) => {}
                _ => return false,
            }
        }

        if !self.ouvreurs.is_empty() {
            match voie.ouvreur() {
                Some(ouvreur) if self.ouvreurs.contains(ouvreur) => {}
                _ => return false,
            }
        }

        if let Some(expected) = self.type_de_voie {
            if voie.status() != Some(expected) {
                return false;
            }
        }

        true
    }
}

/// Subsecuencia de `voies` que satisface los criterios, en el mismo orden
pub fn filter(voies: &[Voie], criteria: &FilterCriteria) -> Vec<Voie> {
    voies
        .iter()
        .filter(|voie| criteria.matches(voie))
        .cloned()
        .collect()
}
