//! Motor de catálogo de voies
//!
//! Pipeline puro y síncrono: voies + criterios → subconjunto mostrado en un
//! orden determinista. Nunca modifica la lista recibida.

pub mod filter;
pub mod grade;
pub mod presentation;
pub mod sort;

pub use filter::{FilterCriteria, GradeFilter, GRADE_BRACKETS, TOUS_LES_TYPES, TOUTES_LES_COTATIONS};
pub use grade::{compare_grades, grade_rank, Cotation, MalformedGradeToken};
pub use presentation::{CatalogView, EmptyState, StatusBadge, VoieView};
pub use sort::{SortDirection, SortKey};

use crate::models::voie::Voie;

/// Filtra y después ordena una copia de `voies`
pub fn apply(voies: &[Voie], criteria: &FilterCriteria) -> Vec<Voie> {
    let filtered = filter::filter(voies, criteria);
    sort::sort(&filtered, criteria.tri, criteria.ordre)
}

/// Vista completa del catálogo de una salle
pub fn build_view(
    salle_id: i64,
    salle_nom: Option<String>,
    voies: &[Voie],
    criteria: &FilterCriteria,
) -> CatalogView {
    let shown = apply(voies, criteria);
    let empty_state = shown.is_empty().then(EmptyState::default);

    CatalogView {
        salle_id,
        salle_nom,
        total: voies.len(),
        count: shown.len(),
        ouvreurs: presentation::distinct_ouvreurs(voies),
        voies: shown.into_iter().map(VoieView::from).collect(),
        empty_state,
    }
}
