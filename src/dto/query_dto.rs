//! DTOs de query string

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::catalog::{FilterCriteria, GradeFilter, SortDirection, SortKey, TOUS_LES_TYPES};
use crate::models::voie::TypeDeVoie;
use crate::utils::errors::AppError;

/// `GET /api/salles?q=`
#[derive(Debug, Default, Deserialize)]
pub struct SalleSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// `GET /api/salles/:id/voies?cotation=&tri=&ordre=&type=&ouvreurs=`
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub cotation: Option<String>,
    #[serde(default)]
    pub tri: Option<String>,
    #[serde(default)]
    pub ordre: Option<String>,
    #[serde(default, rename = "type")]
    pub type_de_voie: Option<String>,
    /// Lista separada por comas
    #[serde(default)]
    pub ouvreurs: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl TryFrom<CatalogQuery> for FilterCriteria {
    type Error = AppError;

    fn try_from(query: CatalogQuery) -> Result<Self, Self::Error> {
        let cotation = match non_empty(&query.cotation) {
            Some(raw) => GradeFilter::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))?,
            None => None,
        };

        let tri = match non_empty(&query.tri) {
            Some(raw) => SortKey::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Tri inconnu: '{}'", raw)))?,
            None => SortKey::default(),
        };

        let ordre = match non_empty(&query.ordre) {
            Some(raw) => SortDirection::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Ordre inconnu: '{}'", raw)))?,
            None => SortDirection::default(),
        };

        let type_de_voie = match non_empty(&query.type_de_voie) {
            Some(raw) if raw.eq_ignore_ascii_case(TOUS_LES_TYPES) => None,
            Some(raw) => Some(
                TypeDeVoie::parse(raw)
                    .ok_or_else(|| AppError::BadRequest(format!("Type de voie inconnu: '{}'", raw)))?,
            ),
            None => None,
        };

        let ouvreurs: BTreeSet<String> = non_empty(&query.ouvreurs)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(FilterCriteria {
            cotation,
            ouvreurs,
            type_de_voie,
            tri,
            ordre,
        })
    }
}

/// `GET /auth/callback?token=&error=`
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
