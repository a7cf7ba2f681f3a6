//! Servicio de catálogo
//!
//! Salles, voies y la vista filtrada que produce el motor de catálogo.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::catalog::{self, CatalogView, FilterCriteria, GRADE_BRACKETS};
use crate::clients::BddApi;
use crate::models::salle::{SalleDetail, SalleResponse};
use crate::models::voie::{CreateVoieRequest, NewVoie, UpdateVoieRequest, Voie};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::validate_positive;

pub struct CatalogService {
    bdd: Arc<dyn BddApi>,
}

impl CatalogService {
    pub fn new(bdd: Arc<dyn BddApi>) -> Self {
        Self { bdd }
    }

    /// Lista de salles, filtrada por `q` si viene
    pub async fn search_salles(&self, q: Option<&str>) -> AppResult<Vec<SalleResponse>> {
        let salles = self.bdd.list_salles().await?;
        let term = q.unwrap_or_default();

        Ok(salles
            .into_iter()
            .filter(|salle| salle.matches_search(term))
            .map(SalleResponse::from)
            .collect())
    }

    pub async fn salle_detail(&self, id: i64) -> AppResult<SalleDetail> {
        let (salle, voies) = futures::try_join!(self.bdd.get_salle(id), self.bdd.list_voies(id))?;
        Ok(SalleDetail {
            salle: SalleResponse::from(salle),
            voies,
        })
    }

    /// Vista de catálogo de una salle con los criterios de la request
    pub async fn catalog(&self, salle_id: i64, criteria: &FilterCriteria) -> AppResult<CatalogView> {
        let (salle, voies) =
            futures::try_join!(self.bdd.get_salle(salle_id), self.bdd.list_voies(salle_id))?;

        let view = catalog::build_view(salle_id, Some(salle.nom), &voies, criteria);
        info!(
            "🧗 Catálogo de la salle {}: {}/{} voies (filtros activos: {})",
            salle_id,
            view.count,
            view.total,
            criteria.is_active()
        );
        Ok(view)
    }

    /// Presets de cotation del selector
    pub fn cotations() -> Vec<&'static str> {
        GRADE_BRACKETS.to_vec()
    }

    pub async fn create_voie(&self, salle_id: i64, request: CreateVoieRequest) -> AppResult<Voie> {
        request.validate()?;
        check_hauteur(request.hauteur)?;

        self.bdd
            .create_voie(&NewVoie {
                salle_id,
                voie: request,
            })
            .await
    }

    pub async fn update_voie(&self, id: i64, request: UpdateVoieRequest) -> AppResult<Voie> {
        request.validate()?;
        check_hauteur(request.hauteur)?;

        self.bdd.update_voie(id, &request).await
    }

    pub async fn delete_voie(&self, id: i64) -> AppResult<()> {
        self.bdd.delete_voie(id).await
    }
}

fn check_hauteur(hauteur: Option<f64>) -> AppResult<()> {
    match hauteur {
        Some(h) if validate_positive(h).is_err() => {
            Err(validation_error("hauteur", "La hauteur doit être positive"))
        }
        _ => Ok(()),
    }
}
