use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};

use crate::catalog::{CatalogView, FilterCriteria};
use crate::dto::{ApiResponse, CatalogQuery, SalleSearchQuery};
use crate::middleware::require_session;
use crate::models::salle::{SalleDetail, SalleResponse};
use crate::models::voie::{CreateVoieRequest, UpdateVoieRequest, Voie};
use crate::services::CatalogService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Salles, catálogo de voies y presets de cotation.
///
/// La lectura es pública; crear, modificar y borrar voies exige sesión.
pub fn create_salle_router(state: AppState) -> Router<AppState> {
    let session = middleware::from_fn_with_state(state, require_session);

    Router::new()
        .route("/api/salles", get(list_salles))
        .route("/api/salles/:id", get(get_salle))
        .route(
            "/api/salles/:id/voies",
            get(catalog).merge(post(create_voie).route_layer(session.clone())),
        )
        .route(
            "/api/voies/:id",
            put(update_voie).delete(delete_voie).route_layer(session),
        )
        .route("/api/cotations", get(cotations))
}

fn service(state: &AppState) -> CatalogService {
    CatalogService::new(state.bdd.clone())
}

async fn list_salles(
    State(state): State<AppState>,
    Query(query): Query<SalleSearchQuery>,
) -> Result<Json<ApiResponse<Vec<SalleResponse>>>, AppError> {
    let salles = service(&state).search_salles(query.q.as_deref()).await?;
    Ok(Json(ApiResponse::success(salles)))
}

async fn get_salle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<SalleDetail>>, AppError> {
    let detail = service(&state).salle_detail(id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

async fn catalog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<ApiResponse<CatalogView>>, AppError> {
    let criteria = FilterCriteria::try_from(query)?;
    let view = service(&state).catalog(id, &criteria).await?;
    Ok(Json(ApiResponse::success(view)))
}

async fn create_voie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateVoieRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Voie>>), AppError> {
    let voie = service(&state).create_voie(id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(voie, "Voie créée")),
    ))
}

async fn update_voie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateVoieRequest>,
) -> Result<Json<ApiResponse<Voie>>, AppError> {
    let voie = service(&state).update_voie(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(voie, "Voie modifiée")))
}

async fn delete_voie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    service(&state).delete_voie(id).await?;
    Ok(Json(ApiResponse::message("Voie supprimée")))
}

async fn cotations() -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::success(CatalogService::cotations()))
}
