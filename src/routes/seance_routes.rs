use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::dto::ApiResponse;
use crate::middleware::require_session;
use crate::models::seance::{CreateSeanceRequest, Seance, SeanceCreated};
use crate::services::SeanceService;
use crate::session::UserSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_seance_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/salles/:id/seances", post(create_seance))
        .route("/api/seances", get(list_seances))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

async fn create_seance(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(salle_id): Path<i64>,
    Json(request): Json<CreateSeanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SeanceCreated>>), AppError> {
    let created = SeanceService::new(state.bdd.clone())
        .create(session.user.id, salle_id, request)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(created, "Séance enregistrée")),
    ))
}

async fn list_seances(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<ApiResponse<Vec<Seance>>>, AppError> {
    let seances = SeanceService::new(state.bdd.clone()).list(session.user.id).await?;
    Ok(Json(ApiResponse::success(seances)))
}
