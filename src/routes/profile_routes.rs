use axum::{extract::State, middleware, routing::get, Extension, Json, Router};

use crate::dto::ApiResponse;
use crate::middleware::require_session;
use crate::models::seance::ProfileResponse;
use crate::services::ProfileService;
use crate::session::UserSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_profile_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

async fn profile(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let profile = ProfileService::new(state.bdd.clone()).profile(session.user).await?;
    Ok(Json(ApiResponse::success(profile)))
}
