use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use crate::dto::{ApiResponse, CallbackQuery};
use crate::middleware::require_session;
use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use crate::services::AuthService;
use crate::session::UserSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de autenticación
pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let private = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/google", get(google))
        .route("/auth/callback", get(callback))
        .merge(private)
}

fn service(state: &AppState) -> AuthService {
    AuthService::new(state.auth.clone(), state.sessions.clone(), state.config.jwt_secret.clone())
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let response = service(&state).login(request).await?;
    Ok(Json(ApiResponse::success_with_message(response, "Connexion réussie")))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Value>>), AppError> {
    let user = service(&state).register(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(user, "Inscription réussie")),
    ))
}

async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let response = service(&state).callback(query).await?;
    Ok(Json(ApiResponse::success_with_message(response, "Connexion réussie")))
}

async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    service(&state).logout(&session).await?;
    Ok(Json(ApiResponse::message("Déconnexion réussie")))
}

async fn me(Extension(session): Extension<UserSession>) -> Json<ApiResponse<UserInfo>> {
    Json(ApiResponse::success(session.user))
}

async fn google(State(state): State<AppState>) -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(json!({ "url": state.config.google_auth_url })))
}
