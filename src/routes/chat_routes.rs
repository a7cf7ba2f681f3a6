use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::dto::ApiResponse;
use crate::middleware::require_session;
use crate::models::chat::{ChatMessage, ChatReply, ChatRequest};
use crate::services::ChatService;
use crate::session::UserSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_chat_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(send_message))
        .route("/api/chat/history/:conversation_uid", get(history))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

fn service(state: &AppState) -> ChatService {
    ChatService::new(state.bdd.clone(), state.ai.clone())
}

async fn send_message(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatReply>>, AppError> {
    let reply = service(&state).send(session.user.id, request).await?;
    Ok(Json(ApiResponse::success(reply)))
}

async fn history(
    State(state): State<AppState>,
    Path(conversation_uid): Path<String>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, AppError> {
    let messages = service(&state).history(&conversation_uid).await?;
    Ok(Json(ApiResponse::success(messages)))
}
