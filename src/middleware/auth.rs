//! Middleware de sesión
//!
//! Las rutas privadas exigen `Authorization: Bearer <token>` con una sesión
//! viva en el `SessionStore`. La sesión se inyecta en las extensions.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::extract_token_from_header;

/// Middleware que exige una sesión válida
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authentification requise".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let session = state
        .sessions
        .get(token)
        .await
        .ok_or_else(|| AppError::Unauthorized("Session expirée ou inconnue".to_string()))?;

    debug!("🔑 Request autenticada para el usuario {}", session.user.id);
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
