//! ClimbHelp gateway
//!
//! Backend web de ClimbHelp: catálogo de voies por salle con filtros y
//! orden, sesiones, séances, perfil, asistente de chat y compra. Los datos
//! viven en microservicios; este crate los agrega y los expone al cliente.

pub mod catalog;
pub mod clients;
pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod utils;

use axum::{middleware as axum_middleware, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{cors_layer, rate_limit_middleware, security_headers};
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes::create_health_router())
        .merge(routes::auth_routes::create_auth_router(state.clone()))
        .merge(routes::salle_routes::create_salle_router(state.clone()))
        .merge(routes::seance_routes::create_seance_router(state.clone()))
        .merge(routes::profile_routes::create_profile_router(state.clone()))
        .merge(routes::chat_routes::create_chat_router(state.clone()))
        .merge(routes::payment_routes::create_payment_router())
        .layer(axum_middleware::from_fn_with_state(state.clone(), rate_limit_middleware))
        .layer(security_headers::frame_options())
        .layer(security_headers::content_type_options())
        .layer(security_headers::referrer_policy())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
