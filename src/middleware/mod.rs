//! Middleware del sistema
//!
//! Sesión, CORS, rate limiting y cabeceras de seguridad.

pub mod auth;
pub mod cors;
pub mod rate_limit;
pub mod security_headers;

pub use auth::require_session;
pub use cors::cors_layer;
pub use rate_limit::{rate_limit_middleware, RateLimitState};
