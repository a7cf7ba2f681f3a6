//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y las URLs de los
//! microservicios. Todas las claves tienen un valor por defecto para
//! desarrollo local; un valor presente pero inválido es un error.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

/// Error al leer la configuración
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Valor inválido para {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub http_timeout_secs: u64,
    // URLs de los microservicios
    pub bdd_service_url: String,
    pub auth_service_url: String,
    pub ai_service_url: String,
    pub payment_service_url: String,
    pub google_auth_url: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "climbhelp-dev-secret".to_string(),
            session_ttl_hours: 24,
            cors_origins: Vec::new(),
            rate_limit_requests: 100,
            rate_limit_window: 60,
            http_timeout_secs: 30,
            bdd_service_url: "http://localhost:3003".to_string(),
            auth_service_url: "http://localhost:3003".to_string(),
            ai_service_url: "http://localhost:3001".to_string(),
            payment_service_url: "http://localhost:3004".to_string(),
            google_auth_url: "http://localhost:3003/auth/google".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde el entorno (después de `dotenvy`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            environment: load_string("ENVIRONMENT", defaults.environment),
            port: try_load("PORT", defaults.port)?,
            host: load_string("HOST", defaults.host),
            jwt_secret: load_secret("JWT_SECRET", defaults.jwt_secret),
            session_ttl_hours: try_load("SESSION_TTL_HOURS", defaults.session_ttl_hours)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            rate_limit_requests: try_load("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests)?,
            rate_limit_window: try_load("RATE_LIMIT_WINDOW", defaults.rate_limit_window)?,
            http_timeout_secs: try_load("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            bdd_service_url: load_url("BDD_SERVICE_URL", defaults.bdd_service_url),
            auth_service_url: load_url("AUTH_SERVICE_URL", defaults.auth_service_url),
            ai_service_url: load_url("AI_SERVICE_URL", defaults.ai_service_url),
            payment_service_url: load_url("PAYMENT_SERVICE_URL", defaults.payment_service_url),
            google_auth_url: load_string("GOOGLE_AUTH_URL", defaults.google_auth_url),
        })
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn load_string(key: &'static str, default: String) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => {
            debug!("{} no definido, usando valor por defecto: {}", key, default);
            default
        }
    }
}

fn load_secret(key: &'static str, default: String) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            warn!("⚠️ {} no definido, usando el secreto de desarrollo", key);
            default
        }
    }
}

/// URL sin la barra final, para poder concatenar rutas
fn load_url(key: &'static str, default: String) -> String {
    load_string(key, default).trim_end_matches('/').to_string()
}

fn try_load<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                key,
                value,
                reason: e.to_string(),
            })
        }
        _ => {
            debug!("{} no definido, usando valor por defecto: {}", key, default);
            Ok(default)
        }
    }
}
