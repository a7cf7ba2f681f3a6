//! Estado compartido de la aplicación
//!
//! Este módulo define el estado que se pasa a través del router de Axum:
//! configuración, sesiones, rate limiting y los clientes de los
//! microservicios.

use std::sync::Arc;

use tracing::info;

use crate::clients::{
    build_http_client, AiApi, AiClient, AuthApi, AuthClient, BddApi, BddClient, PaymentApi, PaymentClient,
};
use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;
use crate::session::SessionStore;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub sessions: SessionStore,
    pub rate_limit: RateLimitState,
    pub bdd: Arc<dyn BddApi>,
    pub auth: Arc<dyn AuthApi>,
    pub ai: Arc<dyn AiApi>,
    pub payment: Arc<dyn PaymentApi>,
}

impl AppState {
    /// Estado con los clientes reqwest apuntando a las URLs configuradas
    pub fn new(config: EnvironmentConfig) -> AppResult<Self> {
        let http_client = build_http_client(config.http_timeout())?;

        info!("🔗 Servicio BDD: {}", config.bdd_service_url);
        info!("🔗 Servicio de usuarios: {}", config.auth_service_url);
        info!("🔗 Servicio IA: {}", config.ai_service_url);
        info!("🔗 Servicio de pago: {}", config.payment_service_url);

        let bdd = Arc::new(BddClient::new(http_client.clone(), config.bdd_service_url.clone()));
        let auth = Arc::new(AuthClient::new(http_client.clone(), config.auth_service_url.clone()));
        let ai = Arc::new(AiClient::new(http_client.clone(), config.ai_service_url.clone()));
        let payment = Arc::new(PaymentClient::new(http_client, config.payment_service_url.clone()));

        Ok(Self::with_clients(config, bdd, auth, ai, payment))
    }

    /// Estado con clientes arbitrarios (fakes en los tests)
    pub fn with_clients(
        config: EnvironmentConfig,
        bdd: Arc<dyn BddApi>,
        auth: Arc<dyn AuthApi>,
        ai: Arc<dyn AiApi>,
        payment: Arc<dyn PaymentApi>,
    ) -> Self {
        Self {
            sessions: SessionStore::new(config.session_ttl_hours),
            rate_limit: RateLimitState::new(&config),
            config,
            bdd,
            auth,
            ai,
            payment,
        }
    }

    /// Limpiar sesiones expiradas
    pub async fn cleanup_expired_sessions(&self) -> usize {
        self.sessions.purge_expired().await
    }
}
