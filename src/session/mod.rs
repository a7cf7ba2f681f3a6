//! Sesiones de usuario
//!
//! Almacén explícito de sesiones, inyectado en `AppState`. Se crea una
//! sesión al hacer login o en el callback OAuth y se borra al hacer logout;
//! las sesiones caducadas se rechazan y se purgan.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::user::UserInfo;

/// Sesión de un usuario autenticado
#[derive(Debug, Clone, Serialize)]
pub struct UserSession {
    #[serde(skip_serializing)]
    pub token: String,
    pub user: UserInfo,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl UserSession {
    pub fn new(token: String, user: UserInfo, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token,
            user,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Almacén de sesiones indexado por token
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, UserSession>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::hours(ttl_hours.max(1)),
        }
    }

    /// Guardar una sesión nueva; reemplaza la anterior del mismo token
    pub async fn create(&self, token: String, user: UserInfo) -> UserSession {
        let session = UserSession::new(token.clone(), user, self.ttl);
        info!("💾 Sesión creada para el usuario {} ({})", session.user.id, session.user.username);

        self.sessions.write().await.insert(token, session.clone());
        session
    }

    /// Sesión válida para un token. Una sesión caducada se elimina.
    pub async fn get(&self, token: &str) -> Option<UserSession> {
        let session = self.sessions.read().await.get(token).cloned()?;

        if session.is_expired() {
            debug!("⏰ Sesión caducada para el usuario {}", session.user.id);
            self.sessions.write().await.remove(token);
            return None;
        }

        Some(session)
    }

    /// Borrar la sesión de un token
    pub async fn remove(&self, token: &str) -> Option<UserSession> {
        let removed = self.sessions.write().await.remove(token);
        if let Some(session) = &removed {
            info!("👋 Sesión cerrada para el usuario {}", session.user.id);
        }
        removed
    }

    /// Limpiar sesiones expiradas; devuelve cuántas se borraron
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    #[cfg(test)]
    async fn insert_raw(&self, session: UserSession) {
        self.sessions.write().await.insert(session.token.clone(), session);
    }
}
