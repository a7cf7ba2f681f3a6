//! Services module
//!
//! Lógica de negocio del gateway. Cada servicio recibe los clientes que
//! necesita como `Arc<dyn Trait>` y se construye por request desde el
//! `AppState`.

pub mod auth_service;
pub mod catalog_service;
pub mod chat_service;
pub mod payment_service;
pub mod profile_service;
pub mod seance_service;

#[cfg(test)]
pub(crate) mod testing;

pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
pub use chat_service::ChatService;
pub use payment_service::PaymentService;
pub use profile_service::ProfileService;
pub use seance_service::SeanceService;
