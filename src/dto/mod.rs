//! DTOs del gateway
//!
//! Envoltorios de respuesta y parámetros de query string.

pub mod api_response;
pub mod query_dto;

pub use api_response::{ApiResponse, BddEnvelope};
pub use query_dto::{CallbackQuery, CatalogQuery, SalleSearchQuery};
