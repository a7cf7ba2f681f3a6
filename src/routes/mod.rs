pub mod auth_routes;
pub mod chat_routes;
pub mod health_routes;
pub mod payment_routes;
pub mod profile_routes;
pub mod salle_routes;
pub mod seance_routes;
