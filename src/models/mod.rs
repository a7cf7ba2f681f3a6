//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que intercambia el gateway con
//! el cliente web y con los microservicios.

pub mod chat;
pub mod payment;
pub mod salle;
pub mod seance;
pub mod user;
pub mod voie;
