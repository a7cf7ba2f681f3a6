//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y decodificación de JWT.

pub mod errors;
pub mod jwt;
pub mod validation;
