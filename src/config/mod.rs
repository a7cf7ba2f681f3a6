//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y la configuración del
//! producto de pago.

pub mod environment;
pub mod payment;

pub use environment::*;
