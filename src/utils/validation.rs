//! Utilidades de validación
//!
//! Funciones helper usadas por los `#[validate(custom = ...)]` de los
//! modelos y por los servicios antes de reenviar datos a los microservicios.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use validator::ValidationError;

use crate::catalog::grade::Cotation;
use crate::models::voie::TypeDeVoie;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("regex de email inválida");
    static ref HEX_COLOR_RE: Regex =
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("regex de color inválida");
    static ref EXPIRY_RE: Regex = Regex::new(r"^(\d{2})/(\d{2})$").expect("regex de expiración inválida");
}

fn error_with_value(code: &'static str, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.add_param("value".into(), &value.to_string());
    error
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = error_with_value("date", value);
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Adaptador de `validate_date` para `#[validate(custom)]`
pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    validate_date(value).map(|_| ())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with_value("not_empty", value));
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(error_with_value("email", value));
    }
    Ok(())
}

/// Validar formato de coordenadas GPS
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }

    if !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }

    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar un token de cotation (`6b+`)
pub fn validate_cotation(value: &str) -> Result<(), ValidationError> {
    if Cotation::parse(value).is_none() {
        let mut error = error_with_value("cotation", value);
        error.add_param("format".into(), &"<chiffre><a|b|c>[+]".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar un `type_de_voie` conocido
pub fn validate_type_de_voie(value: &str) -> Result<(), ValidationError> {
    if TypeDeVoie::parse(value).is_none() {
        let mut error = error_with_value("type_de_voie", value);
        error.add_param("allowed_values".into(), &"ouverte, fermee, maintenance".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar color hexadecimal (`#48bb78`)
pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if !HEX_COLOR_RE.is_match(value) {
        return Err(error_with_value("hex_color", value));
    }
    Ok(())
}

/// Número de tarjeta: al menos 16 cifras, espacios ignorados
pub fn validate_card_number(value: &str) -> Result<(), ValidationError> {
    let cleaned: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.len() < 16 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        // El número no se copia en el error
        return Err(ValidationError::new("card_number"));
    }
    Ok(())
}

/// Fecha de expiración `MM/AA`
pub fn validate_expiry(value: &str) -> Result<(), ValidationError> {
    let month = EXPIRY_RE
        .captures(value.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok());

    match month {
        Some(1..=12) => Ok(()),
        _ => Err(error_with_value("expiry", value)),
    }
}

/// CVV: 3 o 4 cifras
pub fn validate_cvv(value: &str) -> Result<(), ValidationError> {
    let len = value.len();
    if !(3..=4).contains(&len) || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("cvv"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date("2024/01/15").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("grimpeur@example.com").is_ok());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("test@").is_err());
        assert!(validate_email("a b@c.fr").is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(45.18, 5.72).is_ok());
        assert!(validate_coordinates(91.0, 5.72).is_err());
        assert!(validate_coordinates(45.0, -181.0).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(12.5).is_ok());
        assert!(validate_positive(0.0).is_err());
        assert!(validate_positive(-3).is_err());
    }

    #[test]
    fn test_validate_cotation() {
        assert!(validate_cotation("6b+").is_ok());
        assert!(validate_cotation("8C").is_ok());
        assert!(validate_cotation("6d").is_err());
        assert!(validate_cotation("").is_err());
    }

    #[test]
    fn test_validate_type_de_voie() {
        assert!(validate_type_de_voie("maintenance").is_ok());
        assert!(validate_type_de_voie("verticale").is_err());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#48bb78").is_ok());
        assert!(validate_hex_color("#fff").is_ok());
        assert!(validate_hex_color("48bb78").is_err());
    }

    #[test]
    fn test_card_fields() {
        assert!(validate_card_number("4242 4242 4242 4242").is_ok());
        assert!(validate_card_number("4242 4242").is_err());
        assert!(validate_card_number("4242 4242 4242 424x").is_err());
        assert!(validate_expiry("09/27").is_ok());
        assert!(validate_expiry("13/27").is_err());
        assert!(validate_expiry("0927").is_err());
        assert!(validate_cvv("123").is_ok());
        assert!(validate_cvv("12").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Marie").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }
}
