//! Modelos de pago
//!
//! Los datos de tarjeta solo se validan en el gateway: nunca se reenvían
//! al servicio de pago ni aparecen en los logs.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::{validate_card_number, validate_cvv, validate_email, validate_expiry, validate_not_empty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Paypal,
}

/// Formulario de compra
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_card_fields", skip_on_field_errors = false))]
pub struct PurchaseForm {
    #[validate(custom(function = "validate_email", message = "Email invalide"))]
    pub email: String,
    #[validate(custom(function = "validate_not_empty", message = "Le prénom est requis"))]
    pub first_name: String,
    #[validate(custom(function = "validate_not_empty", message = "Le nom est requis"))]
    pub last_name: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(default)]
    pub cvv: Option<String>,
}

impl fmt::Debug for PurchaseForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PurchaseForm")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("payment_method", &self.payment_method)
            .finish_non_exhaustive()
    }
}

/// Con tarjeta, número, expiración y CVV son obligatorios
fn validate_card_fields(form: &PurchaseForm) -> Result<(), ValidationError> {
    if form.payment_method != PaymentMethod::Card {
        return Ok(());
    }

    let with_message = |mut error: ValidationError, message: &'static str| {
        error.message = Some(message.into());
        error
    };

    validate_card_number(form.card_number.as_deref().unwrap_or_default())
        .map_err(|e| with_message(e, "Numéro de carte invalide"))?;
    validate_expiry(form.expiry.as_deref().unwrap_or_default())
        .map_err(|e| with_message(e, "Date d'expiration invalide"))?;
    validate_cvv(form.cvv.as_deref().unwrap_or_default())
        .map_err(|e| with_message(e, "CVV invalide"))?;

    Ok(())
}

/// Cuerpo de `POST /create-payment-intent`
#[derive(Debug, Clone, Serialize)]
pub struct PaymentIntentRequest {
    /// Importe en céntimos
    pub amount: u64,
    pub currency: String,
    pub email: String,
}

/// Respuesta del servicio de pago
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentIntent {
    #[serde(default, alias = "clientSecret", skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default, alias = "paymentIntentId", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Respuesta de `POST /api/payment`
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseConfirmation {
    pub message: String,
    pub amount: u64,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub intent: PaymentIntent,
}

/// Producto ofrecido en la página de pago
#[derive(Debug, Clone, Serialize)]
pub struct ProductInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub price: u32,
    pub currency: &'static str,
    pub guarantee_days: u32,
    pub features: Vec<&'static str>,
}
