//! Servicio de compra de la licencia

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::clients::PaymentApi;
use crate::config::payment::{price_in_cents, product_info, CURRENCY_CODE, SUCCESS_MESSAGE};
use crate::models::payment::{PaymentIntentRequest, ProductInfo, PurchaseConfirmation, PurchaseForm};
use crate::utils::errors::AppResult;

pub struct PaymentService {
    payment: Arc<dyn PaymentApi>,
}

impl PaymentService {
    pub fn new(payment: Arc<dyn PaymentApi>) -> Self {
        Self { payment }
    }

    pub fn product() -> ProductInfo {
        product_info()
    }

    /// Valida el formulario y pide un payment intent. Solo el email sale del gateway.
    pub async fn purchase(&self, form: PurchaseForm) -> AppResult<PurchaseConfirmation> {
        form.validate()?;

        let request = PaymentIntentRequest {
            amount: price_in_cents(),
            currency: CURRENCY_CODE.to_string(),
            email: form.email.trim().to_string(),
        };
        let intent = self.payment.create_payment_intent(&request).await?;
        info!("💳 Payment intent creado para {} ({:?})", request.email, form.payment_method);

        Ok(PurchaseConfirmation {
            message: SUCCESS_MESSAGE.to_string(),
            amount: request.amount,
            currency: request.currency,
            payment_method: form.payment_method,
            intent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payment::PaymentMethod;
    use crate::services::testing::FakePayment;
    use crate::utils::errors::AppError;
    use serde_json::json;

    fn form(body: serde_json::Value) -> PurchaseForm {
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn test_card_purchase() {
        let payment = Arc::new(FakePayment::default());
        let service = PaymentService::new(payment.clone());

        let confirmation = service
            .purchase(form(json!({
                "email": "marie@example.com",
                "firstName": "Marie",
                "lastName": "Curie",
                "paymentMethod": "card",
                "cardNumber": "4242 4242 4242 4242",
                "expiry": "12/30",
                "cvv": "123"
            })))
            .await
            .unwrap();

        assert_eq!(confirmation.amount, 8900);
        assert_eq!(confirmation.payment_method, PaymentMethod::Card);
        let requests = payment.requests.lock().unwrap();
        assert_eq!(requests[0].currency, "eur");
        assert_eq!(requests[0].email, "marie@example.com");
    }

    #[tokio::test]
    async fn test_invalid_card_not_forwarded() {
        let payment = Arc::new(FakePayment::default());
        let service = PaymentService::new(payment.clone());

        let err = service
            .purchase(form(json!({
                "email": "marie@example.com",
                "firstName": "Marie",
                "lastName": "Curie",
                "paymentMethod": "card",
                "cardNumber": "4242",
                "expiry": "12/30",
                "cvv": "123"
            })))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(payment.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_paypal_skips_card_fields() {
        let service = PaymentService::new(Arc::new(FakePayment::default()));
        let confirmation = service
            .purchase(form(json!({
                "email": "marie@example.com",
                "firstName": "Marie",
                "lastName": "Curie",
                "paymentMethod": "paypal"
            })))
            .await
            .unwrap();
        assert_eq!(confirmation.payment_method, PaymentMethod::Paypal);
    }
}
