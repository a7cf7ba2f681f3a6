//! Cliente del servicio de pago

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use super::{read_payload, PaymentApi};
use crate::models::payment::{PaymentIntent, PaymentIntentRequest};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct PaymentClient {
    client: Client,
    base_url: String,
}

impl PaymentClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PaymentApi for PaymentClient {
    async fn create_payment_intent(&self, request: &PaymentIntentRequest) -> AppResult<PaymentIntent> {
        info!("💳 Payment intent de {} {}", request.amount, request.currency);
        let response = self
            .client
            .post(format!("{}/create-payment-intent", self.base_url))
            .json(request)
            .send()
            .await?;
        read_payload(response, "/create-payment-intent").await
    }
}
