use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::dto::ApiResponse;
use crate::models::payment::{ProductInfo, PurchaseConfirmation, PurchaseForm};
use crate::services::PaymentService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router() -> Router<AppState> {
    Router::new()
        .route("/api/payment/product", get(product))
        .route("/api/payment", post(purchase))
}

async fn product() -> Json<ApiResponse<ProductInfo>> {
    Json(ApiResponse::success(PaymentService::product()))
}

async fn purchase(
    State(state): State<AppState>,
    Json(form): Json<PurchaseForm>,
) -> Result<Json<ApiResponse<PurchaseConfirmation>>, AppError> {
    let confirmation = PaymentService::new(state.payment.clone()).purchase(form).await?;
    let message = confirmation.message.clone();
    Ok(Json(ApiResponse::success_with_message(confirmation, message)))
}
