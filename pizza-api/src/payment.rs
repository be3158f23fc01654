use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use pizza_core::Order;
use pizza_order::{ConfirmationOutcome, PaymentSession, PaymentVerification};

use crate::error::AppError;
use crate::orders::{CheckoutRequest, PaidOrderRequest};
use crate::response::{ApiResponse, ValidatedJson, ValidatedPath};
use crate::state::AppState;
use crate::webhooks;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payment/init", post(initialize_payment))
        .route("/payment/verify/{reference}", get(verify_payment))
        .route("/payment/create-order", post(create_order))
        .route("/payment/confirm", post(confirm_payment))
        .route("/payment/webhook", post(webhooks::handle_paystack_webhook))
}

/// POST /payment/init
async fn initialize_payment(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CheckoutRequest>,
) -> Result<ApiResponse<PaymentSession>, AppError> {
    let session = state.coordinator.initialize_payment(req.into()).await?;
    Ok(ApiResponse::ok("Payment initialized successfully", session))
}

/// GET /payment/verify/{reference}
async fn verify_payment(
    State(state): State<AppState>,
    ValidatedPath(reference): ValidatedPath<String>,
) -> Result<ApiResponse<PaymentVerification>, AppError> {
    let verification = state.coordinator.verify_payment(&reference).await?;
    Ok(ApiResponse::ok("Payment verification completed", verification))
}

/// POST /payment/create-order
async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PaidOrderRequest>,
) -> Result<ApiResponse<Order>, AppError> {
    let order = state.coordinator.create_order(req.into()).await?;
    Ok(ApiResponse::created("Order created successfully", order))
}

/// POST /payment/confirm
///
/// Verifies with the gateway first; a failed payment is reported without creating an order.
async fn confirm_payment(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PaidOrderRequest>,
) -> Result<Response, AppError> {
    let response = match state.coordinator.confirm_payment(req.into()).await? {
        ConfirmationOutcome::Created(order) => {
            ApiResponse::created("Order created successfully", order).into_response()
        }
        ConfirmationOutcome::PaymentFailed(verification) => {
            ApiResponse::ok("Payment was not successful; order not created", verification).into_response()
        }
    };
    Ok(response)
}
