use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use pizza_core::{Order, OrderDetails, PaidOrder};
use pizza_order::OrderPreview;

use crate::error::AppError;
use crate::response::{ApiResponse, ValidatedJson, ValidatedPath};
use crate::state::AppState;

/// Checkout form as submitted by the storefront
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CheckoutRequest {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub pizza_type: String,
    pub pizza_size: String,
    pub quantity: u32,
    pub delivery_address: String,
}

impl From<CheckoutRequest> for OrderDetails {
    fn from(req: CheckoutRequest) -> Self {
        OrderDetails {
            full_name: req.full_name,
            phone: req.phone,
            email: req.email,
            pizza_type: req.pizza_type,
            pizza_size: req.pizza_size,
            quantity: req.quantity,
            delivery_address: req.delivery_address,
        }
    }
}

/// Checkout form plus the outcome of the customer's payment
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PaidOrderRequest {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub pizza_type: String,
    pub pizza_size: String,
    pub quantity: u32,
    pub delivery_address: String,
    pub payment_reference: String,
    pub amount_paid: i64,
}

impl From<PaidOrderRequest> for PaidOrder {
    fn from(req: PaidOrderRequest) -> Self {
        PaidOrder {
            details: OrderDetails {
                full_name: req.full_name,
                phone: req.phone,
                email: req.email,
                pizza_type: req.pizza_type,
                pizza_size: req.pizza_size,
                quantity: req.quantity,
                delivery_address: req.delivery_address,
            },
            payment_reference: req.payment_reference,
            amount_paid: req.amount_paid,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders/preview", post(preview_order))
        .route("/orders/{reference}", get(get_order_by_reference))
}

/// POST /orders/preview
async fn preview_order(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CheckoutRequest>,
) -> Result<ApiResponse<OrderPreview>, AppError> {
    let preview = state.coordinator.preview(req.into())?;
    Ok(ApiResponse::ok("Order preview generated successfully", preview))
}

/// GET /orders/{reference}
async fn get_order_by_reference(
    State(state): State<AppState>,
    ValidatedPath(reference): ValidatedPath<String>,
) -> Result<ApiResponse<Order>, AppError> {
    let order = state.coordinator.find_by_reference(&reference).await?;
    Ok(ApiResponse::ok("Order retrieved successfully", order))
}
