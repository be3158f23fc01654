use axum::{
    extract::State,
    routing::{get, patch},
    Router,
};
use uuid::Uuid;
use pizza_core::Order;
use pizza_order::OrderStats;

use crate::error::AppError;
use crate::response::{ApiResponse, ValidatedPath};
use crate::state::AppState;

/// Dashboard routes; mounted behind the admin bearer middleware
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/orders", get(list_orders))
        .route("/admin/orders/{id}", get(get_order).delete(delete_order))
        .route("/admin/orders/{id}/deliver", patch(mark_delivered))
        .route("/admin/stats", get(order_stats))
}

/// GET /admin/orders
async fn list_orders(State(state): State<AppState>) -> Result<ApiResponse<Vec<Order>>, AppError> {
    let orders = state.admin.list_orders().await?;
    Ok(ApiResponse::ok("Orders retrieved successfully", orders))
}

/// GET /admin/orders/{id}
async fn get_order(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<ApiResponse<Order>, AppError> {
    let order = state.admin.get_order(id).await?;
    Ok(ApiResponse::ok("Order retrieved successfully", order))
}

/// PATCH /admin/orders/{id}/deliver
async fn mark_delivered(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<ApiResponse<Order>, AppError> {
    let order = state.admin.mark_delivered(id).await?;
    Ok(ApiResponse::ok("Order delivery status updated successfully", order))
}

/// DELETE /admin/orders/{id}
async fn delete_order(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<ApiResponse<Order>, AppError> {
    let order = state.admin.delete_order(id).await?;
    Ok(ApiResponse::ok("Order deleted successfully", order))
}

/// GET /admin/stats
async fn order_stats(State(state): State<AppState>) -> Result<ApiResponse<OrderStats>, AppError> {
    let stats = state.admin.stats().await?;
    Ok(ApiResponse::ok("Order statistics retrieved successfully", stats))
}
