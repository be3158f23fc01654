use std::sync::Arc;
use pizza_core::repository::AdminRepository;
use pizza_order::{OrderAdmin, OrderCoordinator};

use crate::middleware::ResiliencyState;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<OrderCoordinator>,
    pub admin: Arc<OrderAdmin>,
    pub admins: Arc<dyn AdminRepository>,
    pub auth: AuthConfig,
    pub resiliency: Arc<ResiliencyState>,
}
