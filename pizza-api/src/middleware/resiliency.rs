use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum::http::StatusCode;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::response::ErrorEnvelope;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircuitState {
    Closed,   // Normal operation
    Open,     // Failure detected, failing fast
    HalfOpen, // Testing if service is back
}

pub struct CircuitBreaker {
    pub name: String,
    pub state: RwLock<CircuitState>,
    pub failure_count: AtomicUsize,
    pub failure_threshold: usize,
    pub reset_timeout: Duration,
    pub last_failure: RwLock<Option<Instant>>,
    trial_in_flight: AtomicBool,
}

impl CircuitBreaker {
    pub fn new(name: &str, threshold: usize, timeout: Duration) -> Self {
        Self {
            name: name.to_string(),
            state: RwLock::new(CircuitState::Closed),
            failure_count: AtomicUsize::new(0),
            failure_threshold: threshold,
            reset_timeout: timeout,
            last_failure: RwLock::new(None),
            trial_in_flight: AtomicBool::new(false),
        }
    }

    pub async fn current(&self) -> CircuitState {
        *self.state.read().await
    }

    pub async fn check(&self) -> bool {
        let state = *self.state.read().await;
        if state == CircuitState::Closed {
            return true;
        }

        if state == CircuitState::Open {
            let last_fail = *self.last_failure.read().await;
            let expired = last_fail.is_some_and(|instant| instant.elapsed() > self.reset_timeout);
            if !expired {
                return false;
            }

            let mut s = self.state.write().await;
            if *s == CircuitState::Open {
                *s = CircuitState::HalfOpen;
                self.trial_in_flight.store(true, Ordering::SeqCst);
                tracing::info!("Circuit Breaker [{}] moving to Half-Open", self.name);
                return true;
            }
        }

        // Half-Open allows one request through
        self.trial_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub async fn record_success(&self) {
        let mut state = self.state.write().await;
        if *state == CircuitState::HalfOpen {
            *state = CircuitState::Closed;
            self.failure_count.store(0, Ordering::SeqCst);
            self.trial_in_flight.store(false, Ordering::SeqCst);
            tracing::info!("Circuit Breaker [{}] recovered to Closed", self.name);
        } else if *state == CircuitState::Closed {
            self.failure_count.store(0, Ordering::SeqCst);
        }
    }

    pub async fn record_failure(&self) {
        let count = self.failure_count.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.write().await;

        if count >= self.failure_threshold || *state == CircuitState::HalfOpen {
            *state = CircuitState::Open;
            self.trial_in_flight.store(false, Ordering::SeqCst);
            let mut last = self.last_failure.write().await;
            *last = Some(Instant::now());
            tracing::error!("Circuit Breaker [{}] TRIPPED to Open. Failures: {}", self.name, count);
        }
    }
}

/// Breakers guarding outbound dependencies
pub struct ResiliencyState {
    pub payment_cb: CircuitBreaker,
}

impl Default for ResiliencyState {
    fn default() -> Self {
        Self {
            payment_cb: CircuitBreaker::new("paystack", 5, Duration::from_secs(30)),
        }
    }
}

/// Only gateway failures count against the breaker; storage errors are not Paystack's fault.
fn is_gateway_failure(status: StatusCode) -> bool {
    status == StatusCode::BAD_GATEWAY
}

/// Fails fast on `/payment/*` while the gateway breaker is open
pub async fn circuit_breaker_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    if !req.uri().path().starts_with("/payment/") {
        return next.run(req).await;
    }

    let cb = &state.resiliency.payment_cb;
    if !cb.check().await {
        let body = Json(ErrorEnvelope {
            status_code: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
            message: "Service Unavailable",
            error: format!("Circuit Breaker [{}] is OPEN", cb.name),
        });
        return (StatusCode::SERVICE_UNAVAILABLE, body).into_response();
    }

    let response = next.run(req).await;

    if is_gateway_failure(response.status()) {
        cb.record_failure().await;
    } else {
        cb.record_success().await;
    }

    response
}
