use axum::{
    extract::State,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use jsonwebtoken::{encode, Header, EncodingKey};
use chrono::{Utc, Duration};
use std::sync::LazyLock;
use uuid::Uuid;
use pizza_core::AdminRole;
use pizza_shared::Masked;

use crate::{
    error::AppError,
    middleware::auth::AdminClaims,
    response::{ApiResponse, ValidatedJson},
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| bcrypt::hash("pizza-hub-dummy-password", bcrypt::DEFAULT_COST).unwrap_or_default());

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminIdentity {
    pub id: Uuid,
    pub email: String,
    pub role: AdminRole,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub admin: AdminIdentity,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/admin/login", post(login_admin))
}

/// Hash a password for storage in the admins table
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

/// POST /admin/login
async fn login_admin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let admin = state.admins.find_by_email(&req.email).await?;

    // Unknown emails still pay for a bcrypt check so response timing does not reveal them.
    let hash = admin.as_ref().map(|a| a.password_hash.clone());
    let valid = tokio::task::spawn_blocking(move || match hash {
        Some(hash) => bcrypt::verify(req.password, &hash),
        None => {
            let _ = bcrypt::verify(req.password, &DUMMY_HASH);
            Ok(false)
        }
    })
    .await
    .map_err(|e| AppError::InternalServerError(format!("Password check panicked: {}", e)))?
    .map_err(|e| AppError::InternalServerError(format!("Password check failed: {}", e)))?;

    let admin = match admin {
        Some(admin) if valid => admin,
        _ => {
            tracing::info!(email = %Masked(&req.email), "Rejected admin login");
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }
    };

    let claims = AdminClaims {
        sub: admin.id.to_string(),
        email: admin.email.clone(),
        role: admin.role.as_str().to_owned(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(state.auth.secret.as_bytes()))
        .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    state.admins.record_login(admin.id).await?;
    tracing::info!(admin_id = %admin.id, "Admin logged in");

    Ok(ApiResponse::ok(
        "Login successful",
        LoginResponse {
            access_token: token,
            admin: AdminIdentity {
                id: admin.id,
                email: admin.email,
                role: admin.role,
            },
        },
    ))
}
