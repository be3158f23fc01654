//! Creates a dashboard admin from `PIZZA_ADMIN_EMAIL` / `PIZZA_ADMIN_PASSWORD`.
//!
//! Optional `PIZZA_ADMIN_ROLE` (`admin` | `super_admin`, default `admin`).

use std::str::FromStr;
use anyhow::Context;
use pizza_core::repository::AdminRepository;
use pizza_core::{Admin, AdminRole};
use pizza_store::app_config::Config;
use pizza_store::{DbClient, StoreAdminRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let email = std::env::var("PIZZA_ADMIN_EMAIL").context("PIZZA_ADMIN_EMAIL is not set")?;
    let password = std::env::var("PIZZA_ADMIN_PASSWORD").context("PIZZA_ADMIN_PASSWORD is not set")?;
    let role = match std::env::var("PIZZA_ADMIN_ROLE") {
        Ok(role) => AdminRole::from_str(&role)?,
        Err(_) => AdminRole::Admin,
    };

    let config = Config::load().context("Failed to load config")?;
    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to Postgres")?;
    db.migrate().await?;

    let repo = StoreAdminRepository::new(db.pool.clone());
    if repo.find_by_email(&email).await?.is_some() {
        tracing::info!("Admin already exists, nothing to do");
        return Ok(());
    }

    let hash = pizza_api::auth::hash_password(&password)?;
    let admin = Admin::new(email, hash, role);
    repo.create_admin(&admin).await?;

    tracing::info!(admin_id = %admin.id, role = %admin.role, "Admin created");
    Ok(())
}
