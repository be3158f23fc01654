use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use pizza_api::{app, middleware::ResiliencyState, AppState, AuthConfig};
use pizza_catalog::PricingCalculator;
use pizza_core::notification::Notifier;
use pizza_core::payment::PaymentGateway;
use pizza_core::repository::{AdminRepository, OrderRepository};
use pizza_core::{Admin, AdminRole};
use pizza_order::{MockPaymentGateway, OrderAdmin, OrderCoordinator};
use pizza_store::app_config::{Config, GatewayMode};
use pizza_store::{
    DbClient, InMemoryAdminRepository, InMemoryOrderRepository, LogNotifier, PaystackGateway,
    StoreAdminRepository, StoreOrderRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pizza_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Pizza API on port {}", config.server.port);

    let orders: Arc<dyn OrderRepository>;
    let admins: Arc<dyn AdminRepository>;
    let gateway: Arc<dyn PaymentGateway>;

    match config.paystack.mode {
        GatewayMode::Mock => {
            tracing::warn!("Running with in-memory storage and a mock payment gateway");
            let dev_admins = Arc::new(InMemoryAdminRepository::new());
            seed_dev_admin(dev_admins.as_ref()).await?;
            orders = Arc::new(InMemoryOrderRepository::new());
            admins = dev_admins;
            gateway = Arc::new(MockPaymentGateway::new());
        }
        GatewayMode::Live => {
            let db = DbClient::new(&config.database.url, config.database.max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;

            orders = Arc::new(StoreOrderRepository::new(db.pool.clone()));
            admins = Arc::new(StoreAdminRepository::new(db.pool.clone()));
            gateway = Arc::new(PaystackGateway::new(&config.paystack).context("Failed to build Paystack client")?);
        }
    }

    let notifier = build_notifier(&config)?;
    let coordinator = OrderCoordinator::new(PricingCalculator::default(), gateway, orders.clone(), notifier);

    let app_state = AppState {
        coordinator: Arc::new(coordinator),
        admin: Arc::new(OrderAdmin::new(orders)),
        admins,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        resiliency: Arc::new(ResiliencyState::default()),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(feature = "kafka")]
fn build_notifier(config: &Config) -> anyhow::Result<Arc<dyn Notifier>> {
    match &config.notifications.brokers {
        Some(brokers) => {
            let producer = pizza_store::EventProducer::new(brokers, &config.notifications.topic)
                .context("Failed to create Kafka producer")?;
            tracing::info!("Publishing order confirmations to {}", config.notifications.topic);
            let notifier: Arc<dyn Notifier> = Arc::new(producer);
            Ok(notifier)
        }
        None => {
            let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
            Ok(notifier)
        }
    }
}

#[cfg(not(feature = "kafka"))]
fn build_notifier(config: &Config) -> anyhow::Result<Arc<dyn Notifier>> {
    if config.notifications.brokers.is_some() {
        tracing::warn!("notifications.brokers is set but the kafka feature is disabled; logging confirmations instead");
    }
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
    Ok(notifier)
}

/// In mock mode there is no database for `seed_admin` to write to, so seed from the environment.
async fn seed_dev_admin(admins: &InMemoryAdminRepository) -> anyhow::Result<()> {
    let (Ok(email), Ok(password)) = (std::env::var("PIZZA_ADMIN_EMAIL"), std::env::var("PIZZA_ADMIN_PASSWORD")) else {
        return Ok(());
    };

    let hash = pizza_api::auth::hash_password(&password)?;
    admins.create_admin(&Admin::new(email, hash, AdminRole::Admin)).await?;
    tracing::info!("Seeded development admin");
    Ok(())
}
