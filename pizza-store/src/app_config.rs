use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub paystack: PaystackConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    Live,
    Mock,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaystackConfig {
    #[serde(default = "default_paystack_url")]
    pub base_url: String,
    pub secret_key: String,
    /// Where the provider sends the customer after checkout
    pub callback_url: String,
    #[serde(default = "default_gateway_mode")]
    pub mode: GatewayMode,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_paystack_url() -> String { "https://api.paystack.co".to_string() }
fn default_gateway_mode() -> GatewayMode { GatewayMode::Live }
fn default_timeout_seconds() -> u64 { 10 }

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    /// Kafka brokers for order-confirmation events; log-only when unset
    pub brokers: Option<String>,
    #[serde(default = "default_topic")]
    pub topic: String,
}

fn default_topic() -> String { "order.confirmed".to_string() }

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { brokers: None, topic: default_topic() }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `PIZZA__PAYSTACK__SECRET_KEY=sk_live_...`
            .add_source(config::Environment::with_prefix("PIZZA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
