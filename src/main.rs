//! orderdesk server binary

use anyhow::Result;
use orderdesk::config::{AppConfig, LoggingConfig};
use orderdesk::module::server;
use orderdesk::seed;
use orderdesk::store::EntityStore;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    let store = EntityStore::connect(&config.storage).await?;
    if std::env::var("ORDERDESK_SEED").is_ok_and(|v| v == "1") {
        let token = seed::seed_demo(&store).await?;
        tracing::info!(
            username = seed::DEMO_USERNAME,
            token = %token,
            "demo user ready"
        );
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.storage.backend,
        auth = config.auth.enabled,
        "starting"
    );

    server(store, &config)
        .serve(&config.server.bind_address())
        .await
}

/// `RUST_LOG` wins over the configured filter
fn init_tracing(logging: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let json_layer = logging
        .json
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!logging.json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
