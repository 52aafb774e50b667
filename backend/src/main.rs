//! Farm Advisory Platform - Backend Server

use std::{net::SocketAddr, sync::Arc, time::Duration};

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agri_advisory_backend::{
    create_app,
    external::{AdvisoryClient, WeatherClient},
    services::PgHistoryStore,
    AppState, Config,
};

const DEFAULT_LOG_FILTER: &str =
    "agri_server=debug,agri_advisory_backend=debug,tower_http=debug,sqlx=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    init_tracing(&config);

    tracing::info!("Starting Farm Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.is_development() {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    if config.weather.api_key.is_empty() {
        tracing::warn!("Weather API key not set, placeholder readings will be served");
    }
    if config.advisory.api_key.is_empty() {
        tracing::warn!("Advisory API key not set, soil advice will use local wording");
    }

    let weather = WeatherClient::from_config(&config.weather)?;
    let advisor = AdvisoryClient::from_config(&config.advisory)?;

    let state = AppState {
        store: Arc::new(PgHistoryStore::new(db_pool)),
        weather: Arc::new(weather),
        advisor: Arc::new(advisor),
        config: Arc::new(config.clone()),
    };

    let app = create_app(state);

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing, JSON lines when `logging.format = "json"`
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
