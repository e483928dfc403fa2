//! Cardkeep Server - Staff Access Card Tracking
//!
//! REST API server tracking which access cards are out and who holds them.

use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardkeep_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("cardkeep_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Cardkeep Server v{}", env!("CARGO_PKG_VERSION"));

    // The database lives in a single file; make sure its directory exists
    let db_path = config.database.url.trim_start_matches("sqlite://");
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Create database connection pool
    let connect_options = SqliteConnectOptions::from_str(&config.database.url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(connect_options)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Create repository and services
    let repository = Repository::new(pool);

    // Seed the fixed bootstrap cards on first run
    if config.seed.enabled {
        let inserted = repository.cards.seed_defaults().await?;
        if inserted > 0 {
            tracing::info!("Seeded {} bootstrap cards", inserted);
        }
    }

    let services = Services::new(repository);

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Card registry
        .route("/cards", get(api::cards::list_cards))
        .route("/cards", post(api::cards::create_card))
        .route("/cards/available", get(api::cards::list_available))
        .route("/cards/assigned", get(api::cards::list_assigned))
        .route("/cards/:id", put(api::cards::rename_card))
        .route("/cards/:id", delete(api::cards::delete_card))
        // Lifecycle transitions addressed by tag uid
        .route("/cards/uid/:uid/assign", post(api::cards::assign_by_uid))
        .route("/cards/uid/:uid/return", post(api::cards::return_by_uid))
        .route("/cards/uid/:uid/tap", post(api::cards::tap_card))
        // Assignments
        .route("/assignments", post(api::assignments::create_assignment))
        .route(
            "/assignments/:id/return",
            post(api::assignments::return_assignment),
        )
        .route("/assignments/log", get(api::assignments::assignment_log))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
