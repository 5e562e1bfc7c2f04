//! Iris Prediction Service
//!
//! Serves an iris-species classifier over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     IRIS-SERVE                           │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌──────────────────┐  │
//! │  │  API      │  │  Schema      │  │  Model           │  │
//! │  │  (Axum)   │  │  Validation  │  │  (registry →     │  │
//! │  │           │  │  (validator) │  │   file → stub)   │  │
//! │  └─────┬─────┘  └──────┬───────┘  └────────┬─────────┘  │
//! │        └───────────────┼───────────────────┘            │
//! │                        ▼                                │
//! │                 ┌─────────────┐                         │
//! │                 │  Metrics    │                         │
//! │                 └─────────────┘                         │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod metrics;
mod model;
mod schema;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::net::SocketAddr;
use std::sync::Arc;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "iris_serve=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Iris prediction service starting...");
    tracing::info!("Registry: {}", config.registry_url);

    // Resolve the model before accepting traffic: registry, then local
    // artifact, then the stub classifier. Never fatal.
    let model = model::resolve(&config).await;
    tracing::info!("Serving predictions from {} model", model.source());

    // Build application state
    let state = AppState {
        model,
        metrics: Arc::new(metrics::Metrics::new()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn model::Classifier>,
    pub metrics: Arc<metrics::Metrics>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/metrics", get(handlers::metrics::snapshot))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
