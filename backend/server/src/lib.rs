//! Verified engineering college directory.
//!
//! # General Infrastructure
//! - Colleges live in a managed Supabase table, populated and moderated out of band
//! - This server only reads: one query per page load or API call, no cache, no pagination
//! - Only rows flagged `verified` ever leave the store
//!
//!
//!
//! # Routes
//! - `GET /` renders the filterable card grid, filters come in as query parameters
//!   (`search`, `district`, `type`, `ownership`, missing means `all`)
//! - `GET /api/colleges` (alias `/api`) returns `{ success, data, count }`
//! - `GET /health`
//!
//!
//!
//! # Failure Modes
//! - Missing or malformed store credentials answer the API with a "not configured" message
//!   rather than "no data", so deployments can tell the two apart
//! - Store failures answer the API with a 500 and `success: false`
//! - The page never shows an error: a failed fetch is logged and renders "No colleges found."
//!
//!
//!
//! # Setup
//!
//! ```sh
//! export SUPABASE_URL=https://<project>.supabase.co
//! export SUPABASE_ANON_KEY=<anon key>
//! RUST_LOG=info cargo run -p directory
//! ```
//!
//! The key can also be mounted as a Docker secret at `/run/secrets/SUPABASE_ANON_KEY`.
//!
//! Set `APP_ENV=production` to strip `hint`, `details` and `note` from API responses.
use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod card;
pub mod config;
pub mod error;
pub mod filter;
pub mod render;
pub mod routes;
pub mod state;
pub mod view;

use config::Config;
use routes::{colleges_handler, health_handler, page_handler};
use state::State;

pub async fn start_server() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config)?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(page_handler))
        .route("/api", get(colleges_handler))
        .route("/api/colleges", get(colleges_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
