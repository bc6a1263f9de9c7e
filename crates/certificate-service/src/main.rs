//! Certificate Service
//!
//! REST API for issuing and verifying course certificates

use anyhow::{Context, Result};
use certificate_service::{create_router, AppState, CertificateStore, Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "certificate_service=debug,certificate_store=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Certificate Service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Certificates file: {}", config.certificates_file().display());

    // Initialize storage
    let store = CertificateStore::new(config.certificates_file());
    store
        .ensure_store()
        .await
        .context("Failed to initialize certificate store")?;

    // Create application state
    let state = AppState::new(store).with_max_body_bytes(config.max_body_bytes);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = config.api_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Certificate Service running on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
