//! Certificate Service
//!
//! Issues course certificates and verifies them by ID or by holder name and
//! course. Certificates are persisted through [`CertificateStore`], which is
//! handed to the handlers via [`AppState`].
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check with certificate count
//! - `GET /api/certificates` - List all certificates
//! - `POST /api/certificates` - Issue a certificate
//! - `GET /api/certificates/{id}` - Get certificate by ID
//! - `POST /api/verify` - Verify by ID or by name and course
//! - `GET /verify/{id}` - Direct verification link

pub mod config;
pub mod handlers;
pub mod models;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use certificate_store::CertificateStore;
pub use config::Config;
pub use handlers::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;
    let shared_state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route(
            "/api/certificates",
            get(handlers::list_certificates_handler).post(handlers::issue_certificate_handler),
        )
        .route(
            "/api/certificates/{cert_id}",
            get(handlers::get_certificate_handler),
        )
        .route("/api/verify", post(handlers::verify_handler))
        .route("/verify/{cert_id}", get(handlers::verify_direct_handler))
        .with_state(shared_state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
