//! API request handlers for the certificate service

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use certificate_store::CertificateStore;
use certify_common::{Certificate, CertificateId, Error};
use chrono::Local;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::models::{
    CertificateResponse, CertificatesListResponse, InputError, IssueCertificateRequest,
    IssueCertificateResponse, Lookup, VerifyRequest, VerifyResponse,
};

/// Default request body limit (16 KiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024;

/// Attempts at drawing an unused certificate ID before giving up
const MAX_ID_ATTEMPTS: usize = 5;

/// Shared application state
pub struct AppState {
    pub store: CertificateStore,
    pub max_body_bytes: usize,
}

impl AppState {
    /// Create application state around a store
    pub fn new(store: CertificateStore) -> Self {
        Self {
            store,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Override the request body limit
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub certificate_id: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            certificate_id: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({
            "error": self.message
        });
        if let Some(id) = self.certificate_id {
            body["certificate_id"] = serde_json::Value::String(id);
        }

        (self.status, Json(body)).into_response()
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, err.to_string())
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if let Some(existing_id) = err.conflicting_id() {
            let message = match &err {
                Error::DuplicateId(_) => "Certificate ID already exists.",
                _ => "A certificate for this name and course already exists.",
            };
            return ApiError {
                status: StatusCode::CONFLICT,
                message: message.to_string(),
                certificate_id: Some(existing_id.to_string()),
            };
        }

        error!("Error saving certificate: {}", err);
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error saving certificate. Please try again.",
        )
    }
}

/// Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "certificate-service",
        "timestamp": Local::now().naive_local(),
        "certificates_count": state.store.count().await
    }))
}

/// List all certificates
pub async fn list_certificates_handler(
    State(state): State<Arc<AppState>>,
) -> Json<CertificatesListResponse> {
    info!("Listing all certificates");

    let certificates = state.store.load_all().await;
    let total = certificates.len();

    Json(CertificatesListResponse { certificates, total })
}

/// Issue a new certificate
pub async fn issue_certificate_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IssueCertificateRequest>,
) -> Result<(StatusCode, Json<IssueCertificateResponse>), ApiError> {
    let request = payload.validate()?;
    info!(
        "Issuing certificate for {} in {}",
        request.name, request.course
    );

    for _ in 0..MAX_ID_ATTEMPTS {
        let certificate = Certificate::issue(
            CertificateId::generate(),
            request.name.clone(),
            request.course.clone(),
        );

        let added = if request.reissue {
            state.store.add_reissue(&certificate).await
        } else {
            state.store.add(&certificate).await
        };

        match added {
            Ok(()) => {
                return Ok((
                    StatusCode::CREATED,
                    Json(IssueCertificateResponse {
                        success: true,
                        message: format!(
                            "Certificate generated successfully! Your ID: {}",
                            certificate.id
                        ),
                        certificate,
                    }),
                ));
            }
            Err(Error::DuplicateId(id)) => {
                warn!("Generated certificate ID {} collided, retrying", id);
            }
            Err(e) => return Err(e.into()),
        }
    }

    error!(
        "No unused certificate ID after {} attempts",
        MAX_ID_ATTEMPTS
    );
    Err(ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Error saving certificate. Please try again.",
    ))
}

/// Get certificate by ID
pub async fn get_certificate_handler(
    State(state): State<Arc<AppState>>,
    Path(cert_id): Path<String>,
) -> Result<Json<CertificateResponse>, ApiError> {
    let id = CertificateId::normalize(&cert_id);
    info!("Getting certificate: {}", id);

    match state.store.find_by_id(id.as_str()).await {
        Some(certificate) => Ok(Json(CertificateResponse { certificate })),
        None => Err(ApiError::new(
            StatusCode::NOT_FOUND,
            format!("Certificate not found: {}", id),
        )),
    }
}

/// Verify a certificate by ID or by holder name and course
pub async fn verify_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<VerifyRequest>,
) -> Result<(StatusCode, Json<VerifyResponse>), ApiError> {
    let found = match payload.lookup()? {
        Lookup::ById(id) => {
            info!("Verifying certificate: {}", id);
            state.store.find_by_id(id.as_str()).await
        }
        Lookup::ByHolder { name, course } => {
            info!("Verifying certificate for {} in {}", name, course);
            state.store.find_by_name_and_course(&name, &course).await
        }
    };

    Ok(verification(found))
}

/// Direct verification link
pub async fn verify_direct_handler(
    State(state): State<Arc<AppState>>,
    Path(cert_id): Path<String>,
) -> (StatusCode, Json<VerifyResponse>) {
    let id = CertificateId::normalize(&cert_id);
    info!("Verifying certificate: {}", id);

    verification(state.store.find_by_id(id.as_str()).await)
}

fn verification(found: Option<Certificate>) -> (StatusCode, Json<VerifyResponse>) {
    match found {
        Some(certificate) => (StatusCode::OK, Json(VerifyResponse::verified(certificate))),
        None => (StatusCode::NOT_FOUND, Json(VerifyResponse::not_found())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_duplicate_id_maps_to_conflict() {
        let err = ApiError::from(Error::DuplicateId("AB12CD34".to_string()));
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.certificate_id.as_deref(), Some("AB12CD34"));
    }

    #[test]
    fn test_write_failure_maps_to_server_error() {
        let err = ApiError::from(Error::Write {
            path: PathBuf::from("data/certificates.json"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Error saving certificate. Please try again.");
        assert_eq!(err.certificate_id, None);
    }
}
