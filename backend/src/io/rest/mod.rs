//! # REST API Interface Layer
//!
//! HTTP endpoints under `/api`, one module per form section, plus the
//! mappers between `shared` DTOs and domain types.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, warn};
use shared::{ErrorKind, ErrorResponse};

use crate::domain::ServiceError;

// Module declarations
pub mod attendance_apis;
pub mod inventory_apis;
pub mod mappers;
pub mod payment_apis;
pub mod signature_apis;

/// JSON body extractor for form submissions. A body that is not valid JSON
/// for the form is answered like any other validation failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(InvalidBody))]
pub struct FormJson<T>(pub T);

/// Rejection produced by `FormJson`
#[derive(Debug)]
pub struct InvalidBody(JsonRejection);

impl From<JsonRejection> for InvalidBody {
    fn from(rejection: JsonRejection) -> Self {
        InvalidBody(rejection)
    }
}

impl IntoResponse for InvalidBody {
    fn into_response(self) -> Response {
        let error = self.0.body_text();
        warn!("Rejected request body: {}", error);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error,
                kind: ErrorKind::Validation,
            }),
        )
            .into_response()
    }
}

/// Convert a service failure into a status code and `ErrorResponse` body
pub fn error_response(operation: &str, err: ServiceError) -> Response {
    let (status, kind) = match &err {
        ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorKind::Validation),
        ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, ErrorKind::NotFound),
        ServiceError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::Storage),
    };

    if status.is_server_error() {
        error!("Failed to {}: {}", operation, err);
    } else {
        warn!("Rejected {}: {}", operation, err);
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            kind,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;

    #[test]
    fn test_error_statuses() {
        let validation = error_response("test", ValidationError::NegativeQuantity(-1).into());
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let missing = error_response("test", ServiceError::not_found("Item", "SKU1"));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let storage = error_response("test", anyhow::anyhow!("disk I/O error").into());
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
