use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use error_common::codes;
use intake_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::pipeline::PipelineError;
use crate::vendor::VendorError;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Unique error ID for log correlation
    pub error_id: String,
    pub error_type: String,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{resource_type} not found")]
    NotFound { resource_type: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Vendor API error: {message}")]
    Vendor { message: String },

    #[error("Vendor API unavailable: {message}")]
    VendorUnavailable { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Vendor { .. } => StatusCode::BAD_GATEWAY,
            ApiError::VendorUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => codes::validation::BAD_REQUEST,
            ApiError::Validation { .. } => codes::validation::VALIDATION_ERROR,
            ApiError::NotFound { .. } => codes::lookup::NOT_FOUND,
            ApiError::Storage { .. } => codes::storage::STORAGE_ERROR,
            ApiError::Vendor { .. } => codes::upstream::VENDOR_ERROR,
            ApiError::VendorUnavailable { .. } => codes::upstream::VENDOR_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        error!(
            error_id = %error_id,
            error_type = %self.error_type(),
            status_code = %status_code.as_u16(),
            error = %self,
            "API error occurred"
        );

        let error_response = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            message: self.to_string(),
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { kind, .. } => ApiError::not_found(kind),
            other => ApiError::Storage {
                message: other.to_string(),
            },
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::Storage(store_error) => store_error.into(),
        }
    }
}

impl From<VendorError> for ApiError {
    fn from(error: VendorError) -> Self {
        match error {
            unconfigured @ VendorError::NotConfigured => ApiError::VendorUnavailable {
                message: unconfigured.to_string(),
            },
            other => ApiError::Vendor {
                message: other.to_string(),
            },
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_status() {
        let missing: ApiError = StoreError::not_found("Bot", "bot009").into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let write: ApiError = StoreError::Write {
            path: "calls.json".into(),
            source: io,
        }
        .into();
        assert_eq!(write.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(write.error_type(), "storage_error");
    }

    #[test]
    fn test_every_variant_has_a_status_and_type() {
        let cases = [
            (ApiError::bad_request("x"), StatusCode::BAD_REQUEST, "bad_request"),
            (ApiError::validation("x"), StatusCode::BAD_REQUEST, "validation_error"),
            (ApiError::not_found("Bot"), StatusCode::NOT_FOUND, "not_found"),
            (
                ApiError::Storage { message: "x".into() },
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
            ),
            (ApiError::Vendor { message: "x".into() }, StatusCode::BAD_GATEWAY, "vendor_error"),
            (
                ApiError::VendorUnavailable { message: "x".into() },
                StatusCode::SERVICE_UNAVAILABLE,
                "vendor_unavailable",
            ),
        ];
        for (error, status, error_type) in cases {
            assert_eq!(error.status_code(), status);
            assert_eq!(error.error_type(), error_type);
        }
    }

    #[test]
    fn test_vendor_errors_map_to_status() {
        let unconfigured: ApiError = VendorError::NotConfigured.into();
        assert_eq!(unconfigured.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let upstream: ApiError = VendorError::Status {
            status: 404,
            body: "nope".to_string(),
        }
        .into();
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);
    }
}
