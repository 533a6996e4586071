use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use medigate_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const MISSING_IMAGE_MESSAGE: &str = "Missing image file";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{error}")]
    BadRequest {
        error: String,
        details: Option<String>,
    },

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{error}")]
    InternalServerError {
        error: String,
        details: Option<String>,
    },

    #[error("{error}")]
    BadGateway { error: String, details: String },
}

impl ApiError {
    pub fn bad_request(error: impl Into<String>, details: Option<String>) -> Self {
        ApiError::BadRequest {
            error: error.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest { details, .. }
            | ApiError::InternalServerError { details, .. } => details.as_deref(),
            ApiError::PayloadTooLarge(_) => None,
            ApiError::BadGateway { details, .. } => Some(details),
        }
    }

    pub fn body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            details: self.details().map(str::to_string),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::MissingCredential => ApiError::InternalServerError {
                error: error.to_string(),
                details: None,
            },
            CoreError::MissingAttachment => ApiError::bad_request(MISSING_IMAGE_MESSAGE, None),
            CoreError::AttachmentTooLarge { .. } => ApiError::PayloadTooLarge(error.to_string()),
            CoreError::UpstreamRejected { .. } => ApiError::BadGateway {
                error: "Model service rejected the request".to_string(),
                details: error.to_string(),
            },
            CoreError::TransportFailure(message) => ApiError::InternalServerError {
                error: "Failed to reach the model service".to_string(),
                details: Some(message),
            },
            CoreError::InternalServerError(message) => ApiError::InternalServerError {
                error: "Internal server error".to_string(),
                details: Some(message),
            },
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(format!("Request body too large: {}", error.body_text()))
        } else {
            ApiError::bad_request("Invalid multipart body", Some(error.body_text()))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), details = ?self.details(), "{}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "{}", self);
        }

        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attachment_body() {
        let error = ApiError::from(CoreError::MissingAttachment);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(error.body()).unwrap(),
            serde_json::json!({"error": "Missing image file"})
        );
    }

    #[test]
    fn test_upstream_rejection_is_bad_gateway() {
        let error = ApiError::from(CoreError::UpstreamRejected {
            status: 503,
            body: "unavailable".to_string(),
        });
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(error.details(), Some("Upstream status 503: unavailable"));
    }

    #[test]
    fn test_missing_credential_is_server_error() {
        let error = ApiError::from(CoreError::MissingCredential);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.to_string().contains("x-api-key"));
        assert_eq!(error.details(), None);
    }

    #[test]
    fn test_transport_failure_surfaces_cause() {
        let error = ApiError::from(CoreError::TransportFailure("dns error".to_string()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.details(), Some("dns error"));
    }

    #[test]
    fn test_too_large_attachment() {
        let error = ApiError::from(CoreError::AttachmentTooLarge { max: 10 });
        assert_eq!(error.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
