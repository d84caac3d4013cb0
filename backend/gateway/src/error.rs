//! HTTP error mapping. Every failure leaves the gateway as
//! `{"detail": "..."}` with a matching status code.

use aegis_core::{AegisError, SUPPORTED_EXTENSIONS};
use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    TooManyRequests(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn from_multipart(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge("Uploaded file is too large".to_string())
        } else {
            Self::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
        }
    }
}

impl From<AegisError> for ApiError {
    fn from(err: AegisError) -> Self {
        match err {
            AegisError::UnsupportedFormat { .. } => Self::BadRequest(format!(
                "Unsupported file type. Allowed: {}",
                SUPPORTED_EXTENSIONS.join(", ")
            )),
            AegisError::EmptyDocument => Self::BadRequest(err.to_string()),
            AegisError::InvalidRequest(message) => Self::BadRequest(message),
            AegisError::EngineUnavailable { .. } => Self::ServiceUnavailable(err.to_string()),
            other => Self::Internal(format!("Error processing document: {other}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, detail = %self, "Request failed");
        } else {
            tracing::debug!(%status, detail = %self, "Request rejected");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_document_errors() {
        let err = ApiError::from(AegisError::UnsupportedFormat { extension: "docx".into() });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Unsupported file type. Allowed: pdf, jpg, jpeg, png, bmp, tiff, webp, txt"
        );

        let err = ApiError::from(AegisError::EmptyDocument);
        assert_eq!(err.to_string(), "Uploaded file is empty");
    }

    #[test]
    fn maps_engine_and_processing_errors() {
        let err = ApiError::from(AegisError::EngineUnavailable {
            program: "tesseract".into(),
            reason: "not found".into(),
        });
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err = ApiError::from(AegisError::Recognition("bad image".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Error processing document: text recognition failed: bad image"
        );
    }
}
