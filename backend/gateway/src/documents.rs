//! Document upload endpoint.

use aegis_core::{Document, ExtractedRecord};
use aegis_logging::{EventLogger, VerificationEvent, redact_sensitive_data};
use aegis_understanding::process_document;
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::GatewayState;

/// Multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub filename: String,
    pub data: ExtractedRecord,
}

/// Handler for `POST /api/v1/upload-document`
pub async fn upload_document(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let mut multipart =
        multipart.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let (filename, bytes) = read_file_field(&mut multipart).await?;
    info!(
        %request_id,
        filename = %redact_sensitive_data(&filename),
        size = bytes.len(),
        "Received document"
    );

    let document = Document::new(filename.clone(), bytes)?;
    let record = match process_document(state.reader.as_ref(), &document).await {
        Ok(record) => record,
        Err(err) => {
            EventLogger::log_event(
                &request_id,
                VerificationEvent::ProcessingFailed {
                    filename: Some(filename),
                    error: err.to_string(),
                },
            );
            return Err(err.into());
        }
    };

    EventLogger::log_event(
        &request_id,
        VerificationEvent::DocumentExtracted {
            filename: filename.clone(),
            kind: document.kind.as_str().to_string(),
            fields_found: record.fields_found(),
            confidence_score: record.confidence_score,
        },
    );

    Ok(Json(UploadResponse {
        status: "success",
        filename,
        data: record,
    }))
}

/// Pull the `file` field out of the form; other fields are skipped.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(ApiError::from_multipart)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(ApiError::from_multipart)?;
        return Ok((filename, bytes.to_vec()));
    }
    Err(ApiError::BadRequest(format!(
        "Missing `{FILE_FIELD}` field in upload"
    )))
}
