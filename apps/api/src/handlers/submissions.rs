use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Extension, Multipart, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_LENGTH;
use bytes::Bytes;
use futures_util::StreamExt;
use subportal_application::IncomingUpload;
use subportal_core::{AppError, AppResult, MemberId};
use subportal_domain::UploadedArtifact;
use tracing::{error, info};

use crate::error::ApiResult;
use crate::state::AppState;

/// Multipart part carrying the submitted file.
const FILE_PART_NAME: &str = "file";

pub async fn submission_receiver_handler(
    State(state): State<AppState>,
    Extension(member_id): Extension<MemberId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<StatusCode> {
    match receive_submission(&state, multipart).await {
        Ok(artifact) => {
            info!(
                uid = %member_id,
                filename = %artifact.original_filename,
                size = artifact.declared_size,
                path = %artifact.stored_path.display(),
                "stored submission"
            );
            Ok(StatusCode::OK)
        }
        Err(ingest_error) => {
            error!(uid = %member_id, error = %ingest_error, "submission ingestion failed");
            Err(ingest_error.into())
        }
    }
}

async fn receive_submission(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<UploadedArtifact> {
    let mut multipart = multipart.map_err(|rejection| {
        AppError::NoFileSupplied(format!("could not retrieve the file: {rejection}"))
    })?;

    while let Some(field) = multipart.next_field().await.map_err(|error| {
        AppError::NoFileSupplied(format!("could not retrieve the file: {error}"))
    })? {
        if field.name() != Some(FILE_PART_NAME) {
            continue;
        }

        return ingest_file_part(state, field).await;
    }

    Err(AppError::NoFileSupplied(format!(
        "request has no '{FILE_PART_NAME}' part"
    )))
}

async fn ingest_file_part(state: &AppState, field: Field<'_>) -> AppResult<UploadedArtifact> {
    let original_filename = field
        .file_name()
        .map(str::to_owned)
        .ok_or_else(|| {
            AppError::NoFileSupplied(format!("'{FILE_PART_NAME}' part carries no file name"))
        })?;
    let declared_size = field
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    info!(
        filename = %original_filename,
        declared_size = ?declared_size,
        headers = ?field.headers(),
        "received a file"
    );

    let content = field.map(|chunk: Result<Bytes, MultipartError>| {
        chunk.map_err(|error| AppError::Validation(format!("could not read file part: {error}")))
    });

    state
        .submission_service
        .ingest(IncomingUpload {
            original_filename,
            declared_size,
            content: Box::pin(content),
        })
        .await
}
