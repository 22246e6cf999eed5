//! Axum route handlers for session lifecycle, résumé upload and the live editor.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::runner::session_not_found;
use crate::analysis::view::DashboardView;
use crate::document::extract_text;
use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::session::ResumeDocument;
use crate::state::AppState;

/// Multipart field carrying the résumé file.
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct EditResumeRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct TargetJobRequest {
    pub target_job: String,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<DashboardView>) {
    let session = state.sessions.create().await;
    (StatusCode::CREATED, Json(DashboardView::render(&session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<DashboardView>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(DashboardView::render(&session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

/// POST /api/v1/sessions/:id/resume
///
/// Accepts a multipart upload (field `file`, PDF or DOCX), extracts its text
/// once and makes it the session's résumé. All previous results are dropped.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<DashboardView>, AppError> {
    if state.sessions.get(id).await.is_none() {
        return Err(session_not_found(id));
    }

    let (file_name, bytes) = read_upload(&mut multipart).await?;
    info!(session_id = %id, file_name = %file_name, size = bytes.len(), "Résumé uploaded");

    let name = file_name.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(&name, &bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?
        .map_err(|e| {
            warn!(session_id = %id, file_name = %file_name, "Rejected upload: {e}");
            AppError::from(e)
        })?;

    let document = ResumeDocument::new(file_name, text);
    let view = state
        .sessions
        .update(id, |session| {
            session.replace_resume(document);
            DashboardView::render(session)
        })
        .await
        .ok_or_else(|| session_not_found(id))?;

    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/resume
///
/// Live-editor update. Subsequent analyses use the edited text.
pub async fn handle_edit_resume(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<EditResumeRequest>,
) -> Result<Json<DashboardView>, AppError> {
    let outcome = state
        .sessions
        .update(id, |session| {
            session
                .edit_resume_text(request.text)
                .then(|| DashboardView::render(session))
        })
        .await
        .ok_or_else(|| session_not_found(id))?;

    outcome
        .map(Json)
        .ok_or_else(|| AppError::Precondition("Upload a resume before editing it.".to_string()))
}

/// PUT /api/v1/sessions/:id/target-job
pub async fn handle_set_target_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<TargetJobRequest>,
) -> Result<Json<DashboardView>, AppError> {
    let view = state
        .sessions
        .update(id, |session| {
            session.set_target_job(&request.target_job);
            DashboardView::render(session)
        })
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(view))
}

/// Pulls the first `file` field out of the multipart body.
async fn read_upload(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Uploaded file has no name".to_string()))?;
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok((file_name, bytes));
    }
    Err(AppError::Validation(format!(
        "No résumé provided: expected a multipart field named '{UPLOAD_FIELD}'"
    )))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("The uploaded file exceeds the size limit".to_string())
    } else {
        AppError::Validation(err.body_text())
    }
}
