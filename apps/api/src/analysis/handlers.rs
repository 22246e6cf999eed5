//! Axum route handlers for the analysis panels.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::runner::{run_analysis, session_not_found, RunRequest};
use crate::analysis::view::{
    download_file_name, download_stem, DownloadFormat, Feature, PanelView, FEATURES,
};
use crate::analysis::AnalysisKind;
use crate::document::export::render_pdf;
use crate::errors::AppError;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub format: DownloadFormat,
}

/// GET /api/v1/features
pub async fn handle_features() -> Json<&'static [Feature]> {
    Json(FEATURES)
}

/// POST /api/v1/sessions/:id/analyses/:kind
///
/// Runs one analysis against the session's current résumé text and returns
/// the refreshed panel. The JSON body is optional. Model failures leave the
/// panel as it was.
pub async fn handle_run_analysis(
    State(state): State<AppState>,
    ApiPath((id, kind)): ApiPath<(Uuid, AnalysisKind)>,
    body: Bytes,
) -> Result<Json<PanelView>, AppError> {
    let request = RunRequest::from_body(&body)?;
    let view = run_analysis(state.llm.as_ref(), &state.sessions, id, kind, request).await?;
    Ok(Json(view))
}

/// GET /api/v1/sessions/:id/analyses/:kind
pub async fn handle_get_panel(
    State(state): State<AppState>,
    ApiPath((id, kind)): ApiPath<(Uuid, AnalysisKind)>,
) -> Result<Json<PanelView>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(PanelView::render(kind, &session)))
}

/// GET /api/v1/sessions/:id/downloads/:kind?format=txt|pdf
///
/// Serves the enhanced résumé or the cover letter as an attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    ApiPath((id, kind)): ApiPath<(Uuid, AnalysisKind)>,
    ApiQuery(query): ApiQuery<DownloadQuery>,
) -> Result<impl IntoResponse, AppError> {
    let stem = download_stem(kind)
        .ok_or_else(|| AppError::Validation(format!("'{kind}' results cannot be downloaded")))?;

    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    let text = session
        .result(kind)
        .map(|r| r.text.clone())
        .ok_or_else(|| AppError::NotFound(format!("No '{kind}' result to download yet")))?;

    let format = query.format;
    let (content_type, body) = match format {
        DownloadFormat::Txt => (
            format!("{}; charset=utf-8", format.mime_type()),
            text.into_bytes(),
        ),
        DownloadFormat::Pdf => {
            let pdf = tokio::task::spawn_blocking(move || render_pdf(stem, &text))
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF task failed: {e}")))?
                .map_err(|e| AppError::Internal(e.into()))?;
            (format.mime_type().to_string(), pdf)
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    download_file_name(stem, format)
                ),
            ),
        ],
        body,
    ))
}
