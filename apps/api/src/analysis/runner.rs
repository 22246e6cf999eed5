//! Runs one analysis for a session.
//!
//! Flow: snapshot session → build prompt → model call → record result → render panel.
//! A failed model call leaves the session untouched, and so does a result for a
//! résumé that was replaced while the model was working.

use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::view::PanelView;
use crate::analysis::{build_prompt, AnalysisKind, PromptInputs};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::session::{AnalysisResult, SessionStore};

/// Per-run inputs that are not part of the session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub job_description: Option<String>,
    /// Free-form request for the learning roadmap, e.g. "create a 60-day plan".
    #[serde(default)]
    pub personalization: Option<String>,
}

pub const RESUME_REPLACED: &str =
    "A new resume was uploaded while this analysis was running. Please run it again.";

impl RunRequest {
    /// Parses an optional JSON body. An empty body means no per-run inputs.
    pub fn from_body(body: &Bytes) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("Invalid analysis request body: {e}")))
    }
}

pub fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

pub async fn run_analysis(
    generator: &dyn TextGenerator,
    sessions: &SessionStore,
    session_id: Uuid,
    kind: AnalysisKind,
    request: RunRequest,
) -> Result<PanelView, AppError> {
    let session = sessions
        .get(session_id)
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    let revision = session.revision();
    let prompt = build_prompt(
        kind,
        &PromptInputs {
            resume: session.resume_text(),
            target_job: Some(session.target_job.as_str()),
            job_description: request.job_description.as_deref(),
            personalization: request.personalization.as_deref(),
        },
    )?;

    info!(session_id = %session_id, analysis = %kind, "Running analysis");

    let text = generator.generate_text(&prompt).await.map_err(|e| {
        warn!(session_id = %session_id, analysis = %kind, "Analysis failed: {e}");
        AppError::Llm(e)
    })?;

    let result = AnalysisResult {
        text,
        job_description: request.job_description,
        personalization: request.personalization,
        generated_at: Utc::now(),
    };

    sessions
        .update(session_id, |session| {
            if session.revision() != revision {
                return None;
            }
            session.record(kind, result);
            Some(PanelView::render(kind, session))
        })
        .await
        .ok_or_else(|| session_not_found(session_id))?
        .ok_or_else(|| {
            warn!(session_id = %session_id, analysis = %kind, "Discarding result for a replaced résumé");
            AppError::Precondition(RESUME_REPLACED.to_string())
        })
}
