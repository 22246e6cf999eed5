//! View models for the dashboard. A client renders these as-is: score
//! metrics, chart series, notices and download links are all precomputed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::parsing::{extract_score, extract_trend_rows, TrendPoint};
use crate::analysis::{AnalysisKind, JOB_DESCRIPTION_REQUIRED, RESUME_REQUIRED, TARGET_JOB_REQUIRED};
use crate::session::Session;

/// How the panel body is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFormat {
    Markdown,
    Code,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMetric {
    pub label: &'static str,
    pub value: u32,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    #[default]
    Txt,
    Pdf,
}

impl DownloadFormat {
    pub const ALL: [DownloadFormat; 2] = [DownloadFormat::Txt, DownloadFormat::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            DownloadFormat::Txt => "txt",
            DownloadFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            DownloadFormat::Txt => "text/plain",
            DownloadFormat::Pdf => "application/pdf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadDescriptor {
    pub format: DownloadFormat,
    pub file_name: String,
    pub mime_type: &'static str,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelView {
    pub kind: AnalysisKind,
    pub title: &'static str,
    pub display: BodyFormat,
    pub result: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
    pub score: Option<ScoreMetric>,
    pub chart: Option<TrendChart>,
    /// Informational note, e.g. why no chart could be drawn.
    pub notice: Option<String>,
    /// Shown when the panel cannot run yet and has nothing to display.
    pub warning: Option<String>,
    /// One entry per format once the panel has a downloadable result.
    pub downloads: Vec<DownloadDescriptor>,
}

impl PanelView {
    pub fn render(kind: AnalysisKind, session: &Session) -> Self {
        let stored = session.result(kind);
        let text = stored.map(|r| r.text.as_str());

        let score = text.and_then(|t| score_metric(kind, t));
        let (chart, notice) = match (kind, text) {
            (AnalysisKind::Trends, Some(t)) => match extract_trend_rows(t) {
                Ok(points) => (
                    Some(TrendChart {
                        x_label: "Year",
                        y_label: "Demand Growth (%)",
                        points,
                    }),
                    None,
                ),
                Err(e) => (None, Some(e.to_string())),
            },
            _ => (None, None),
        };

        let warning = if stored.is_none() {
            availability_warning(kind, session)
        } else {
            None
        };

        let downloads = match (stored, download_stem(kind)) {
            (Some(_), Some(stem)) => DownloadFormat::ALL
                .iter()
                .map(|&format| DownloadDescriptor {
                    format,
                    file_name: download_file_name(stem, format),
                    mime_type: format.mime_type(),
                    href: download_href(session.id, kind, format),
                })
                .collect(),
            _ => Vec::new(),
        };

        PanelView {
            kind,
            title: kind.title(),
            display: display_for(kind),
            result: text.map(str::to_string),
            generated_at: stored.map(|r| r.generated_at),
            score,
            chart,
            notice,
            warning,
            downloads,
        }
    }
}

fn display_for(kind: AnalysisKind) -> BodyFormat {
    match kind {
        AnalysisKind::Enhance | AnalysisKind::CoverLetter => BodyFormat::Code,
        _ => BodyFormat::Markdown,
    }
}

fn score_metric(kind: AnalysisKind, text: &str) -> Option<ScoreMetric> {
    let label = match kind {
        AnalysisKind::General => "General Score",
        AnalysisKind::Ats => "ATS Score",
        _ => return None,
    };
    extract_score(text).map(|value| ScoreMetric {
        label,
        value,
        display: format!("{value} / 100"),
    })
}

fn availability_warning(kind: AnalysisKind, session: &Session) -> Option<String> {
    let req = kind.requirements();
    if req.resume && session.resume.is_none() {
        return Some(RESUME_REQUIRED.to_string());
    }
    if req.target_job && session.target_job.is_empty() {
        return Some(TARGET_JOB_REQUIRED.to_string());
    }
    // The job description is supplied with each run. Only the cover letter
    // panel asks for it up front; ATS feedback just stays disabled.
    if req.job_description && kind == AnalysisKind::CoverLetter {
        return Some(JOB_DESCRIPTION_REQUIRED.to_string());
    }
    None
}

/// Base file name for panels whose output is a document.
pub fn download_stem(kind: AnalysisKind) -> Option<&'static str> {
    match kind {
        AnalysisKind::Enhance => Some("enhanced_resume"),
        AnalysisKind::CoverLetter => Some("cover_letter"),
        _ => None,
    }
}

pub fn download_file_name(stem: &str, format: DownloadFormat) -> String {
    format!("{stem}.{}", format.extension())
}

fn download_href(session_id: Uuid, kind: AnalysisKind, format: DownloadFormat) -> String {
    let href = format!("/api/v1/sessions/{session_id}/downloads/{kind}");
    match format {
        DownloadFormat::Txt => href,
        DownloadFormat::Pdf => format!("{href}?format=pdf"),
    }
}

/// A feature blurb for the welcome screen.
#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    pub name: &'static str,
    pub description: &'static str,
    pub panels: &'static [AnalysisKind],
}

pub const FEATURES: &[Feature] = &[
    Feature {
        name: "Resume Feedback",
        description: "Get a general score or a specific ATS score against a job description.",
        panels: &[AnalysisKind::General, AnalysisKind::Ats],
    },
    Feature {
        name: "Resume Enhancement",
        description: "Rewrite your resume for maximum impact with one click.",
        panels: &[AnalysisKind::Enhance],
    },
    Feature {
        name: "Learning Roadmap",
        description: "Receive a personalized plan to bridge your skill gaps for a target role.",
        panels: &[AnalysisKind::Roadmap],
    },
    Feature {
        name: "Career Insights",
        description: "Discover unique job roles and future market trends for your desired career.",
        panels: &[AnalysisKind::Opportunity, AnalysisKind::Trends],
    },
    Feature {
        name: "Cover Letter Generator",
        description: "Create a tailored cover letter for any job description.",
        panels: &[AnalysisKind::CoverLetter],
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct ResumeSummary {
    pub file_name: String,
    pub text: String,
    pub edited: bool,
    pub uploaded_at: DateTime<Utc>,
}

/// The whole single-page dashboard for one session.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub resume: Option<ResumeSummary>,
    pub target_job: String,
    pub panels: Vec<PanelView>,
    /// Welcome-screen content, present until a résumé is uploaded.
    pub features: Option<&'static [Feature]>,
}

impl DashboardView {
    pub fn render(session: &Session) -> Self {
        let resume = session.resume.as_ref().map(|doc| ResumeSummary {
            file_name: doc.file_name.clone(),
            text: doc.text.clone(),
            edited: doc.is_edited(),
            uploaded_at: doc.uploaded_at,
        });
        let features = if resume.is_none() { Some(FEATURES) } else { None };

        DashboardView {
            session_id: session.id,
            created_at: session.created_at,
            resume,
            target_job: session.target_job.clone(),
            panels: AnalysisKind::ALL
                .iter()
                .map(|kind| PanelView::render(*kind, session))
                .collect(),
            features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{AnalysisResult, ResumeDocument, SessionStore};

    async fn session() -> Session {
        SessionStore::new(chrono::Duration::minutes(5)).create().await
    }

    fn result(text: &str) -> AnalysisResult {
        AnalysisResult {
            text: text.to_string(),
            job_description: None,
            personalization: None,
            generated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_general_panel_shows_score_metric() {
        let mut s = session().await;
        s.replace_resume(ResumeDocument::new("cv.pdf".into(), "text".into()));
        s.record(AnalysisKind::General, result("## Headline\nResume Score: 81/100"));

        let view = PanelView::render(AnalysisKind::General, &s);
        let score = view.score.unwrap();
        assert_eq!(score.label, "General Score");
        assert_eq!(score.value, 81);
        assert_eq!(score.display, "81 / 100");
        assert!(view.warning.is_none());
        assert_eq!(view.display, BodyFormat::Markdown);
    }

    #[tokio::test]
    async fn test_missing_score_hides_metric_but_keeps_text() {
        let mut s = session().await;
        s.replace_resume(ResumeDocument::new("cv.pdf".into(), "text".into()));
        s.record(AnalysisKind::Ats, result("No score given."));

        let view = PanelView::render(AnalysisKind::Ats, &s);
        assert!(view.score.is_none());
        assert_eq!(view.result.as_deref(), Some("No score given."));
    }

    #[tokio::test]
    async fn test_trends_panel_builds_chart() {
        let mut s = session().await;
        s.set_target_job("AI Engineer");
        s.record(AnalysisKind::Trends, result("| 2024 | 20 |\n| 2025 | 25.5 |"));

        let view = PanelView::render(AnalysisKind::Trends, &s);
        let chart = view.chart.unwrap();
        assert_eq!(chart.y_label, "Demand Growth (%)");
        assert_eq!(chart.points.len(), 2);
        assert!(view.notice.is_none());
    }

    #[tokio::test]
    async fn test_trends_panel_without_table_has_notice() {
        let mut s = session().await;
        s.set_target_job("AI Engineer");
        s.record(AnalysisKind::Trends, result("Only prose."));

        let view = PanelView::render(AnalysisKind::Trends, &s);
        assert!(view.chart.is_none());
        assert_eq!(
            view.notice.as_deref(),
            Some("Could not find table data in the response to generate a graph.")
        );
    }

    #[tokio::test]
    async fn test_warnings_follow_missing_inputs() {
        let mut s = session().await;
        assert_eq!(
            PanelView::render(AnalysisKind::Trends, &s).warning.as_deref(),
            Some(TARGET_JOB_REQUIRED)
        );
        assert_eq!(
            PanelView::render(AnalysisKind::General, &s).warning.as_deref(),
            Some(RESUME_REQUIRED)
        );

        s.replace_resume(ResumeDocument::new("cv.pdf".into(), "text".into()));
        s.set_target_job("SRE");
        assert!(PanelView::render(AnalysisKind::Roadmap, &s).warning.is_none());
        assert_eq!(
            PanelView::render(AnalysisKind::CoverLetter, &s).warning.as_deref(),
            Some(JOB_DESCRIPTION_REQUIRED)
        );
        assert!(PanelView::render(AnalysisKind::Ats, &s).warning.is_none());
    }

    #[tokio::test]
    async fn test_result_suppresses_warning() {
        let mut s = session().await;
        s.replace_resume(ResumeDocument::new("cv.pdf".into(), "text".into()));
        s.record(AnalysisKind::Roadmap, result("plan"));
        assert!(PanelView::render(AnalysisKind::Roadmap, &s).warning.is_none());
    }

    #[tokio::test]
    async fn test_cover_letter_offers_download() {
        let mut s = session().await;
        s.replace_resume(ResumeDocument::new("cv.pdf".into(), "text".into()));
        assert!(PanelView::render(AnalysisKind::CoverLetter, &s).downloads.is_empty());

        s.record(AnalysisKind::CoverLetter, result("Subject: Application"));
        let view = PanelView::render(AnalysisKind::CoverLetter, &s);
        let [txt, pdf] = view.downloads.as_slice() else {
            panic!("expected txt and pdf downloads, got {:?}", view.downloads);
        };
        assert_eq!(txt.file_name, "cover_letter.txt");
        assert_eq!(txt.mime_type, "text/plain");
        assert_eq!(
            txt.href,
            format!("/api/v1/sessions/{}/downloads/cover_letter", s.id)
        );
        assert_eq!(pdf.file_name, "cover_letter.pdf");
        assert_eq!(pdf.mime_type, "application/pdf");
        assert_eq!(
            pdf.href,
            format!("/api/v1/sessions/{}/downloads/cover_letter?format=pdf", s.id)
        );
        assert_eq!(view.display, BodyFormat::Code);
    }

    #[tokio::test]
    async fn test_dashboard_shows_features_until_upload() {
        let mut s = session().await;
        let view = DashboardView::render(&s);
        assert_eq!(view.panels.len(), AnalysisKind::ALL.len());
        assert!(view.features.is_some());

        s.replace_resume(ResumeDocument::new("cv.docx".into(), "text".into()));
        let view = DashboardView::render(&s);
        assert!(view.features.is_none());
        assert_eq!(view.resume.unwrap().file_name, "cv.docx");
    }
}
