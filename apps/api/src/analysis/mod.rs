// Analysis panels: prompt assembly, response parsing, panel rendering.
// All model calls go through llm_client::TextGenerator.

pub mod handlers;
pub mod parsing;
pub mod prompts;
pub mod runner;
pub mod view;

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::analysis::prompts::{
    ATS_PROMPT, COVER_LETTER_PROMPT, ENHANCE_PROMPT, GENERAL_PROMPT, OPPORTUNITY_PROMPT,
    ROADMAP_PROMPT, TRENDS_PROMPT,
};

pub const TARGET_JOB_REQUIRED: &str =
    "Please enter a Target Job Title in the sidebar to enable this feature.";
pub const JOB_DESCRIPTION_REQUIRED: &str =
    "Please paste a job description to enable this feature.";
pub const RESUME_REQUIRED: &str =
    "Upload your resume in the sidebar to begin your personalized career analysis.";

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{(resume|target_job|job_description|personalization)\}").expect("valid regex")
});

/// One analysis panel of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    General,
    Ats,
    Enhance,
    Roadmap,
    Opportunity,
    Trends,
    CoverLetter,
}

/// Which inputs an analysis cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirements {
    pub resume: bool,
    pub target_job: bool,
    pub job_description: bool,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 7] = [
        AnalysisKind::General,
        AnalysisKind::Ats,
        AnalysisKind::Enhance,
        AnalysisKind::Roadmap,
        AnalysisKind::Opportunity,
        AnalysisKind::Trends,
        AnalysisKind::CoverLetter,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            AnalysisKind::General => "general",
            AnalysisKind::Ats => "ats",
            AnalysisKind::Enhance => "enhance",
            AnalysisKind::Roadmap => "roadmap",
            AnalysisKind::Opportunity => "opportunity",
            AnalysisKind::Trends => "trends",
            AnalysisKind::CoverLetter => "cover_letter",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AnalysisKind::General => "General Feedback",
            AnalysisKind::Ats => "ATS Compatibility Score",
            AnalysisKind::Enhance => "AI-Enhanced Resume",
            AnalysisKind::Roadmap => "Your Personalized Learning Roadmap",
            AnalysisKind::Opportunity => "Career Opportunity & Market Insights",
            AnalysisKind::Trends => "Job Market Future Trends",
            AnalysisKind::CoverLetter => "AI Cover Letter Generator",
        }
    }

    pub fn requirements(self) -> Requirements {
        let (resume, target_job, job_description) = match self {
            AnalysisKind::General | AnalysisKind::Enhance => (true, false, false),
            AnalysisKind::Ats | AnalysisKind::CoverLetter => (true, false, true),
            AnalysisKind::Roadmap | AnalysisKind::Opportunity => (true, true, false),
            AnalysisKind::Trends => (false, true, false),
        };
        Requirements {
            resume,
            target_job,
            job_description,
        }
    }

    fn template(self) -> &'static str {
        match self {
            AnalysisKind::General => GENERAL_PROMPT,
            AnalysisKind::Ats => ATS_PROMPT,
            AnalysisKind::Enhance => ENHANCE_PROMPT,
            AnalysisKind::Roadmap => ROADMAP_PROMPT,
            AnalysisKind::Opportunity => OPPORTUNITY_PROMPT,
            AnalysisKind::Trends => TRENDS_PROMPT,
            AnalysisKind::CoverLetter => COVER_LETTER_PROMPT,
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Everything a prompt may be filled with.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptInputs<'a> {
    pub resume: Option<&'a str>,
    pub target_job: Option<&'a str>,
    pub job_description: Option<&'a str>,
    pub personalization: Option<&'a str>,
}

/// Treats blank strings as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Fills the prompt template for `kind`, failing when a required input is missing.
pub fn build_prompt(kind: AnalysisKind, inputs: &PromptInputs<'_>) -> Result<String, AppError> {
    let req = kind.requirements();

    let resume = present(inputs.resume);
    if req.resume && resume.is_none() {
        return Err(AppError::Precondition(RESUME_REQUIRED.to_string()));
    }
    let target_job = present(inputs.target_job);
    if req.target_job && target_job.is_none() {
        return Err(AppError::Validation(TARGET_JOB_REQUIRED.to_string()));
    }
    let job_description = present(inputs.job_description);
    if req.job_description && job_description.is_none() {
        return Err(AppError::Validation(JOB_DESCRIPTION_REQUIRED.to_string()));
    }

    // The résumé goes in untrimmed: the live editor's layout is part of the input.
    Ok(render_template(
        kind.template(),
        &PromptInputs {
            resume: inputs.resume,
            target_job,
            job_description,
            personalization: present(inputs.personalization),
        },
    ))
}

fn render_template(template: &str, inputs: &PromptInputs<'_>) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            let value = match &caps[1] {
                "resume" => inputs.resume,
                "target_job" => inputs.target_job,
                "job_description" => inputs.job_description,
                _ => inputs.personalization,
            };
            value.unwrap_or("").to_string()
        })
        .into_owned()
}
