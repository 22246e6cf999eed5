//! Extraction of the small structured fragments embedded in model output:
//! a `NN/100` score and the year/growth rows of a markdown table.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static SCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*/\s*100").expect("valid regex"));

static TREND_ROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|\s*(\d{4})\s*\|\s*([\d.-]+)\s*\|").expect("valid regex"));

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("Could not find table data in the response to generate a graph.")]
    NoTable,

    #[error("Could not generate a graph from the analysis.")]
    BadValue(String),
}

/// One row of the demand-growth table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: u16,
    pub demand_growth_pct: f64,
}

/// Returns the first `N/100` score in the text, if any.
pub fn extract_score(text: &str) -> Option<u32> {
    SCORE_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Collects every `| YYYY | value |` row, in order of appearance.
///
/// Any row whose value is not a number invalidates the whole chart.
pub fn extract_trend_rows(text: &str) -> Result<Vec<TrendPoint>, ChartError> {
    let mut points = Vec::new();
    for caps in TREND_ROW_RE.captures_iter(text) {
        let year = caps[1]
            .parse::<u16>()
            .map_err(|_| ChartError::BadValue(caps[1].to_string()))?;
        let demand_growth_pct = caps[2]
            .parse::<f64>()
            .map_err(|_| ChartError::BadValue(caps[2].to_string()))?;
        points.push(TrendPoint {
            year,
            demand_growth_pct,
        });
    }

    if points.is_empty() {
        return Err(ChartError::NoTable);
    }
    Ok(points)
}
