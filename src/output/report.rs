//! Screening report assembled from the matching pipeline outputs

use crate::config::ScoringConfig;
use crate::processing::roles::RoleRecommendation;
use crate::processing::similarity::{MatchResult, ScoreBreakdown};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const REPORT_TITLE: &str = "Resume Screening Report";

/// Complete result of one resume/job comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub title: String,

    /// Blended score in 0..=100, rounded to two decimals
    pub final_score: f64,
    pub label: FitLabel,
    pub score_breakdown: ScoreBreakdown,

    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,

    /// At most five improvement tips, most specific first
    pub suggestions: Vec<String>,
    pub recommended_roles: Vec<RoleRecommendation>,

    pub summary: String,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub screener_version: String,
    pub resume_file: String,
    pub resume_chars: usize,
    pub job_chars: usize,
    pub job_skill_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitLabel {
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    #[serde(rename = "Average Fit")]
    AverageFit,
    #[serde(rename = "Good Fit")]
    GoodFit,
}

impl FitLabel {
    pub fn from_score(score: f64, scoring: &ScoringConfig) -> Self {
        if score < scoring.needs_improvement_below {
            FitLabel::NeedsImprovement
        } else if score < scoring.good_fit_from {
            FitLabel::AverageFit
        } else {
            FitLabel::GoodFit
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FitLabel::NeedsImprovement => "Needs Improvement",
            FitLabel::AverageFit => "Average Fit",
            FitLabel::GoodFit => "Good Fit",
        }
    }
}

impl fmt::Display for FitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs the composer needs beyond the scoring results
pub struct ReportContext<'a> {
    pub resume_file: &'a str,
    pub resume_text: &'a str,
    pub job_text: &'a str,
    pub job_skill_count: usize,
}

impl ScreeningReport {
    pub fn compose(
        matches: MatchResult,
        score_breakdown: ScoreBreakdown,
        suggestions: Vec<String>,
        recommended_roles: Vec<RoleRecommendation>,
        scoring: &ScoringConfig,
        context: ReportContext<'_>,
    ) -> Self {
        let final_score = score_breakdown.final_score;
        let label = FitLabel::from_score(final_score, scoring);
        let summary = compose_summary(&matches, context.job_skill_count, final_score, label);

        Self {
            title: REPORT_TITLE.to_string(),
            final_score,
            label,
            score_breakdown,
            matched_skills: matches.matched,
            missing_skills: matches.missing,
            suggestions,
            recommended_roles,
            summary,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                screener_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: context.resume_file.to_string(),
                resume_chars: context.resume_text.chars().count(),
                job_chars: context.job_text.chars().count(),
                job_skill_count: context.job_skill_count,
            },
        }
    }
}

pub fn compose_summary(
    matches: &MatchResult,
    job_skill_count: usize,
    final_score: f64,
    label: FitLabel,
) -> String {
    let strengths = if matches.matched.is_empty() {
        "general proficiencies".to_string()
    } else {
        matches.matched.join(", ")
    };
    let gaps = if matches.missing.is_empty() {
        "presentation clarity".to_string()
    } else {
        matches.missing.join(", ")
    };

    format!(
        "Your resume currently matches {} of {} required skills, scoring {}%. \
         Strong areas include {} while improvement is needed in {}. \
         Add measurable project outcomes and deployment experience to strengthen your profile. \
         Based on this analysis, your resume is {} for this role.",
        matches.matched.len(),
        job_skill_count,
        format_score(final_score),
        strengths,
        gaps,
        label
    )
}

/// Shortest round-trip float text, always with a fractional part ("75.0", "66.67")
pub fn format_score(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}
