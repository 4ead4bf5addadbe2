//! Main analysis engine running the resume screening pipeline

use crate::config::{Config, ScoringConfig};
use crate::error::Result;
use crate::output::report::{ReportContext, ScreeningReport};
use crate::processing::roles::RoleRecommender;
use crate::processing::similarity::{MatchResult, SimilarityScorer};
use crate::processing::skill_detector::SkillDetector;
use crate::processing::suggestions::SuggestionGenerator;
use crate::processing::text_processor::TextProcessor;
use crate::processing::vocabulary::{RoleCatalog, SkillVocabulary};
use log::{debug, info};

/// Coordinates skill detection, scoring, role matching and suggestions
pub struct AnalysisEngine {
    processor: TextProcessor,
    detector: SkillDetector,
    scorer: SimilarityScorer,
    recommender: RoleRecommender,
    suggestions: SuggestionGenerator,
    scoring: ScoringConfig,
}

impl AnalysisEngine {
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let vocabulary = SkillVocabulary::builtin();

        Ok(Self {
            processor: TextProcessor::new(),
            detector: SkillDetector::new(vocabulary),
            scorer: SimilarityScorer::new(
                config.scoring.overlap_weight,
                config.scoring.similarity_weight,
            ),
            recommender: RoleRecommender::new(
                RoleCatalog::builtin(),
                config.roles.max_recommendations,
            ),
            suggestions: SuggestionGenerator::new(
                vocabulary,
                config.suggestions.max_suggestions,
                config.suggestions.max_skill_suggestions,
            )?,
            scoring: config.scoring.clone(),
        })
    }

    /// Compare a resume against a job description; never fails on empty text
    pub fn analyze(&self, resume_text: &str, job_text: &str, resume_file: &str) -> ScreeningReport {
        let resume_text = self.processor.clean_text(resume_text);
        let job_text = self.processor.clean_text(job_text);

        let resume_skills = self.detector.detect(&resume_text);
        let job_skills = self.detector.detect(&job_text);
        debug!(
            "Detected {} resume skills and {} job skills",
            resume_skills.len(),
            job_skills.len()
        );

        let matches = MatchResult::compute(&resume_skills, &job_skills);
        let score_breakdown = self.scorer.score(&matches, &resume_text, &job_text);
        debug!(
            "Overlap {:.2}, similarity {:.2}, final {:.2}",
            score_breakdown.overlap_score, score_breakdown.similarity_score, score_breakdown.final_score
        );

        let roles = self.recommender.recommend(&resume_skills);
        let suggestions = self
            .suggestions
            .generate(&matches.missing, &resume_text, &job_text);

        let report = ScreeningReport::compose(
            matches,
            score_breakdown,
            suggestions,
            roles,
            &self.scoring,
            ReportContext {
                resume_file,
                resume_text: &resume_text,
                job_text: &job_text,
                job_skill_count: job_skills.len(),
            },
        );

        info!("Analysis complete: {}% ({})", report.final_score, report.label);
        report
    }
}
