//! Skill overlap, TF-IDF cosine similarity and the blended match score

use crate::error::{Result, ScreenerError};
use crate::processing::skill_detector::SkillSet;
use crate::processing::text_processor::TextProcessor;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Skills in both documents, sorted
    pub matched: Vec<String>,
    /// Job description skills absent from the resume, sorted
    pub missing: Vec<String>,
    pub overlap_score: f64,
}

impl MatchResult {
    pub fn compute(resume_skills: &SkillSet, job_skills: &SkillSet) -> Self {
        let matched: Vec<String> = resume_skills.intersection(job_skills).cloned().collect();
        let missing: Vec<String> = job_skills.difference(resume_skills).cloned().collect();
        let overlap_score = overlap_score(matched.len(), job_skills.len());

        Self {
            matched,
            missing,
            overlap_score,
        }
    }
}

/// Share of job skills found in the resume, as a percentage
pub fn overlap_score(matched: usize, job_skill_count: usize) -> f64 {
    matched as f64 / job_skill_count.max(1) as f64 * 100.0
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overlap_score: f64,
    pub similarity_score: f64,
    pub final_score: f64,
}

pub struct SimilarityScorer {
    processor: TextProcessor,
    overlap_weight: f64,
    similarity_weight: f64,
}

impl SimilarityScorer {
    pub fn new(overlap_weight: f64, similarity_weight: f64) -> Self {
        Self {
            processor: TextProcessor::new(),
            overlap_weight,
            similarity_weight,
        }
    }

    /// TF-IDF cosine similarity of the two texts scaled to 0..=100, 0.0 when it cannot be computed
    pub fn similarity_score(&self, resume_text: &str, job_text: &str) -> f64 {
        match self.try_similarity(resume_text, job_text) {
            Ok(score) => score * 100.0,
            Err(e) => {
                debug!("Vector similarity unavailable, using 0.0: {}", e);
                0.0
            }
        }
    }

    pub fn try_similarity(&self, resume_text: &str, job_text: &str) -> Result<f64> {
        if resume_text.trim().is_empty() || job_text.trim().is_empty() {
            return Err(ScreenerError::TextProcessing(
                "Both documents need text to vectorize".to_string(),
            ));
        }

        let space = TfIdfSpace::fit(&[
            self.processor.tokenize(resume_text),
            self.processor.tokenize(job_text),
        ])?;

        Ok(cosine_similarity(&space.vectors[0], &space.vectors[1]))
    }

    pub fn final_score(&self, overlap_score: f64, similarity_score: f64) -> f64 {
        round_to(
            self.overlap_weight * overlap_score + self.similarity_weight * similarity_score,
            2,
        )
    }

    pub fn score(&self, matches: &MatchResult, resume_text: &str, job_text: &str) -> ScoreBreakdown {
        let similarity_score = self.similarity_score(resume_text, job_text);
        ScoreBreakdown {
            overlap_score: matches.overlap_score,
            similarity_score,
            final_score: self.final_score(matches.overlap_score, similarity_score),
        }
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(0.85, 0.15)
    }
}

/// L2-normalized TF-IDF rows over a vocabulary fitted on the given documents
struct TfIdfSpace {
    vectors: Vec<Vec<f64>>,
}

impl TfIdfSpace {
    fn fit(documents: &[Vec<String>]) -> Result<Self> {
        let mut vocabulary: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in documents {
            for token in tokens {
                vocabulary.entry(token.as_str()).or_insert(0);
            }
        }

        if vocabulary.is_empty() {
            return Err(ScreenerError::TextProcessing(
                "Empty vocabulary; documents contain only stop words".to_string(),
            ));
        }

        for (index, slot) in vocabulary.values_mut().enumerate() {
            *slot = index;
        }

        let term_counts: Vec<HashMap<usize, f64>> = documents
            .iter()
            .map(|tokens| {
                let mut counts = HashMap::new();
                for token in tokens {
                    *counts.entry(vocabulary[token.as_str()]).or_insert(0.0) += 1.0;
                }
                counts
            })
            .collect();

        // smoothed idf: ln((1 + n) / (1 + df)) + 1
        let n = documents.len() as f64;
        let mut idf = vec![0.0; vocabulary.len()];
        for (term, weight) in idf.iter_mut().enumerate() {
            let df = term_counts.iter().filter(|c| c.contains_key(&term)).count() as f64;
            *weight = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
        }

        let vectors = term_counts
            .iter()
            .map(|counts| {
                let mut row = vec![0.0; vocabulary.len()];
                for (&term, &count) in counts {
                    row[term] = count * idf[term];
                }
                let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|x| *x /= norm);
                }
                row
            })
            .collect();

        Ok(Self { vectors })
    }
}

fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
