//! Skill matching, scoring and recommendation pipeline

pub mod analyzer;
pub mod roles;
pub mod similarity;
pub mod skill_detector;
pub mod suggestions;
pub mod text_processor;
pub mod vocabulary;

pub use analyzer::AnalysisEngine;
