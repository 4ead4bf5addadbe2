//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub suggestions: SuggestionConfig,
    pub roles: RoleConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub overlap_weight: f64,
    pub similarity_weight: f64,
    /// Scores below this are labelled "Needs Improvement"
    pub needs_improvement_below: f64,
    /// Scores at or above this are labelled "Good Fit"
    pub good_fit_from: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    pub max_suggestions: usize,
    pub max_skill_suggestions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleConfig {
    pub max_recommendations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub report_file_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
    Pdf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig {
                overlap_weight: 0.85,
                similarity_weight: 0.15,
                needs_improvement_below: 30.0,
                good_fit_from: 60.0,
            },
            suggestions: SuggestionConfig {
                max_suggestions: 5,
                max_skill_suggestions: 3,
            },
            roles: RoleConfig {
                max_recommendations: 4,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                report_file_name: "resume_screener_report.pdf".to_string(),
            },
        }
    }
}

impl Config {
    /// Load the user config, writing the defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    /// Reject weight and threshold combinations that would push scores outside 0..=100
    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;

        if scoring.overlap_weight < 0.0 || scoring.similarity_weight < 0.0 {
            return Err(ScreenerError::Configuration(
                "Scoring weights must not be negative".to_string(),
            ));
        }

        let total = scoring.overlap_weight + scoring.similarity_weight;
        if (total - 1.0).abs() > 1e-6 {
            return Err(ScreenerError::Configuration(format!(
                "Scoring weights must sum to 1.0 (got {:.3})",
                total
            )));
        }

        if scoring.needs_improvement_below > scoring.good_fit_from {
            return Err(ScreenerError::Configuration(
                "needs_improvement_below must not exceed good_fit_from".to_string(),
            ));
        }

        if self.output.report_file_name.trim().is_empty() {
            return Err(ScreenerError::Configuration(
                "report_file_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scoring.overlap_weight, 0.85);
        assert_eq!(config.scoring.similarity_weight, 0.15);
        assert_eq!(config.suggestions.max_suggestions, 5);
        assert_eq!(config.roles.max_recommendations, 4);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = Config::default();
        config.scoring.similarity_weight = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = Config::default();
        config.scoring.overlap_weight = 1.2;
        config.scoring.similarity_weight = -0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_thresholds_must_be_ordered() {
        let mut config = Config::default();
        config.scoring.needs_improvement_below = 70.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.output.format = OutputFormat::Json;
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "scoring = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ScreenerError::Configuration(_)));
    }
}
