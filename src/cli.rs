//! CLI interface for the resume screener

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(version)]
#[command(about = "Resume to job description skill matcher")]
#[command(long_about = "Detect skills in a resume, compare them with a job description, and report a match score, missing skills, suggestions and suitable roles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen a resume against a job description
    Analyze(AnalyzeArgs),

    /// List the skill vocabulary
    Skills {
        /// Only show one category (frontend, backend, database, cloud, tools, design, soft)
        #[arg(long)]
        category: Option<String>,
    },

    /// List role profiles used for recommendations
    Roles,

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to resume file (PDF, DOCX, PNG, JPG, TXT, MD)
    #[arg(short, long)]
    pub resume: PathBuf,

    /// Path to a job description file
    #[arg(short, long, conflicts_with = "job_text", required_unless_present = "job_text")]
    pub job: Option<PathBuf>,

    /// Job description passed inline
    #[arg(long)]
    pub job_text: Option<String>,

    /// Output format: console, json, markdown, html, pdf
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(short, long)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        "pdf" => Ok(OutputFormat::Pdf),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html, pdf",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_requires_a_job_source() {
        assert!(Cli::try_parse_from(["resume-screener", "analyze", "--resume", "cv.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "resume-screener", "analyze", "--resume", "cv.pdf", "--job", "jd.txt", "--job-text", "python",
        ])
        .is_err());

        let cli = Cli::try_parse_from([
            "resume-screener", "analyze", "-r", "cv.pdf", "--job-text", "python", "-o", "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.job_text.as_deref(), Some("python"));
                assert_eq!(args.output.as_deref(), Some("json"));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("PDF"), Ok(OutputFormat::Pdf));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("docx").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = crate::input::file_detector::RESUME_EXTENSIONS;
        assert!(validate_file_extension(Path::new("cv.JPG"), allowed).is_ok());
        assert!(validate_file_extension(Path::new("cv.exe"), allowed)
            .unwrap_err()
            .contains("Unsupported file extension: .exe"));
        assert!(validate_file_extension(Path::new("cv"), allowed).is_err());
    }
}
