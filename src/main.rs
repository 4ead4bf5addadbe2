//! Resume screener: match a resume's skills against a job description

use clap::Parser;
use colored::Colorize;
use indicatif::ProgressBar;
use log::{debug, error, info, warn};
use resume_screener::cli::{self, AnalyzeArgs, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::error::{Result, ScreenerError};
use resume_screener::input::file_detector::RESUME_EXTENSIONS;
use resume_screener::input::InputManager;
use resume_screener::output::formatter::{save_report_to_file, suggest_filename};
use resume_screener::output::ReportGenerator;
use resume_screener::processing::text_processor::truncate_text;
use resume_screener::processing::vocabulary::{RoleCatalog, SkillCategory, SkillVocabulary};
use resume_screener::processing::AnalysisEngine;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    match run_command(cli.command, config).await {
        Ok(()) => {}
        Err(ScreenerError::InvalidInput(message)) => {
            eprintln!("{} {}", "⚠️  Warning:".yellow().bold(), message);
            process::exit(2);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            process::exit(1);
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze(args) => run_analyze(args, &config).await,

        Commands::Skills { category } => {
            let vocabulary = SkillVocabulary::builtin();
            let categories: Vec<SkillCategory> = match category {
                Some(name) => vec![SkillCategory::from_name(&name).ok_or_else(|| {
                    ScreenerError::InvalidInput(format!("Unknown skill category: {}", name))
                })?],
                None => SkillCategory::ALL.to_vec(),
            };

            println!("🧰 Skill Vocabulary ({} skills)\n", vocabulary.len());
            for category in categories {
                println!(
                    "{:<10} {}",
                    category.to_string().bold(),
                    vocabulary.skills_in(category).join(", ")
                );
            }
            Ok(())
        }

        Commands::Roles => {
            println!("💼 Role Profiles\n");
            for role in RoleCatalog::builtin().roles() {
                println!("{}", role.name.cyan().bold());
                println!("  {}", role.description);
                println!("  Requires: {}\n", role.required_skills.join(", "));
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ScreenerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("⚙️  Current Configuration\n");
                println!("{}", content);
                Ok(())
            }
            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
                Ok(())
            }
            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
                Ok(())
            }
        },
    }
}

async fn run_analyze(args: AnalyzeArgs, config: &Config) -> Result<()> {
    cli::validate_file_extension(&args.resume, RESUME_EXTENSIONS)
        .map_err(|e| ScreenerError::InvalidInput(format!("Resume file: {}", e)))?;

    let output_format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(ScreenerError::InvalidInput)?,
        None => config.output.format,
    };

    if !args.resume.exists() {
        return Err(ScreenerError::InvalidInput(format!(
            "Please upload a resume: {} does not exist",
            args.resume.display()
        )));
    }

    let input_manager = InputManager::new();

    let job_text = match (&args.job, &args.job_text) {
        (Some(path), _) => {
            if !path.exists() {
                return Err(ScreenerError::InvalidInput(format!(
                    "Job description file does not exist: {}",
                    path.display()
                )));
            }
            input_manager.extract_text(path).await
        }
        (None, Some(text)) => text.clone(),
        (None, None) => String::new(),
    };

    if job_text.trim().is_empty() {
        return Err(ScreenerError::InvalidInput(
            "Please paste a job description".to_string(),
        ));
    }

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Analyzing your resume...");

    let resume_text = input_manager.extract_text(&args.resume).await;
    if resume_text.is_empty() {
        warn!("No text extracted from {}; scoring continues with an empty resume", args.resume.display());
    }
    debug!("Resume preview: {}", truncate_text(&resume_text, 300));
    debug!("Job description preview: {}", truncate_text(&job_text, 300));

    let resume_name = args
        .resume
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let engine = AnalysisEngine::from_config(config)?;
    let report = engine.analyze(&resume_text, &job_text, &resume_name);
    spinner.finish_and_clear();

    let generator = ReportGenerator::with_options(config.output.color_output, true, true, true);
    let content = generator.render(&report, output_format)?;

    let save_path = match args.save {
        Some(path) if path.is_dir() => Some(path.join(suggest_filename(output_format, &resume_name, true))),
        Some(path) => Some(path),
        None if output_format == OutputFormat::Pdf => {
            Some(PathBuf::from(&config.output.report_file_name))
        }
        None => None,
    };

    match save_path {
        Some(path) => {
            save_report_to_file(&content, &path)?;
            info!("Report saved to {}", path.display());
            println!("📁 Report saved to {}", path.display());
        }
        None => {
            std::io::stdout().write_all(&content)?;
        }
    }

    Ok(())
}
