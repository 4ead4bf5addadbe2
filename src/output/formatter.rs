//! Output formatters for console, JSON, Markdown, HTML and PDF

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::pdf::PdfExporter;
use crate::output::report::{format_score, FitLabel, ScreeningReport};
use crate::processing::roles::RoleRecommendation;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for text renderings of a screening report
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal formatter with colored fit label and score bar
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter backed by an askama template
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
    pdf_exporter: PdfExporter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .score-good { background: #28a745; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section { margin: 25px 0; }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        .skills {
            display: grid;
            grid-template-columns: 1fr 1fr;
            gap: 20px;
        }
        .matched, .missing {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
        }
        .matched { border-left: 4px solid #28a745; }
        .missing { border-left: 4px solid #dc3545; }
        .role {
            background: #f8f9fa;
            padding: 15px;
            margin: 10px 0;
            border-radius: 6px;
            border-left: 4px solid #17a2b8;
        }
        ul { margin: 10px 0; }
        li { margin: 5px 0; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{{ title }}</h1>
            <p>Generated: {{ generated_at }}</p>
        </div>

        <div class="section">
            <h2>Match Score</h2>
            <p><strong>{{ final_score }}%</strong><span class="score-badge {{ score_class }}">{{ label }}</span></p>
            <p>Skill overlap: {{ overlap_score }}% | Text similarity: {{ similarity_score }}%</p>
        </div>

        <div class="section skills">
            <div class="matched">
                <h2>Matched Skills</h2>
                {% if matched_skills.is_empty() %}
                <p>None detected.</p>
                {% else %}
                <ul>
                    {% for skill in matched_skills %}
                    <li>{{ skill }}</li>
                    {% endfor %}
                </ul>
                {% endif %}
            </div>
            <div class="missing">
                <h2>Missing Skills</h2>
                {% if missing_skills.is_empty() %}
                <p>None detected.</p>
                {% else %}
                <ul>
                    {% for skill in missing_skills %}
                    <li>{{ skill }}</li>
                    {% endfor %}
                </ul>
                {% endif %}
            </div>
        </div>

        <div class="section">
            <h2>Suggestions</h2>
            {% if suggestions.is_empty() %}
            <p>No suggestions. Your resume covers the basics.</p>
            {% else %}
            <ol>
                {% for suggestion in suggestions %}
                <li>{{ suggestion }}</li>
                {% endfor %}
            </ol>
            {% endif %}
        </div>

        <div class="section">
            <h2>Recommended Roles</h2>
            {% if roles.is_empty() %}
            <p>No matching roles found.</p>
            {% endif %}
            {% for role in roles %}
            <div class="role">
                <strong>{{ role.name }}</strong> ({{ role.match_percentage }}% match)
                <p>{{ role.description }}</p>
                <p><em>Matched: {{ role.matched_skills }}</em></p>
            </div>
            {% endfor %}
        </div>

        <div class="section">
            <h2>Summary</h2>
            <p>{{ summary }}</p>
        </div>

        <div class="metadata">
            <p><strong>Resume:</strong> {{ resume_file }} | <strong>Job skills detected:</strong> {{ job_skill_count }}</p>
            <p>Generated by resume-screener v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    title: String,
    generated_at: String,
    final_score: String,
    label: String,
    score_class: String,
    overlap_score: String,
    similarity_score: String,
    matched_skills: Vec<String>,
    missing_skills: Vec<String>,
    suggestions: Vec<String>,
    roles: Vec<HtmlRole>,
    summary: String,
    resume_file: String,
    job_skill_count: usize,
    version: String,
}

#[derive(Debug, Clone)]
struct HtmlRole {
    name: String,
    match_percentage: String,
    description: String,
    matched_skills: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".blue().bold(), title.blue().bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn label_color(label: FitLabel) -> Color {
        match label {
            FitLabel::NeedsImprovement => Color::Red,
            FitLabel::AverageFit => Color::Yellow,
            FitLabel::GoodFit => Color::Green,
        }
    }

    fn format_score_bar(&self, score: f64, label: FitLabel) -> String {
        const WIDTH: usize = 30;
        let filled = ((score.clamp(0.0, 100.0) / 100.0) * WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(WIDTH - filled));
        format!("[{}]", self.colorize(&bar, Self::label_color(label)))
    }

    fn format_skill_columns(&self, matched: &[String], missing: &[String]) -> String {
        const COLUMN: usize = 28;
        let mut output = format!(
            "  {}{}\n",
            self.colorize(&format!("{:<COLUMN$}", "Matched Skills"), Color::Green),
            self.colorize("Missing Skills", Color::Red)
        );

        let rows = matched.len().max(missing.len()).max(1);
        for row in 0..rows {
            let cell = |skills: &[String]| match skills.get(row) {
                Some(skill) => format!("✓ {}", skill),
                None if row == 0 => "None detected.".to_string(),
                None => String::new(),
            };
            let left = cell(matched);
            let right = cell(missing).replacen('✓', "✗", 1);
            output.push_str(&format!("  {:<COLUMN$}{}\n", left, right));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&report.title));
        output.push_str(&format!(
            "Match Score: {}% {}\n",
            self.colorize(&format_score(report.final_score), Color::White),
            self.colorize(report.label.as_str(), Self::label_color(report.label))
        ));
        output.push_str(&format!(
            "{}\n",
            self.format_score_bar(report.final_score, report.label)
        ));
        output.push_str(&format!(
            "Skill overlap: {:.2}% | Text similarity: {:.2}%\n",
            report.score_breakdown.overlap_score, report.score_breakdown.similarity_score
        ));

        output.push_str(&self.format_header("Skills"));
        output.push_str(&self.format_skill_columns(&report.matched_skills, &report.missing_skills));

        output.push_str(&self.format_header("Suggestions"));
        if report.suggestions.is_empty() {
            output.push_str("  No suggestions. Your resume covers the basics.\n");
        }
        for (i, suggestion) in report.suggestions.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
        }

        output.push_str(&self.format_header("Recommended Roles"));
        if report.recommended_roles.is_empty() {
            output.push_str("  No matching roles found.\n");
        }
        for role in &report.recommended_roles {
            output.push_str(&format!(
                "  • {} {}\n",
                self.colorize(&role.role, Color::Cyan),
                self.colorize(
                    &format!("({}% match)", format_score(role.match_percentage)),
                    Color::BrightBlack
                )
            ));
            output.push_str(&format!("    {}\n", role.description));
        }

        output.push_str(&self.format_header("Summary"));
        output.push_str(&format!("{}\n", report.summary));

        output.push_str(&format!(
            "\n{} Generated by resume-screener v{} | {}\n",
            self.colorize("ℹ", Color::Blue),
            report.metadata.screener_version,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_label_badge(label: FitLabel) -> &'static str {
        match label {
            FitLabel::GoodFit => "🟢 Good Fit",
            FitLabel::AverageFit => "🟡 Average Fit",
            FitLabel::NeedsImprovement => "🔴 Needs Improvement",
        }
    }

    fn format_markdown_role(role: &RoleRecommendation) -> String {
        let mut output = format!(
            "### {} ({}% match)\n\n{}\n\n",
            role.role,
            format_score(role.match_percentage),
            role.description
        );
        if !role.matched_skills.is_empty() {
            output.push_str(&format!(
                "**Matched:** `{}`\n\n",
                role.matched_skills.join("`, `")
            ));
        }
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = format!("# {}\n\n", report.title);

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Resume:** `{}`\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.resume_file
            ));
        }

        output.push_str("## Match Score\n\n");
        output.push_str(&format!(
            "**{}%** {}\n\n",
            format_score(report.final_score),
            Self::markdown_label_badge(report.label)
        ));
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        output.push_str(&format!(
            "| Skill overlap | {:.2}% |\n",
            report.score_breakdown.overlap_score
        ));
        output.push_str(&format!(
            "| Text similarity | {:.2}% |\n\n",
            report.score_breakdown.similarity_score
        ));

        output.push_str("## Skills\n\n");
        output.push_str("| Matched Skills | Missing Skills |\n");
        output.push_str("|----------------|----------------|\n");
        let rows = report.matched_skills.len().max(report.missing_skills.len()).max(1);
        for row in 0..rows {
            let cell = |skills: &[String]| match skills.get(row) {
                Some(skill) => format!("✅ {}", skill),
                None if row == 0 => "None detected.".to_string(),
                None => String::new(),
            };
            output.push_str(&format!(
                "| {} | {} |\n",
                cell(&report.matched_skills),
                cell(&report.missing_skills).replacen('✅', "❌", 1)
            ));
        }
        output.push('\n');

        output.push_str("## Suggestions\n\n");
        if report.suggestions.is_empty() {
            output.push_str("No suggestions. Your resume covers the basics.\n");
        }
        for (i, suggestion) in report.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }
        output.push('\n');

        output.push_str("## Recommended Roles\n\n");
        if report.recommended_roles.is_empty() {
            output.push_str("No matching roles found.\n\n");
        }
        for role in &report.recommended_roles {
            output.push_str(&Self::format_markdown_role(role));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("{}\n", report.summary));

        if self.include_metadata {
            output.push_str(&format!(
                "\n---\n*Generated by resume-screener v{}*\n",
                report.metadata.screener_version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ScreeningReport) -> HtmlTemplate {
        let score_class = match report.label {
            FitLabel::GoodFit => "score-good",
            FitLabel::AverageFit => "score-fair",
            FitLabel::NeedsImprovement => "score-poor",
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            title: report.title.clone(),
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            final_score: format_score(report.final_score),
            label: report.label.to_string(),
            score_class: score_class.to_string(),
            overlap_score: format!("{:.2}", report.score_breakdown.overlap_score),
            similarity_score: format!("{:.2}", report.score_breakdown.similarity_score),
            matched_skills: report.matched_skills.clone(),
            missing_skills: report.missing_skills.clone(),
            suggestions: report.suggestions.clone(),
            roles: report
                .recommended_roles
                .iter()
                .map(|role| HtmlRole {
                    name: role.role.clone(),
                    match_percentage: format_score(role.match_percentage),
                    description: role.description.clone(),
                    matched_skills: role.matched_skills.join(", "),
                })
                .collect(),
            summary: report.summary.clone(),
            resume_file: report.metadata.resume_file.clone(),
            job_skill_count: report.metadata.job_skill_count,
            version: report.metadata.screener_version.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
            pdf_exporter: PdfExporter::new(),
        }
    }

    /// Render in any format; text formats come back as UTF-8
    pub fn render(&self, report: &ScreeningReport, format: OutputFormat) -> Result<Vec<u8>> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
            OutputFormat::Pdf => return self.pdf_exporter.export(report),
        };
        Ok(formatter.format_report(report)?.into_bytes())
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &[u8], file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_screening{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_screening{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_screening{}.md", base_name, timestamp_suffix),
        OutputFormat::Html => format!("{}_screening{}.html", base_name, timestamp_suffix),
        OutputFormat::Pdf => format!("{}_screening{}.pdf", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::AnalysisEngine;

    fn report(resume: &str, job: &str) -> ScreeningReport {
        AnalysisEngine::from_config(&Config::default())
            .unwrap()
            .analyze(resume, job, "resume.txt")
    }

    fn render_text(format: OutputFormat, report: &ScreeningReport) -> String {
        let bytes = ReportGenerator::with_options(false, true, true, true)
            .render(report, format)
            .unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_console_output_sections() {
        let report = report("I know Python and Django, see my github", "We need Python Django AWS");
        let output = render_text(OutputFormat::Console, &report);

        assert!(output.contains("Resume Screening Report"));
        assert!(output.contains("Average Fit") || output.contains("Good Fit"));
        assert!(output.contains("✓ django"));
        assert!(output.contains("✗ aws"));
        assert!(output.contains("Recommended Roles"));
        assert!(output.contains(&report.summary));
    }

    #[test]
    fn test_console_marks_empty_columns() {
        let report = report("", "Python developer");
        let output = render_text(OutputFormat::Console, &report);
        assert!(output.contains("None detected."));
        assert!(output.contains("No matching roles found."));
    }

    #[test]
    fn test_json_round_trips_report_fields() {
        let report = report("React and CSS", "React, CSS and AWS");
        let output = render_text(OutputFormat::Json, &report);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["label"], report.label.as_str());
        assert_eq!(value["matched_skills"][0], "css");
        assert_eq!(value["missing_skills"][0], "aws");
        assert!(value["metadata"]["generated_at"].is_string());
    }

    #[test]
    fn test_markdown_has_skill_table() {
        let report = report("React and CSS", "React, CSS and AWS");
        let output = render_text(OutputFormat::Markdown, &report);
        assert!(output.starts_with("# Resume Screening Report"));
        assert!(output.contains("| Matched Skills | Missing Skills |"));
        assert!(output.contains("| ✅ css | ❌ aws |"));
        assert!(output.contains("### Frontend Developer (40.0% match)"));
    }

    #[test]
    fn test_html_escapes_and_lists() {
        let mut report = report("React and CSS", "React, CSS and AWS");
        report.suggestions = vec!["Use <b>bold</b> claims".to_string()];
        let output = render_text(OutputFormat::Html, &report);

        assert!(output.contains("<li>aws</li>"));
        assert!(output.contains("&lt;b&gt;bold"));
        assert!(!output.contains("<b>bold"));
        assert!(output.contains("Creates intuitive and responsive user interfaces."));
    }

    #[test]
    fn test_pdf_render_is_binary() {
        let report = report("React and CSS", "React, CSS and AWS");
        let bytes = ReportGenerator::new().render(&report, OutputFormat::Pdf).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_formatters_declare_their_format() {
        assert_eq!(ConsoleFormatter::new(false).supports_format(), OutputFormat::Console);
        assert_eq!(JsonFormatter::new(true).supports_format(), OutputFormat::Json);
        assert_eq!(MarkdownFormatter::new(true).supports_format(), OutputFormat::Markdown);
        assert_eq!(HtmlFormatter::new(false).supports_format(), OutputFormat::Html);
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Html, "cv/jane_doe.pdf", false),
            "jane_doe_screening.html"
        );
        assert!(suggest_filename(OutputFormat::Json, "cv.docx", true).ends_with(".json"));
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("out.md");
        save_report_to_file(b"# report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# report");
    }
}
