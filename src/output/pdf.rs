//! A4 PDF rendering of a screening report

use crate::error::Result;
use crate::output::report::{format_score, ScreeningReport};
use crate::processing::text_processor::{truncate_text, TextProcessor};
use anyhow::{anyhow, Context};
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const SECOND_COLUMN: f32 = MARGIN + 95.0;
const BODY_SIZE: f32 = 11.0;
const HEADING_SIZE: f32 = 14.0;
const TITLE_SIZE: f32 = 18.0;

/// Characters per line at body size; Helvetica averages about half an em per glyph
const FULL_WIDTH_CHARS: usize = 95;
const COLUMN_CHARS: usize = 45;

pub struct PdfExporter {
    processor: TextProcessor,
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExporter {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }

    pub fn export(&self, report: &ScreeningReport) -> Result<Vec<u8>> {
        Ok(self.render(report)?)
    }

    fn render(&self, report: &ScreeningReport) -> anyhow::Result<Vec<u8>> {
        let clean = |text: &str| self.processor.sanitize_for_export(text);
        let title = clean(&report.title);

        let (doc, page, layer) =
            PdfDocument::new(title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow!("{:?}", e))
            .context("Failed to load Helvetica")?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| anyhow!("{:?}", e))
            .context("Failed to load Helvetica Bold")?;

        let mut writer = PageWriter {
            layer: doc.get_page(page).get_layer(layer),
            doc: &doc,
            y: PAGE_HEIGHT - MARGIN,
            regular,
            bold,
        };

        writer.text(&title, TITLE_SIZE, true, MARGIN);
        writer.text(
            &clean(&format!(
                "Generated {} by resume-screener v{}",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC"),
                report.metadata.screener_version
            )),
            9.0,
            false,
            MARGIN,
        );
        writer.gap();

        writer.text(
            &clean(&format!(
                "Match Score: {}% ({})",
                format_score(report.final_score),
                report.label
            )),
            HEADING_SIZE,
            true,
            MARGIN,
        );
        writer.text(
            &format!(
                "Skill overlap {:.2}% | Text similarity {:.2}%",
                report.score_breakdown.overlap_score, report.score_breakdown.similarity_score
            ),
            BODY_SIZE,
            false,
            MARGIN,
        );
        writer.gap();

        writer.columns(("Matched Skills", "Missing Skills"), HEADING_SIZE, true);
        let rows = report.matched_skills.len().max(report.missing_skills.len()).max(1);
        for row in 0..rows {
            let cell = |skills: &[String]| match skills.get(row) {
                Some(skill) => format!("- {}", truncate_text(&clean(skill), COLUMN_CHARS)),
                None if row == 0 => "None detected.".to_string(),
                None => String::new(),
            };
            let left = cell(&report.matched_skills);
            let right = cell(&report.missing_skills);
            writer.columns((left.as_str(), right.as_str()), BODY_SIZE, false);
        }
        writer.gap();

        writer.text("Suggestions", HEADING_SIZE, true, MARGIN);
        if report.suggestions.is_empty() {
            writer.text("No suggestions. Your resume covers the basics.", BODY_SIZE, false, MARGIN);
        }
        for suggestion in &report.suggestions {
            writer.paragraph(&format!("- {}", clean(suggestion)), BODY_SIZE);
        }
        writer.gap();

        writer.text("Recommended Roles", HEADING_SIZE, true, MARGIN);
        if report.recommended_roles.is_empty() {
            writer.text("No matching roles found.", BODY_SIZE, false, MARGIN);
        }
        for role in &report.recommended_roles {
            writer.text(
                &clean(&format!(
                    "{} ({}% match)",
                    role.role,
                    format_score(role.match_percentage)
                )),
                BODY_SIZE,
                true,
                MARGIN,
            );
            writer.paragraph(&clean(&role.description), BODY_SIZE);
        }
        writer.gap();

        writer.text("Summary", HEADING_SIZE, true, MARGIN);
        writer.paragraph(&clean(&report.summary), BODY_SIZE);

        doc.save_to_bytes()
            .map_err(|e| anyhow!("{:?}", e))
            .context("Failed to serialize PDF")
    }
}

/// Top-down text cursor that starts a new page when the bottom margin is reached
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PageWriter<'_> {
    fn advance(&mut self, size: f32) {
        let line_height = size * 0.5;
        if self.y - line_height < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
        self.y -= line_height;
    }

    fn font(&self, bold: bool) -> &IndirectFontRef {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }

    fn text(&mut self, text: &str, size: f32, bold: bool, x: f32) {
        self.advance(size);
        self.layer
            .use_text(text, size, Mm(x), Mm(self.y), self.font(bold));
    }

    fn columns(&mut self, (left, right): (&str, &str), size: f32, bold: bool) {
        self.advance(size);
        let font = self.font(bold);
        self.layer.use_text(left, size, Mm(MARGIN), Mm(self.y), font);
        self.layer
            .use_text(right, size, Mm(SECOND_COLUMN), Mm(self.y), font);
    }

    fn paragraph(&mut self, text: &str, size: f32) {
        for line in wrap_words(text, FULL_WIDTH_CHARS) {
            self.text(&line, size, false, MARGIN);
        }
    }

    fn gap(&mut self) {
        self.y -= 4.0;
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
