//! Text extraction from various file formats

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use log::{debug, warn};
use pulldown_cmark::{Event, Parser, Tag};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// A PDF text layer at or below this many characters is retried with lopdf
const MIN_PDF_TEXT_CHARS: usize = 20;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Extractor for a declared file type; unknown types are read as text
pub fn extractor_for(file_type: FileType) -> &'static dyn TextExtractor {
    match file_type {
        FileType::Pdf => &PdfExtractor,
        FileType::Docx => &DocxExtractor,
        FileType::Image => &ImageExtractor,
        FileType::Markdown => &MarkdownExtractor,
        FileType::Text | FileType::Unknown => &PlainTextExtractor,
    }
}

/// Runs `extractor`, reporting a panic inside a parsing library as an extraction error
pub fn guarded_extract(
    extractor: &dyn TextExtractor,
    file_type: FileType,
    bytes: &[u8],
) -> Result<String> {
    catch_parser_panic(file_type, || extractor.extract(bytes))
}

fn catch_parser_panic<F>(file_type: FileType, f: F) -> Result<String>
where
    F: FnOnce() -> Result<String>,
{
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(panic_error(file_type, payload.as_ref())))
}

fn panic_error(file_type: FileType, payload: &(dyn Any + Send)) -> ScreenerError {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    let message = format!("{:?} parser panicked: {}", file_type, detail);

    match file_type {
        FileType::Pdf => ScreenerError::PdfExtraction(message),
        FileType::Docx => ScreenerError::DocxExtraction(message),
        FileType::Image => ScreenerError::Ocr(message),
        FileType::Text | FileType::Markdown | FileType::Unknown => {
            ScreenerError::TextProcessing(message)
        }
    }
}

/// pdf-extract first; lopdf when that fails, panics or finds almost no text
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let primary = catch_parser_panic(FileType::Pdf, || Self::extract_with_pdf_extract(bytes));
        prefer_text_layer(primary, || {
            catch_parser_panic(FileType::Pdf, || Self::extract_with_lopdf(bytes))
        })
    }
}

impl PdfExtractor {
    fn extract_with_pdf_extract(bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ScreenerError::PdfExtraction(format!("Failed to extract text from PDF: {}", e))
        })
    }

    fn extract_with_lopdf(bytes: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| ScreenerError::PdfExtraction(format!("Failed to parse PDF: {}", e)))?;
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        doc.extract_text(&pages).map_err(|e| {
            ScreenerError::PdfExtraction(format!("Failed to extract text from PDF: {}", e))
        })
    }
}

fn visible_chars(text: &str) -> usize {
    text.split_whitespace().map(|word| word.chars().count() + 1).sum::<usize>().saturating_sub(1)
}

/// Keeps a substantial primary text layer, otherwise takes the fallback's text.
/// A short primary result survives when the fallback fails.
fn prefer_text_layer<F>(primary: Result<String>, fallback: F) -> Result<String>
where
    F: FnOnce() -> Result<String>,
{
    match primary {
        Ok(text) if visible_chars(&text) > MIN_PDF_TEXT_CHARS => Ok(text),
        Ok(short) => {
            debug!(
                "PDF text layer has {} characters, retrying with lopdf",
                visible_chars(&short)
            );
            fallback().or_else(|e| {
                warn!("lopdf fallback failed: {}", e);
                Ok(short)
            })
        }
        Err(e) => {
            warn!("{}; retrying with lopdf", e);
            fallback()
        }
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| ScreenerError::DocxExtraction(format!("DOCX parse error: {}", e)))?;

        let mut lines = Vec::new();
        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => {
                    lines.push(Self::paragraph_text(paragraph));
                }
                docx_rs::DocumentChild::Table(table) => {
                    for table_child in &table.rows {
                        let docx_rs::TableChild::TableRow(row) = table_child;
                        for row_child in &row.cells {
                            let docx_rs::TableRowChild::TableCell(cell) = row_child;
                            for content in &cell.children {
                                if let docx_rs::TableCellContent::Paragraph(paragraph) = content {
                                    lines.push(Self::paragraph_text(paragraph));
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(lines.join("\n"))
    }
}

impl DocxExtractor {
    fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
        let mut text = String::new();
        for child in &paragraph.children {
            if let docx_rs::ParagraphChild::Run(run) = child {
                for run_child in &run.children {
                    if let docx_rs::RunChild::Text(t) = run_child {
                        text.push_str(&t.text);
                    }
                }
            }
        }
        text
    }
}

/// OCR for PNG/JPEG resumes; needs the `ocr` feature and a Tesseract install
pub struct ImageExtractor;

impl TextExtractor for ImageExtractor {
    #[cfg(feature = "ocr")]
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut tesseract = leptess::LepTess::new(None, "eng")
            .map_err(|e| ScreenerError::Ocr(format!("Failed to initialize Tesseract: {}", e)))?;
        tesseract
            .set_image_from_mem(bytes)
            .map_err(|e| ScreenerError::Ocr(format!("Failed to set image: {}", e)))?;
        tesseract
            .get_utf8_text()
            .map_err(|e| ScreenerError::Ocr(format!("Failed to extract text: {}", e)))
    }

    #[cfg(not(feature = "ocr"))]
    fn extract(&self, _bytes: &[u8]) -> Result<String> {
        Err(ScreenerError::UnsupportedFormat(
            "image OCR requires building with the `ocr` feature".to_string(),
        ))
    }
}

/// UTF-8 decoding that drops invalid bytes
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(bytes).replace('\u{FFFD}', ""))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown = PlainTextExtractor.extract(bytes)?;

        let mut text = String::new();
        for event in Parser::new(&markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push(' '),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        Ok(text.trim_end().to_string())
    }
}
