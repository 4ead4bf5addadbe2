//! Input manager for handling different file types

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{extractor_for, guarded_extract};
use crate::processing::text_processor::TextProcessor;
use log::{info, warn};
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    processor: TextProcessor,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }

    /// Cleaned document text, or an empty string when extraction fails
    pub async fn extract_text(&self, path: &Path) -> String {
        match self.try_extract_text(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Text extraction failed for {}: {}", path.display(), e);
                String::new()
            }
        }
    }

    pub async fn try_extract_text(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        self.extract_bytes(&bytes, FileType::from_path(path))
    }

    pub fn extract_bytes(&self, bytes: &[u8], file_type: FileType) -> Result<String> {
        info!("Extracting {:?} document ({} bytes)", file_type, bytes.len());
        let raw = guarded_extract(extractor_for(file_type), file_type, bytes)?;
        Ok(self.processor.clean_text(&raw))
    }
}
