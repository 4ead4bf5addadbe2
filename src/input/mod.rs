//! Input processing module
//! Handles file detection, text extraction, and input management

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

#[cfg(test)]
pub(crate) mod pdf_fixture;

pub use manager::InputManager;
