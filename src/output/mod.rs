//! Report composition and rendering

pub mod formatter;
pub mod pdf;
pub mod report;

pub use formatter::ReportGenerator;
pub use report::{FitLabel, ScreeningReport};
