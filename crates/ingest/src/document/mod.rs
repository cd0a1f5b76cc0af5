mod pdf;

use thiserror::Error;

pub use pdf::extract_pdf;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF file not found: {0}")]
    FileNotFound(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
