//! Plain-text extraction from PDF documents.
//!
//! The outline engine only needs the text of a document, so this crate turns
//! PDF bytes into a single string. Each page's text starts with a form feed
//! (`\f`) so downstream consumers can tell pages apart, and paragraphs and
//! pages are separated by blank lines.

use thiserror::Error;

use parser::backend::LopdfBackend;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod parser;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text of a document together with the number of pages it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

/// Extract the text of every page from in-memory PDF bytes.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, PdfError> {
    let backend = LopdfBackend::load_bytes(bytes)?;
    let page_count = backend.page_count();
    let text = parser::text::extract_document_text(&backend)?;

    log::debug!(
        "extracted {} character(s) from {} page(s)",
        text.chars().count(),
        page_count
    );

    Ok(ExtractedText { text, page_count })
}

/// Read a PDF from disk and extract its text.
pub fn extract_text_from_path(path: &std::path::Path) -> Result<ExtractedText, PdfError> {
    let bytes = std::fs::read(path)?;
    extract_text(&bytes)
}
