use std::path::Path;

use crate::prelude::*;

/// Raw text of one input document, ready for the outline engine.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// File name used to derive the outline title.
    pub name: String,
    pub text: String,
    /// Only known for PDF inputs.
    pub page_count: Option<usize>,
}

/// Whether `path` names a PDF, judged by its extension in any case.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// File name component of `path`, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load `path` as text. PDFs go through the extractor; anything else must be
/// pre-extracted UTF-8 text.
pub fn load(path: &Path) -> Result<SourceDocument, Error> {
    let name = display_name(path);

    if is_pdf(path) {
        let extracted =
            pdf::extract_text_from_path(path).map_err(|e| Error::Extraction {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        return Ok(SourceDocument {
            name,
            text: extracted.text,
            page_count: Some(extracted.page_count),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| Error::Extraction {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let text =
        String::from_utf8(bytes).map_err(|_| Error::UnsupportedInput(path.display().to_string()))?;

    Ok(SourceDocument {
        name,
        text,
        page_count: None,
    })
}
