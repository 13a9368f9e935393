//! Outline assembly and the top-level extraction entry point.

use crate::classify::classify_lines;
use crate::fallback::segment_paragraphs;
use crate::profile::Profile;
use crate::types::{DocumentStructure, HeadingCandidate};

/// Title used when the source identifier is blank.
pub const UNTITLED: &str = "Untitled";

/// Turn extracted `text` into a [`DocumentStructure`].
///
/// `source_id` is the file or upload name and is only used for the title.
/// Rule-based headings are preferred; the paragraph fallback runs only when no
/// line matched a rule. The result never holds more than
/// `profile.outline_cap` entries.
pub fn extract_document_structure(
    source_id: &str,
    text: &str,
    profile: &Profile,
) -> DocumentStructure {
    let mut outline = classify_lines(text);
    if outline.is_empty() {
        outline = segment_paragraphs(text, &profile.fallback);
    }

    assemble(derive_title(source_id), outline, profile.outline_cap)
}

/// Derive a display title from a file name.
///
/// Strips a trailing `.pdf` (case-sensitive), turns `_` and `-` into spaces
/// and trims. When nothing is left the trimmed identifier is used as is, and
/// [`UNTITLED`] when the identifier itself is blank.
///
/// `"Annual-Report_2024.pdf"` becomes `"Annual Report 2024"`.
pub fn derive_title(source_id: &str) -> String {
    let stem = source_id.strip_suffix(".pdf").unwrap_or(source_id);
    let spaced: String = stem
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();

    let title = spaced.trim();
    if !title.is_empty() {
        return title.to_string();
    }

    let raw = source_id.trim();
    if !raw.is_empty() {
        return raw.to_string();
    }

    UNTITLED.to_string()
}

/// Keep the first `cap` candidates in their original order.
pub fn assemble(title: String, candidates: Vec<HeadingCandidate>, cap: usize) -> DocumentStructure {
    let outline = candidates.into_iter().take(cap).collect();
    DocumentStructure { title, outline }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HeadingLevel;

    #[test]
    fn test_derive_title_from_filename() {
        assert_eq!(derive_title("Annual-Report_2024.pdf"), "Annual Report 2024");
    }

    #[test]
    fn test_derive_title_suffix_is_case_sensitive() {
        assert_eq!(derive_title("SCAN.PDF"), "SCAN.PDF");
    }

    #[test]
    fn test_derive_title_only_strips_trailing_suffix() {
        assert_eq!(derive_title("my.pdf.notes.txt"), "my.pdf.notes.txt");
        assert_eq!(derive_title("notes.pdf.pdf"), "notes.pdf");
    }

    #[test]
    fn test_derive_title_trims_separators() {
        assert_eq!(derive_title("__draft--v2__.pdf"), "draft  v2");
    }

    #[test]
    fn test_derive_title_falls_back_to_identifier() {
        assert_eq!(derive_title("___.pdf"), "___.pdf");
        assert_eq!(derive_title(".pdf"), ".pdf");
        assert_eq!(derive_title(""), UNTITLED);
        assert_eq!(derive_title("   "), UNTITLED);
    }

    #[test]
    fn test_assemble_takes_prefix() {
        let candidates: Vec<HeadingCandidate> = (0..5)
            .map(|i| HeadingCandidate::new(HeadingLevel::H1, format!("H{i}"), 1))
            .collect();
        let structure = assemble("T".to_string(), candidates, 3);

        let texts: Vec<&str> = structure.outline.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["H0", "H1", "H2"]);
    }

    #[test]
    fn test_end_to_end_batch() {
        let text = "Chapter 1 Overview\n\nSome body text.\n\n2. Background\n\nMore text.";
        let structure = extract_document_structure("overview.pdf", text, &Profile::batch());

        assert_eq!(structure.title, "overview");
        assert_eq!(
            structure.outline,
            vec![
                HeadingCandidate::new(HeadingLevel::H1, "Chapter 1 Overview", 1),
                HeadingCandidate::new(HeadingLevel::H1, "Background", 1),
            ]
        );
    }

    #[test]
    fn test_empty_text_gives_empty_outline() {
        for profile in [Profile::batch(), Profile::interactive()] {
            let structure = extract_document_structure("Empty_File.pdf", "", &profile);
            assert_eq!(structure.title, "Empty File");
            assert!(structure.outline.is_empty());
        }
    }

    #[test]
    fn test_outline_capped_per_profile() {
        let text: String = (1..=80).map(|i| format!("{i}. Heading\n")).collect();

        let batch = extract_document_structure("doc.pdf", &text, &Profile::batch());
        assert_eq!(batch.outline.len(), 50);
        assert_eq!(batch.outline[49].text, "Heading");

        let interactive = extract_document_structure("doc.pdf", &text, &Profile::interactive());
        assert_eq!(interactive.outline.len(), 20);
    }

    #[test]
    fn test_fallback_engages_without_rule_matches() {
        let text = "this opening paragraph has no heading markup at all\nit just keeps going\n\n\
                    another paragraph that also lacks any markup whatsoever\n\n\
                    and a third one that is long enough to count for sure";
        let structure = extract_document_structure("notes.pdf", text, &Profile::batch());

        assert_eq!(structure.outline.len(), 3);
        assert!(structure.outline.len() <= Profile::batch().fallback.paragraph_count);
        assert_eq!(
            structure.outline[0].text,
            "this opening paragraph has no heading markup at all"
        );
    }

    #[test]
    fn test_fallback_not_used_when_rules_match() {
        let text = "INTRODUCTION\n\nthis paragraph is long enough to be a pseudo heading";
        let structure = extract_document_structure("doc.pdf", text, &Profile::batch());

        assert_eq!(structure.outline.len(), 1);
        assert_eq!(structure.outline[0].text, "INTRODUCTION");
    }

    #[test]
    fn test_order_follows_source_text() {
        let text = "3. Third\nSECOND PART\n1. First\nChapter 9 Last";
        let structure = extract_document_structure("doc.pdf", text, &Profile::batch());

        let texts: Vec<&str> = structure.outline.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["Third", "SECOND PART", "First", "Chapter 9 Last"]);
    }

    #[test]
    fn test_pages_are_positive() {
        let text = "\u{000C}1. One\n\n2\n2. Two\n\u{000C}\u{000C}3. Three\n\n\n4\n4. Four";
        let structure = extract_document_structure("doc.pdf", text, &Profile::batch());

        assert_eq!(structure.outline.len(), 4);
        assert!(structure.outline.iter().all(|h| h.page >= 1));
        let pages: Vec<usize> = structure.outline.iter().map(|h| h.page).collect();
        assert_eq!(pages, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "1. Intro\nbody\n\nRELATED WORK\n\n2.1 Prior Art\n";
        let first = extract_document_structure("doc.pdf", text, &Profile::interactive());
        let second = extract_document_structure("doc.pdf", text, &Profile::interactive());

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
