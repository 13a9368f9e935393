//! Paragraph-based pseudo-headings
//!
//! Used only when [`crate::classify::classify_lines`] finds nothing. The text
//! is cut into paragraphs at blank lines, short paragraphs are dropped, and the
//! first line of each remaining paragraph becomes a heading. Pages are
//! estimated from the paragraph position, not from the page tracker.

use std::sync::LazyLock;

use regex::Regex;

use crate::profile::{FallbackSettings, FirstLineRule};
use crate::types::{HeadingCandidate, HeadingLevel};

/// One or more blank (or whitespace-only) lines.
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Split `text` into paragraphs, keeping empty and short ones.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK.split(text).collect()
}

/// Derive pseudo-headings from the paragraphs of `text`.
pub fn segment_paragraphs(text: &str, settings: &FallbackSettings) -> Vec<HeadingCandidate> {
    let per_page = settings.paragraphs_per_page.max(1);

    split_paragraphs(text)
        .into_iter()
        .filter(|paragraph| paragraph.trim().chars().count() > settings.min_paragraph_len)
        .take(settings.paragraph_count)
        .enumerate()
        .filter_map(|(index, paragraph)| {
            let first_line = paragraph.split('\n').next().unwrap_or_default().trim();
            let text = pseudo_heading_text(first_line, settings)?;
            Some(HeadingCandidate::new(
                level_for_position(index, settings),
                text,
                index / per_page + 1,
            ))
        })
        .collect()
}

/// Apply the profile's first-line rule. `None` means the paragraph yields no
/// heading but still occupies its position.
fn pseudo_heading_text(first_line: &str, settings: &FallbackSettings) -> Option<String> {
    let len = first_line.chars().count();
    if len == 0 || len >= settings.first_line_max_len {
        return None;
    }

    match &settings.first_line {
        FirstLineRule::Reject {
            max_len,
            reject_trailing_period,
        } => {
            if len >= *max_len || (*reject_trailing_period && first_line.ends_with('.')) {
                None
            } else {
                Some(first_line.to_string())
            }
        }
        FirstLineRule::Truncate {
            max_chars,
            ellipsis,
        } => {
            if len > *max_chars {
                let mut text: String = first_line.chars().take(*max_chars).collect();
                text.push_str(ellipsis);
                Some(text)
            } else {
                Some(first_line.to_string())
            }
        }
    }
}

fn level_for_position(index: usize, settings: &FallbackSettings) -> HeadingLevel {
    match settings.h1_positions {
        Some(limit) if index >= limit => HeadingLevel::H2,
        _ => HeadingLevel::H1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;

    fn paragraphs(heads: &[&str]) -> String {
        heads
            .iter()
            .map(|head| format!("{head}\nfollowed by enough body text to pass every length filter"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[test]
    fn test_split_paragraphs_on_blank_lines() {
        let parts = split_paragraphs("one\ntwo\n\nthree\n \n\n\nfour");
        assert_eq!(parts, vec!["one\ntwo", "three", "four"]);
    }

    #[test]
    fn test_split_paragraphs_crlf() {
        let parts = split_paragraphs("one\r\n\r\ntwo");
        assert_eq!(parts, vec!["one\r", "two"]);
    }

    #[test]
    fn test_batch_levels_and_pages() {
        let heads: Vec<String> = (1..=5).map(|i| format!("Topic number {i}")).collect();
        let refs: Vec<&str> = heads.iter().map(String::as_str).collect();
        let outline = segment_paragraphs(&paragraphs(&refs), &Profile::batch().fallback);

        let summary: Vec<(HeadingLevel, usize)> =
            outline.iter().map(|h| (h.level, h.page)).collect();
        assert_eq!(
            summary,
            vec![
                (HeadingLevel::H1, 1),
                (HeadingLevel::H1, 1),
                (HeadingLevel::H1, 1),
                (HeadingLevel::H2, 2),
                (HeadingLevel::H2, 2),
            ]
        );
        assert_eq!(outline[0].text, "Topic number 1");
    }

    #[test]
    fn test_batch_takes_at_most_ten_paragraphs() {
        let heads: Vec<String> = (1..=14).map(|i| format!("Topic number {i}")).collect();
        let refs: Vec<&str> = heads.iter().map(String::as_str).collect();
        let outline = segment_paragraphs(&paragraphs(&refs), &Profile::batch().fallback);

        assert_eq!(outline.len(), 10);
        assert_eq!(outline[9].text, "Topic number 10");
        assert_eq!(outline[9].page, 4);
    }

    #[test]
    fn test_batch_rejects_sentences_and_long_lines() {
        let long_head = "x".repeat(60);
        let text = paragraphs(&["Ends with a period.", &long_head, "Kept heading"]);
        let outline = segment_paragraphs(&text, &Profile::batch().fallback);

        // Rejected paragraphs still count towards the position.
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].text, "Kept heading");
        assert_eq!(outline[0].page, 1);
        assert_eq!(outline[0].level, HeadingLevel::H1);
    }

    #[test]
    fn test_short_paragraphs_are_discarded() {
        let text = "tiny\n\nalso small\n\nThis paragraph is long enough to keep";
        let outline = segment_paragraphs(text, &Profile::batch().fallback);

        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].text, "This paragraph is long enough to keep");
    }

    #[test]
    fn test_interactive_truncates_long_first_lines() {
        let head = "A".repeat(70);
        let text = paragraphs(&[&head]);
        let outline = segment_paragraphs(&text, &Profile::interactive().fallback);

        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].text, format!("{}...", "A".repeat(50)));
    }

    #[test]
    fn test_interactive_keeps_periods_and_counts_pages_per_paragraph() {
        let text = paragraphs(&["First sentence.", "Second sentence.", "Third sentence."]);
        let outline = segment_paragraphs(&text, &Profile::interactive().fallback);

        let pages: Vec<usize> = outline.iter().map(|h| h.page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
        assert!(outline.iter().all(|h| h.level == HeadingLevel::H1));
        assert_eq!(outline[0].text, "First sentence.");
    }

    #[test]
    fn test_interactive_takes_at_most_five_paragraphs() {
        let heads: Vec<String> = (1..=8).map(|i| format!("Heading {i}")).collect();
        let refs: Vec<&str> = heads.iter().map(String::as_str).collect();
        let outline = segment_paragraphs(&paragraphs(&refs), &Profile::interactive().fallback);
        assert_eq!(outline.len(), 5);
    }

    #[test]
    fn test_first_lines_at_max_length_are_dropped() {
        let head = "B".repeat(80);
        let text = paragraphs(&[&head]);
        assert!(segment_paragraphs(&text, &Profile::interactive().fallback).is_empty());
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(segment_paragraphs("", &Profile::batch().fallback).is_empty());
        assert!(segment_paragraphs("\n\n\n", &Profile::interactive().fallback).is_empty());
    }
}
