//! Rule-based heading detection
//!
//! Each trimmed line is tested against four rules in a fixed order and the
//! first match wins:
//!
//! | Rule       | Example               | Level                        |
//! |------------|-----------------------|------------------------------|
//! | Numbered   | `2.3.1 Details`       | depth of the numeric prefix  |
//! | All caps   | `INTRODUCTION`        | H1                           |
//! | Chapter    | `Chapter 4 Results`   | H1                           |
//! | Title case | `Related Work Today`  | H2 (only before a blank line)|
//!
//! Only lines strictly between [`MIN_HEADING_LEN`] and [`MAX_HEADING_LEN`]
//! characters are eligible.

use std::sync::LazyLock;

use regex::Regex;

use crate::page::paginate;
use crate::types::{HeadingCandidate, HeadingLevel};

pub const MIN_HEADING_LEN: usize = 3;
pub const MAX_HEADING_LEN: usize = 100;

const MIN_ALL_CAPS_LEN: usize = 5;
const MIN_TITLE_CASE_LEN: usize = 10;

static NUMBERED_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.(?:\d+\.)*\d*)\s+(.+)$").unwrap());

static ALL_CAPS_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z\s]+$").unwrap());

static CHAPTER_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:chapter|section|part)\s+\d+").unwrap());

static TITLE_CASE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]*)*$").unwrap());

/// Which rule produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingRule {
    Numbered,
    AllCaps,
    Chapter,
    TitleCase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub rule: HeadingRule,
    pub level: HeadingLevel,
    pub text: String,
}

/// Scan `text` line by line and return every heading candidate in reading
/// order. Pages come from [`paginate`].
pub fn classify_lines(text: &str) -> Vec<HeadingCandidate> {
    let lines = paginate(text);

    lines
        .iter()
        .enumerate()
        .filter_map(|(i, &(page, raw))| {
            let next = lines.get(i + 1).map(|&(_, line)| line);
            classify_line(raw.trim(), next)
                .map(|found| HeadingCandidate::new(found.level, found.text, page))
        })
        .collect()
}

/// Classify a single trimmed line. `next` is the raw line that follows it,
/// if any; only the title-case rule looks at it.
pub fn classify_line(line: &str, next: Option<&str>) -> Option<Classification> {
    let len = line.chars().count();
    if len <= MIN_HEADING_LEN || len >= MAX_HEADING_LEN {
        return None;
    }

    if let Some(caps) = NUMBERED_HEADING.captures(line) {
        let depth = caps[1].split('.').filter(|part| !part.is_empty()).count();
        return Some(Classification {
            rule: HeadingRule::Numbered,
            level: HeadingLevel::from_depth(depth),
            text: caps[2].trim().to_string(),
        });
    }

    if is_all_caps(line, len) {
        return Some(Classification {
            rule: HeadingRule::AllCaps,
            level: HeadingLevel::H1,
            text: line.to_string(),
        });
    }

    if CHAPTER_HEADING.is_match(line) {
        return Some(Classification {
            rule: HeadingRule::Chapter,
            level: HeadingLevel::H1,
            text: line.to_string(),
        });
    }

    if len > MIN_TITLE_CASE_LEN
        && TITLE_CASE_HEADING.is_match(line)
        && next.is_none_or(|n| n.trim().is_empty())
    {
        return Some(Classification {
            rule: HeadingRule::TitleCase,
            level: HeadingLevel::H2,
            text: line.to_string(),
        });
    }

    None
}

fn is_all_caps(line: &str, len: usize) -> bool {
    len > MIN_ALL_CAPS_LEN
        && line.to_uppercase() == line
        && !line.chars().any(|c| c.is_ascii_digit())
        && ALL_CAPS_HEADING.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> Option<Classification> {
        classify_line(line, None)
    }

    #[test]
    fn test_numbered_heading_levels() {
        let h1 = classify("1. Intro").unwrap();
        assert_eq!(h1.rule, HeadingRule::Numbered);
        assert_eq!(h1.level, HeadingLevel::H1);
        assert_eq!(h1.text, "Intro");

        let h2 = classify("2.3 Details").unwrap();
        assert_eq!(h2.level, HeadingLevel::H2);
        assert_eq!(h2.text, "Details");

        let h3 = classify("2.3.1 Sub").unwrap();
        assert_eq!(h3.level, HeadingLevel::H3);
        assert_eq!(h3.text, "Sub");
    }

    #[test]
    fn test_numbered_heading_deep_nesting_is_h3() {
        let found = classify("4.1.2.7. Edge Cases").unwrap();
        assert_eq!(found.level, HeadingLevel::H3);
        assert_eq!(found.text, "Edge Cases");
    }

    #[test]
    fn test_numbered_heading_trailing_period_groups() {
        let found = classify("1.2. Scope").unwrap();
        assert_eq!(found.level, HeadingLevel::H2);
        assert_eq!(found.text, "Scope");
    }

    #[test]
    fn test_number_without_period_is_not_numbered() {
        assert!(classify("12 Angry Men").is_none());
    }

    #[test]
    fn test_numbered_heading_requires_space() {
        assert!(classify("1.Intro").is_none());
    }

    #[test]
    fn test_all_caps_heading() {
        let found = classify("INTRODUCTION").unwrap();
        assert_eq!(found.rule, HeadingRule::AllCaps);
        assert_eq!(found.level, HeadingLevel::H1);
        assert_eq!(found.text, "INTRODUCTION");
    }

    #[test]
    fn test_all_caps_with_spaces() {
        let found = classify("RELATED WORK").unwrap();
        assert_eq!(found.rule, HeadingRule::AllCaps);
    }

    #[test]
    fn test_all_caps_too_short() {
        assert!(classify("ABSTR").is_none());
        assert!(classify("ABSTRA").is_some());
    }

    #[test]
    fn test_all_caps_rejects_digits_and_punctuation() {
        // Falls through to the chapter rule instead.
        let found = classify("CHAPTER 12").unwrap();
        assert_eq!(found.rule, HeadingRule::Chapter);

        assert!(classify("WARNING: HOT").is_none());
    }

    #[test]
    fn test_chapter_section_part_headings() {
        for line in ["Chapter 1 Overview", "SECTION 4", "part 2 methods"] {
            let found = classify(line).unwrap();
            assert_eq!(found.rule, HeadingRule::Chapter, "{line}");
            assert_eq!(found.level, HeadingLevel::H1);
            assert_eq!(found.text, line);
        }
    }

    #[test]
    fn test_chapter_requires_number() {
        assert!(classify("Chapter one begins here").is_none());
    }

    #[test]
    fn test_title_case_heading_before_blank_line() {
        let found = classify_line("Related Work Today", Some("   ")).unwrap();
        assert_eq!(found.rule, HeadingRule::TitleCase);
        assert_eq!(found.level, HeadingLevel::H2);
        assert_eq!(found.text, "Related Work Today");
    }

    #[test]
    fn test_title_case_heading_at_end_of_text() {
        assert!(classify_line("Final Thoughts", None).is_some());
    }

    #[test]
    fn test_title_case_heading_followed_by_text_is_ignored() {
        assert!(classify_line("Final Thoughts", Some("The end.")).is_none());
    }

    #[test]
    fn test_title_case_needs_length_and_capitals() {
        assert!(classify_line("Short One", None).is_none());
        assert!(classify_line("Results and discussion", None).is_none());
    }

    #[test]
    fn test_length_bounds() {
        assert!(classify("ABC").is_none());
        assert!(classify("1. A").is_some());
        let long = format!("1. {}", "x".repeat(97));
        assert_eq!(long.chars().count(), 100);
        assert!(classify(&long).is_none());
        let just_fits = format!("1. {}", "x".repeat(96));
        assert!(classify(&just_fits).is_some());
    }

    #[test]
    fn test_plain_sentence_is_not_a_heading() {
        assert!(classify("Some body text.").is_none());
        assert!(classify("More text.").is_none());
    }

    #[test]
    fn test_classify_lines_preserves_order_and_pages() {
        let text = "INTRODUCTION\nbody\n\u{000C}2. Methods\nbody\n\n3\nCONCLUSION";
        let outline = classify_lines(text);

        assert_eq!(
            outline,
            vec![
                HeadingCandidate::new(HeadingLevel::H1, "INTRODUCTION", 1),
                HeadingCandidate::new(HeadingLevel::H1, "Methods", 1),
                HeadingCandidate::new(HeadingLevel::H1, "CONCLUSION", 2),
            ]
        );
    }

    #[test]
    fn test_classify_lines_empty_text() {
        assert!(classify_lines("").is_empty());
    }

    #[test]
    fn test_classify_lines_handles_crlf() {
        let outline = classify_lines("1. Intro\r\nbody\r\n");
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].text, "Intro");
    }
}
