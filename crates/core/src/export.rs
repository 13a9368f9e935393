//! JSON export helpers for the presentation layer.

use crate::types::DocumentStructure;

/// Pretty-printed JSON in the `{ "title", "outline": [...] }` shape.
pub fn to_pretty_json(structure: &DocumentStructure) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(structure)
}

/// File name offered when an outline is saved, e.g. `Annual_Report_2024_outline.json`.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`.
pub fn export_file_name(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{sanitized}_outline.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HeadingCandidate, HeadingLevel};

    #[test]
    fn test_export_file_name_sanitizes_title() {
        assert_eq!(
            export_file_name("Annual Report 2024"),
            "Annual_Report_2024_outline.json"
        );
        assert_eq!(export_file_name("Q&A: été"), "Q_A___t__outline.json");
    }

    #[test]
    fn test_to_pretty_json_roundtrips() {
        let structure = DocumentStructure {
            title: "Guide".to_string(),
            outline: vec![HeadingCandidate::new(HeadingLevel::H3, "Details", 4)],
        };

        let json = to_pretty_json(&structure).unwrap();
        assert!(json.contains("\"level\": \"H3\""));
        assert!(json.contains("\"page\": 4"));

        let parsed: DocumentStructure = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, structure);
    }
}
