use crate::prelude::*;
use colored::Colorize;
use docoutline_core::types::{DocumentStructure, HeadingCandidate};

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented text format (2 spaces per level)
    Indented,
    /// Markdown nested list format
    Markdown,
    /// JSON format with structured data
    Json,
}

/// Format the outline as indented text (2 spaces per level) with page numbers
pub fn format_outline_indented(outline: &[HeadingCandidate]) -> String {
    outline
        .iter()
        .map(|heading| {
            let indent = "  ".repeat(heading.level.depth() - 1);
            f!("{}{}  (p. {})", indent, heading.text, heading.page)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the outline as a markdown nested list with page numbers
pub fn format_outline_markdown(outline: &[HeadingCandidate]) -> String {
    outline
        .iter()
        .map(|heading| {
            let indent = "  ".repeat(heading.level.depth() - 1);
            f!("{}* {} (p. {})", indent, heading.text, heading.page)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the document structure as a JSON string
pub fn format_output_json(structure: &DocumentStructure) -> Result<String> {
    docoutline_core::export::to_pretty_json(structure)
        .map_err(|e| eyre!("JSON serialization failed: {}", e))
}

pub fn format_outline(structure: &DocumentStructure, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Indented => Ok(format_outline_indented(&structure.outline)),
        OutputFormat::Markdown => Ok(format_outline_markdown(&structure.outline)),
        OutputFormat::Json => format_output_json(structure),
    }
}

/// One-line summary shown after a document was processed.
pub fn headings_message(structure: &DocumentStructure) -> String {
    match structure.outline.len() {
        1 => "Extracted 1 heading from the document".to_string(),
        n => f!("Extracted {} headings from the document", n),
    }
}

/// Decorated header with title, source and heading statistics
pub fn format_summary(structure: &DocumentStructure, source: &str, format: OutputFormat) -> String {
    let counts = structure.heading_counts();
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!("{}\n", "DOCUMENT OUTLINE".bright_cyan().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&f!(
        "\n{}: {}\n",
        "Title".green(),
        structure.title.bright_white().bold()
    ));
    result.push_str(&f!("{}: {}\n", "Source".green(), source.cyan()));

    result.push_str(&f!(
        "{}: {} ({} H1, {} H2, {} H3)\n",
        "Total Headings".green(),
        counts.total().to_string().bright_yellow().bold(),
        counts.h1,
        counts.h2,
        counts.h3
    ));

    if structure.is_empty() {
        result.push_str(&f!(
            "\n{}\n",
            "No headings detected in this document.".yellow()
        ));
    }

    if !matches!(format, OutputFormat::Json) {
        result.push_str(&f!(
            "\n{}:\n  {}\n",
            "To get JSON output".bright_white().bold(),
            f!("docoutline extract {} --json", source).cyan()
        ));
    }

    result.push('\n');

    result
}
