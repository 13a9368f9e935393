use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::prelude::{eprint, eprintln, println, *};
use crate::render::{format_outline, format_summary, headings_message, OutputFormat};
use colored::Colorize;
use docoutline_core::export::{export_file_name, to_pretty_json};
use docoutline_core::outline::extract_document_structure;
use docoutline_core::profile::ProfileKind;
use docoutline_core::types::DocumentStructure;

#[derive(Debug, clap::Args)]
pub struct App {
    /// Path to a PDF or to a pre-extracted UTF-8 text file
    pub path: PathBuf,

    /// Output format: indented, markdown, or json (default: indented)
    #[arg(long, env = "DOCOUTLINE_OUTPUT", default_value = "indented")]
    pub output: OutputFormat,

    /// Output as JSON (alias for --output json)
    #[arg(long)]
    pub json: bool,

    /// Save the JSON export into this directory as `<title>_outline.json`
    #[arg(long)]
    pub save: Option<PathBuf>,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let profile = crate::config::resolve_profile(&global, ProfileKind::Interactive)?;

    if global.verbose {
        eprintln!(
            "Profile: cap {}, fallback {} paragraph(s) over {} chars",
            profile.outline_cap,
            profile.fallback.paragraph_count,
            profile.fallback.min_paragraph_len
        );
    }

    let structure = tokio::task::spawn_blocking({
        let path = app.path.clone();
        move || -> Result<DocumentStructure> {
            let doc = crate::source::load(&path)?;
            log::debug!(
                "{}: {} character(s), {:?} page(s)",
                doc.name,
                doc.text.chars().count(),
                doc.page_count
            );
            Ok(extract_document_structure(&doc.name, &doc.text, &profile))
        }
    })
    .await??;

    // --json flag takes precedence
    let format = if app.json {
        OutputFormat::Json
    } else {
        app.output
    };

    if let Some(dir) = &app.save {
        let saved = save_export(&structure, dir)?;
        eprintln!("{} {}", "Saved".green(), saved.display());
    }

    let content = format_outline(&structure, format)?;

    if std::io::stdout().is_terminal() && !matches!(format, OutputFormat::Json) {
        let source = app.path.display().to_string();
        eprint!("{}", format_summary(&structure, &source, format));
        for line in content.lines() {
            println!("{}", line.white());
        }
    } else if !content.is_empty() {
        println!("{}", content);
    }

    eprintln!("{}", headings_message(&structure));

    Ok(())
}

/// Write the JSON export of `structure` into `dir`, creating it if needed.
pub fn save_export(structure: &DocumentStructure, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| f!("Failed to create directory {}", dir.display()))?;

    let path = dir.join(export_file_name(&structure.title));
    let json = to_pretty_json(structure).map_err(|e| eyre!("JSON serialization failed: {}", e))?;

    std::fs::write(&path, json).map_err(|e| Error::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(path)
}
