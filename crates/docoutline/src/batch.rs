use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use docoutline_core::export::to_pretty_json;
use docoutline_core::outline::extract_document_structure;
use docoutline_core::profile::{Profile, ProfileKind};
use docoutline_core::types::DocumentStructure;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug, clap::Args)]
pub struct App {
    /// Directory scanned for `.pdf` files
    #[arg(long, env = "DOCOUTLINE_INPUT_DIR", default_value = "/app/input")]
    pub input: PathBuf,

    /// Directory receiving one `<name>.json` per input file
    #[arg(long, env = "DOCOUTLINE_OUTPUT_DIR", default_value = "/app/output")]
    pub output: PathBuf,

    /// Number of files processed concurrently (default: available cores)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Suppress the per-file lines and the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the batch report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Result of processing one input file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FileOutcome {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub headings: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    fn succeeded(file: String, output: &Path, structure: &DocumentStructure) -> Self {
        FileOutcome {
            file,
            output: Some(output.display().to_string()),
            title: Some(structure.title.clone()),
            headings: structure.outline.len(),
            error: None,
        }
    }

    fn failed(file: String, error: impl ToString) -> Self {
        FileOutcome {
            file,
            output: None,
            title: None,
            headings: 0,
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BatchReport {
    pub input_dir: String,
    pub output_dir: String,
    pub files: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.succeeded()
    }
}

/// PDF files directly inside `dir`, sorted by path. Only a lowercase `.pdf`
/// suffix qualifies.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    if !dir.is_dir() {
        return Err(Error::MissingInputDir(dir.display().to_string()));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| Error::Extraction {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".pdf"))
        })
        .collect();

    files.sort();
    Ok(files)
}

/// `<output_dir>/<input stem>.json`
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let name = Path::new(input.file_name().unwrap_or(input.as_os_str())).with_extension("json");
    output_dir.join(name)
}

/// Extract one file and write its JSON outline next to the others.
pub fn process_file(
    input: &Path,
    output_dir: &Path,
    profile: &Profile,
) -> Result<(DocumentStructure, PathBuf), Error> {
    let doc = crate::source::load(input)?;
    let structure = extract_document_structure(&doc.name, &doc.text, profile);

    let path = output_path(output_dir, input);
    let json = to_pretty_json(&structure).map_err(|e| Error::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    std::fs::write(&path, json).map_err(|e| Error::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok((structure, path))
}

/// Per-file line printed once a document was written.
pub fn processed_line(file: &str, structure: &DocumentStructure) -> String {
    f!(
        "{} {}: \"{}\", {} heading(s) found",
        "Processed".green(),
        file,
        structure.title,
        structure.outline.len()
    )
}

/// Process `files` with at most `jobs` extractions in flight. Outcomes keep
/// the order of `files`; one failing file never stops the others. With
/// `announce`, a [`processed_line`] is printed for every success.
pub async fn process_files(
    files: Vec<PathBuf>,
    output_dir: &Path,
    profile: Arc<Profile>,
    jobs: usize,
    progress: &ProgressBar,
    announce: bool,
) -> Vec<FileOutcome> {
    let mut results = stream::iter(files)
        .map(|path| {
            let profile = Arc::clone(&profile);
            let output_dir = output_dir.to_path_buf();
            async move {
                let file = crate::source::display_name(&path);
                let result = tokio::task::spawn_blocking(move || {
                    process_file(&path, &output_dir, &profile)
                })
                .await;
                (file, result)
            }
        })
        .buffered(jobs.max(1));

    let mut outcomes = Vec::new();

    while let Some((file, result)) = results.next().await {
        let outcome = match result {
            Ok(Ok((structure, path))) => {
                log::info!("{}: written to {}", file, path.display());
                if announce {
                    progress.suspend(|| println!("{}", processed_line(&file, &structure)));
                }
                FileOutcome::succeeded(file, &path, &structure)
            }
            Ok(Err(err)) => {
                log::warn!("{}: {}", file, err);
                FileOutcome::failed(file, err)
            }
            Err(err) => {
                log::error!("{}: worker failed: {}", file, err);
                FileOutcome::failed(file, err)
            }
        };

        progress.set_message(outcome.file.clone());
        progress.inc(1);
        outcomes.push(outcome);
    }

    outcomes
}

/// Scan `input_dir`, create `output_dir` if needed, and process every PDF.
pub async fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    profile: Profile,
    jobs: usize,
    progress: &ProgressBar,
    announce: bool,
) -> Result<BatchReport> {
    let files = discover_pdfs(input_dir)?;

    std::fs::create_dir_all(output_dir).map_err(|e| Error::Write {
        path: output_dir.display().to_string(),
        message: e.to_string(),
    })?;

    progress.set_length(files.len() as u64);
    let outcomes = process_files(
        files,
        output_dir,
        Arc::new(profile),
        jobs,
        progress,
        announce,
    )
    .await;

    Ok(BatchReport {
        input_dir: input_dir.display().to_string(),
        output_dir: output_dir.display().to_string(),
        files: outcomes,
    })
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap(),
    );
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    bar
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let profile = crate::config::resolve_profile(&global, ProfileKind::Batch)?;
    let jobs = app.jobs.unwrap_or_else(default_jobs);

    if global.verbose {
        eprintln!(
            "Processing {} into {} with {} job(s)",
            app.input.display(),
            app.output.display(),
            jobs
        );
    }

    let progress = progress_bar(app.quiet || app.json);
    let announce = !(app.quiet || app.json);
    let report =
        process_directory(&app.input, &app.output, profile, jobs, &progress, announce).await?;
    progress.finish_and_clear();

    if report.files.is_empty() {
        eprintln!("No PDF files found in {}", app.input.display());
        return Ok(());
    }

    if app.json {
        let json_output = serde_json::to_string_pretty(&report)
            .map_err(|e| eyre!("Failed to serialize output: {}", e))?;
        println!("{}", json_output);
    } else {
        print_report(&report, app.quiet);
    }

    let failed = report.failed();
    if failed > 0 {
        return Err(Error::BatchFailed {
            failed,
            total: report.files.len(),
        }
        .into());
    }

    Ok(())
}

fn print_report(report: &BatchReport, quiet: bool) {
    if !quiet {
        println!(
            "\nProcessed {} PDF file(s) from {}:\n",
            report.files.len().to_string().bold(),
            report.input_dir
        );

        let mut table = new_table();
        table.add_row(prettytable::row![
            "File".bold().cyan(),
            "Title".bold().cyan(),
            "Headings".bold().cyan(),
            "Result".bold().cyan()
        ]);

        for outcome in &report.files {
            let result = match &outcome.error {
                None => "ok".green(),
                Some(err) => err.red(),
            };
            table.add_row(prettytable::row![
                outcome.file.bright_white(),
                outcome.title.as_deref().unwrap_or("-").bright_magenta(),
                outcome.headings.to_string().bright_yellow(),
                result
            ]);
        }

        table.printstd();
    }

    println!(
        "\n{} succeeded, {} failed. Outlines written to {}",
        report.succeeded().to_string().green(),
        report.failed().to_string().red(),
        report.output_dir
    );
}
