#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Failed to extract text from {path}: {message}")]
    Extraction { path: String, message: String },

    #[error("Unsupported input {0}: expected a PDF or a UTF-8 text file")]
    UnsupportedInput(String),

    #[error("Input directory does not exist: {0}")]
    MissingInputDir(String),

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{failed} of {total} file(s) failed")]
    BatchFailed { failed: usize, total: usize },
}
