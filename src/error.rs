use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum QrisError {
    #[error("Format error: {0}")]
    #[diagnostic(
        code(qris::format),
        help("check that the payload was decoded completely from a QRIS code")
    )]
    FormatError(String),
    #[error("Value error: {0}")]
    #[diagnostic(code(qris::value))]
    ValueError(String),
    #[error("Source error: {0}")]
    #[diagnostic(code(qris::source))]
    SourceError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QrisError>;
