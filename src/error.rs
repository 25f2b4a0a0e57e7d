// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid Google Drive folder link: {0}")]
    InvalidReference(String),

    #[error("Failed to download the folder or folder is empty: {0}")]
    EmptyOrUnavailableSource(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Error reading {}{}: {message}", .path.display(), page_suffix(.page))]
    PageRead {
        path: PathBuf,
        page: Option<u32>,
        message: String,
    },

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Search task failed: {0}")]
    Task(String),
}

fn page_suffix(page: &Option<u32>) -> String {
    page.map(|p| format!(" (page {})", p)).unwrap_or_default()
}

impl From<zip::result::ZipError> for SearchError {
    fn from(err: zip::result::ZipError) -> Self {
        SearchError::Archive(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Serialization(err.to_string())
    }
}
