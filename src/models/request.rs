// file: src/models/request.rs
// description: explicit search request passed into the core
// reference: replaces ui-bound selection and text field state

use crate::error::{Result, SearchError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    /// Public Google Drive folder link
    #[value(name = "drive")]
    DriveLink,
    /// Zip archive of PDFs
    #[value(name = "zip")]
    ZipArchive,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::DriveLink => f.write_str("Google Drive link"),
            SourceKind::ZipArchive => f.write_str("ZIP file upload"),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    DriveLink(String),
    Archive(Vec<u8>),
}

impl SourceDescriptor {
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceDescriptor::DriveLink(_) => SourceKind::DriveLink,
            SourceDescriptor::Archive(_) => SourceKind::ZipArchive,
        }
    }
}

impl fmt::Debug for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDescriptor::DriveLink(link) => f.debug_tuple("DriveLink").field(link).finish(),
            SourceDescriptor::Archive(bytes) => {
                write!(f, "Archive({} bytes)", bytes.len())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub source: SourceDescriptor,
    pub phrase: String,
}

impl SearchRequest {
    pub fn new(source: SourceDescriptor, phrase: impl Into<String>) -> Result<Self> {
        let phrase = phrase.into();
        if phrase.is_empty() {
            return Err(SearchError::MissingInput(
                "Please enter a phrase to search.".to_string(),
            ));
        }
        Ok(Self { source, phrase })
    }

    /// Builds a request from raw form-style inputs, where only the descriptor
    /// matching `kind` is consulted.
    pub fn from_inputs(
        kind: SourceKind,
        link: Option<String>,
        archive: Option<Vec<u8>>,
        phrase: Option<String>,
    ) -> Result<Self> {
        let phrase = phrase.unwrap_or_default();
        if phrase.is_empty() {
            return Err(SearchError::MissingInput(
                "Please enter a phrase to search.".to_string(),
            ));
        }

        let source = match kind {
            SourceKind::DriveLink => match link.filter(|l| !l.trim().is_empty()) {
                Some(link) => SourceDescriptor::DriveLink(link.trim().to_string()),
                None => {
                    return Err(SearchError::MissingInput(
                        "Please provide a Google Drive link.".to_string(),
                    ));
                }
            },
            SourceKind::ZipArchive => match archive {
                Some(bytes) => SourceDescriptor::Archive(bytes),
                None => {
                    return Err(SearchError::MissingInput(
                        "Please upload a ZIP file.".to_string(),
                    ));
                }
            },
        };

        Self::new(source, phrase)
    }

    pub fn kind(&self) -> SourceKind {
        self.source.kind()
    }
}
