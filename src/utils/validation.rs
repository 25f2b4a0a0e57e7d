// file: src/utils/validation.rs
// description: input validation utilities and helpers
// reference: input validation patterns

use crate::error::{Result, SearchError};
use std::fs;
use std::path::Path;

/// Local file header or empty-archive end record.
const ZIP_SIGNATURES: [&[u8]; 2] = [b"PK\x03\x04", b"PK\x05\x06"];

pub struct Validator;

impl Validator {
    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(SearchError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(SearchError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_phrase(phrase: &str) -> Result<()> {
        if phrase.is_empty() {
            return Err(SearchError::MissingInput(
                "Please enter a phrase to search.".to_string(),
            ));
        }
        Ok(())
    }

    /// Cheap signature check before handing bytes to the zip reader.
    pub fn validate_zip_signature(bytes: &[u8]) -> Result<()> {
        if ZIP_SIGNATURES.iter().any(|sig| bytes.starts_with(sig)) {
            Ok(())
        } else {
            Err(SearchError::Archive(
                "Uploaded file is not a ZIP archive".to_string(),
            ))
        }
    }

    pub fn read_archive(path: &Path) -> Result<Vec<u8>> {
        if !path.is_file() {
            return Err(SearchError::MissingInput(format!(
                "Archive not found: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path)?;
        Self::validate_zip_signature(&bytes)?;
        Ok(bytes)
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let kept: String = text.chars().take(max_chars).collect();
            format!("{}...", kept)
        }
    }
}
