// file: src/corpus/extractor.rs
// description: per-page plain text extraction from pdf files
// reference: https://docs.rs/lopdf

use crate::error::{Result, SearchError};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// Source of page text for a single file.
/// Implemented by `LopdfExtractor` for real files; tests use in-memory fakes.
pub trait PageTextExtractor {
    /// Text of every page in order; index 0 is page 1. Any page failure
    /// fails the whole file.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl PageTextExtractor for LopdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let document = Document::load(path).map_err(|e| SearchError::PageRead {
            path: path.to_path_buf(),
            page: None,
            message: e.to_string(),
        })?;

        let pages = document.get_pages();
        debug!("Opened {} ({} pages)", path.display(), pages.len());

        pages
            .keys()
            .map(|&page_number| {
                document
                    .extract_text(&[page_number])
                    .map_err(|e| SearchError::PageRead {
                        path: path.to_path_buf(),
                        page: Some(page_number),
                        message: e.to_string(),
                    })
            })
            .collect()
    }
}
