// file: src/corpus/scanner.rs
// description: Directory walking and pdf discovery
// reference: https://docs.rs/walkdir

use crate::error::Result;
use crate::utils::Validator;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Matched against the end of the file name, case-sensitively.
pub const PDF_SUFFIX: &str = ".pdf";

pub struct FileScanner {
    follow_links: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFile {
    pub path: PathBuf,
    pub file_name: String,
    pub relative_path: String,
}

impl CorpusFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            relative_path: path.to_string_lossy().to_string(),
            path,
            file_name,
        }
    }
}

impl FileScanner {
    pub fn new(follow_links: bool) -> Self {
        Self { follow_links }
    }

    /// Every `.pdf` file under `root`, in walk order.
    pub fn scan_directory(&self, root: &Path) -> Result<Vec<CorpusFile>> {
        Validator::validate_directory(root)?;
        info!("Scanning directory: {}", root.display());
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(self.follow_links) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !is_pdf_name(&file_name) {
                debug!("Skipping non-pdf file: {}", entry.path().display());
                continue;
            }

            let path = entry.path();
            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();

            files.push(CorpusFile {
                path: path.to_path_buf(),
                file_name: file_name.to_string(),
                relative_path,
            });
        }

        info!("Found {} pdf files", files.len());
        Ok(files)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new(false)
    }
}

pub fn is_pdf_name(file_name: &str) -> bool {
    file_name.ends_with(PDF_SUFFIX)
}
