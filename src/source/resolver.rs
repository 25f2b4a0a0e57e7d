// file: src/source/resolver.rs
// description: turns a source descriptor into a local corpus directory
// reference: drive download or zip extraction, selected by descriptor

use super::archive::extract_zip;
use super::drive::FolderDownloader;
use super::link::extract_folder_id;
use crate::error::{Result, SearchError};
use crate::models::SourceDescriptor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, warn};

/// A corpus directory produced by resolution.
#[derive(Debug)]
pub enum ResolvedCorpus {
    /// Downloaded folder, left in place after the search.
    Downloaded { root: PathBuf, file_count: usize },
    /// Extraction target, deleted by `release` or on drop.
    Temporary(TempDir),
}

impl ResolvedCorpus {
    pub fn path(&self) -> &Path {
        match self {
            ResolvedCorpus::Downloaded { root, .. } => root,
            ResolvedCorpus::Temporary(dir) => dir.path(),
        }
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, ResolvedCorpus::Temporary(_))
    }

    /// Deletes a temporary corpus. Downloaded corpora are kept.
    pub fn release(self) -> Result<()> {
        match self {
            ResolvedCorpus::Downloaded { root, .. } => {
                info!("Keeping downloaded folder at {}", root.display());
                Ok(())
            }
            ResolvedCorpus::Temporary(dir) => {
                let path = dir.path().to_path_buf();
                dir.close().map_err(|e| {
                    warn!("Failed to remove {}: {}", path.display(), e);
                    SearchError::Io(e)
                })?;
                info!("Removed temporary directory {}", path.display());
                Ok(())
            }
        }
    }
}

pub struct SourceResolver<D> {
    downloader: D,
}

impl<D: FolderDownloader> SourceResolver<D> {
    pub fn new(downloader: D) -> Self {
        Self { downloader }
    }

    pub async fn resolve(&self, source: &SourceDescriptor) -> Result<ResolvedCorpus> {
        match source {
            SourceDescriptor::DriveLink(link) => self.resolve_link(link).await,
            SourceDescriptor::Archive(bytes) => Ok(ResolvedCorpus::Temporary(extract_zip(bytes)?)),
        }
    }

    pub async fn resolve_link(&self, link: &str) -> Result<ResolvedCorpus> {
        let folder_id = extract_folder_id(link)?;
        info!("Resolved folder id {}", folder_id);

        let folder = self
            .downloader
            .download_folder(&folder_id)
            .await
            .map_err(|e| match e {
                SearchError::Config(_) | SearchError::EmptyOrUnavailableSource(_) => e,
                other => SearchError::EmptyOrUnavailableSource(other.to_string()),
            })?;

        if folder.files.is_empty() {
            return Err(SearchError::EmptyOrUnavailableSource(format!(
                "folder {} contains no downloadable files",
                folder_id
            )));
        }

        Ok(ResolvedCorpus::Downloaded {
            root: folder.root,
            file_count: folder.files.len(),
        })
    }
}
