// file: src/pipeline/orchestrator.rs
// description: resolve, search and clean up for a single request
// reference: sequential stages with guaranteed temporary corpus release

use crate::config::Config;
use crate::corpus::{LopdfExtractor, PageTextExtractor};
use crate::error::{Result, SearchError};
use crate::models::SearchRequest;
use crate::search::{PhraseSearch, SearchReport};
use crate::source::{DriveClient, FolderDownloader, SourceResolver};
use crate::utils::{OperationTimer, Validator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug)]
pub struct SearchOutcome {
    pub report: SearchReport,
    pub corpus_root: PathBuf,
    /// True when the corpus was a temporary extraction that has been deleted.
    pub corpus_removed: bool,
}

pub struct SearchPipeline<D, E> {
    resolver: SourceResolver<D>,
    search: Arc<PhraseSearch<E>>,
}

impl SearchPipeline<DriveClient, LopdfExtractor> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let downloader = DriveClient::new(&config.drive)?;
        Ok(Self::new(downloader, LopdfExtractor::new(), config))
    }
}

impl<D, E> SearchPipeline<D, E>
where
    D: FolderDownloader,
    E: PageTextExtractor + Send + Sync + 'static,
{
    pub fn new(downloader: D, extractor: E, config: &Config) -> Self {
        Self {
            resolver: SourceResolver::new(downloader),
            search: Arc::new(PhraseSearch::new(extractor, &config.search)),
        }
    }

    pub async fn run(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        Validator::validate_phrase(&request.phrase)?;
        info!("Searching {} for \"{}\"", request.kind(), request.phrase);

        let timer = OperationTimer::new("resolve source");
        let corpus = self.resolver.resolve(&request.source).await?;
        timer.finish();

        let corpus_root = corpus.path().to_path_buf();
        let temporary = corpus.is_temporary();

        let timer = OperationTimer::new("phrase search");
        let search = Arc::clone(&self.search);
        let phrase = request.phrase.clone();
        let root = corpus_root.clone();
        let result = tokio::task::spawn_blocking(move || search.search_directory(&root, &phrase))
            .await
            .map_err(|e| SearchError::Task(e.to_string()))
            .and_then(|r| r);

        if let Err(err) = corpus.release() {
            warn!("Cleanup of {} failed: {}", corpus_root.display(), err);
        }

        let report = result?;
        timer.finish_with_count(report.matches.len());

        Ok(SearchOutcome {
            corpus_removed: temporary && !corpus_root.exists(),
            report,
            corpus_root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SearchResult, SourceDescriptor};
    use crate::source::DownloadedFolder;
    use crate::test_support::{pdf_bytes, write_pdf, zip_bytes};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct LocalFolder(TempDir);

    impl FolderDownloader for LocalFolder {
        async fn download_folder(&self, _folder_id: &str) -> Result<DownloadedFolder> {
            let files = std::fs::read_dir(self.0.path())?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .collect();
            Ok(DownloadedFolder {
                root: self.0.path().to_path_buf(),
                files,
            })
        }
    }

    struct AbortingExtractor {
        seen: Arc<std::sync::Mutex<Option<PathBuf>>>,
    }

    impl PageTextExtractor for AbortingExtractor {
        fn extract_pages(&self, path: &std::path::Path) -> Result<Vec<String>> {
            if let Some(parent) = path.parent() {
                *self.seen.lock().unwrap() = Some(parent.to_path_buf());
            }
            panic!("extractor aborted on {}", path.display());
        }
    }

    fn quiet_config() -> Config {
        let mut config = Config::default_config();
        config.search.show_progress = false;
        config
    }

    fn pipeline(folder: TempDir) -> SearchPipeline<LocalFolder, LopdfExtractor> {
        SearchPipeline::new(LocalFolder(folder), LopdfExtractor::new(), &quiet_config())
    }

    fn archive_request(entries: &[(&str, &[u8])], phrase: &str) -> SearchRequest {
        SearchRequest::new(SourceDescriptor::Archive(zip_bytes(entries)), phrase).unwrap()
    }

    #[tokio::test]
    async fn test_archive_search_removes_temp_dir() {
        let pdf = pdf_bytes(&["Hello World on the first page", "second page"]);
        let request = archive_request(&[("reports/greeting.pdf", pdf.as_slice())], "hello world");

        let outcome = pipeline(TempDir::new().unwrap()).run(&request).await.unwrap();

        assert_eq!(
            outcome.report.results(),
            vec![SearchResult::new("greeting.pdf", 1)]
        );
        assert!(outcome.corpus_removed);
        assert!(!outcome.corpus_root.exists());
    }

    #[tokio::test]
    async fn test_archive_without_pdfs_yields_sentinel() {
        let request = archive_request(&[("notes.txt", b"needle".as_slice())], "needle");

        let outcome = pipeline(TempDir::new().unwrap()).run(&request).await.unwrap();
        assert_eq!(outcome.report.results(), vec![SearchResult::no_match()]);
        assert!(!outcome.corpus_root.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_skipped() {
        let good = pdf_bytes(&["alpha", "the needle is here", "omega"]);
        let request = archive_request(
            &[
                ("good.pdf", good.as_slice()),
                ("corrupt.pdf", b"%PDF-1.5 garbage".as_slice()),
            ],
            "NEEDLE",
        );

        let outcome = pipeline(TempDir::new().unwrap()).run(&request).await.unwrap();
        assert_eq!(outcome.report.matches, vec![SearchResult::new("good.pdf", 2)]);
        assert_eq!(outcome.report.skipped.len(), 1);
        assert!(outcome.report.skipped[0].path.ends_with("corrupt.pdf"));
    }

    #[tokio::test]
    async fn test_uppercase_extension_not_searched() {
        let pdf = pdf_bytes(&["needle"]);
        let request = archive_request(&[("LOUD.PDF", pdf.as_slice())], "needle");

        let outcome = pipeline(TempDir::new().unwrap()).run(&request).await.unwrap();
        assert_eq!(outcome.report.results(), vec![SearchResult::no_match()]);
    }

    #[tokio::test]
    async fn test_drive_corpus_is_kept() {
        let folder = TempDir::new().unwrap();
        write_pdf(
            &folder.path().join("paper.pdf"),
            &["intro", "result", "test", "x", "Test again"],
        );
        let root = folder.path().to_path_buf();

        let request = SearchRequest::new(
            SourceDescriptor::DriveLink("https://drive.google.com/drive/folders/abc".to_string()),
            "TEST",
        )
        .unwrap();

        let pipeline = pipeline(folder);
        let outcome = pipeline.run(&request).await.unwrap();

        assert_eq!(
            outcome.report.matches,
            vec![SearchResult::new("paper.pdf", 3), SearchResult::new("paper.pdf", 5)]
        );
        assert!(!outcome.corpus_removed);
        assert_eq!(outcome.corpus_root, root);
        assert!(root.exists());
    }

    #[tokio::test]
    async fn test_failed_search_still_removes_temp_dir() {
        let seen = Arc::new(std::sync::Mutex::new(None));
        let pipeline = SearchPipeline::new(
            LocalFolder(TempDir::new().unwrap()),
            AbortingExtractor {
                seen: Arc::clone(&seen),
            },
            &quiet_config(),
        );
        let pdf = pdf_bytes(&["needle"]);
        let request = archive_request(&[("doomed.pdf", pdf.as_slice())], "needle");

        let err = pipeline.run(&request).await.unwrap_err();
        assert!(matches!(err, SearchError::Task(_)));

        let extracted = seen.lock().unwrap().clone().expect("extractor was reached");
        assert!(!extracted.exists());
    }

    #[tokio::test]
    async fn test_invalid_link_fails_resolution() {
        let request = SearchRequest::new(
            SourceDescriptor::DriveLink("https://example.com/nothing".to_string()),
            "needle",
        )
        .unwrap();

        let err = pipeline(TempDir::new().unwrap()).run(&request).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_bad_archive_fails_resolution() {
        let request =
            SearchRequest::new(SourceDescriptor::Archive(b"nope".to_vec()), "needle").unwrap();

        let err = pipeline(TempDir::new().unwrap()).run(&request).await.unwrap_err();
        assert!(matches!(err, SearchError::Archive(_)));
    }
}
