// file: src/search/engine.rs
// description: phrase search over every page of every pdf in a corpus
// reference: sequential walk with per-file skip on read failure

use super::matcher::PhraseMatcher;
use super::progress::{ProgressTracker, SearchStats};
use crate::config::SearchConfig;
use crate::corpus::{CorpusFile, FileScanner, PageTextExtractor};
use crate::error::{Result, SearchError};
use crate::models::SearchResult;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A file left out of the results because it could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    pub phrase: String,
    pub matches: Vec<SearchResult>,
    pub skipped: Vec<SkippedFile>,
    pub stats: SearchStats,
}

impl SearchReport {
    /// Match records, or the single "No match found" record when empty.
    pub fn results(&self) -> Vec<SearchResult> {
        if self.matches.is_empty() {
            vec![SearchResult::no_match()]
        } else {
            self.matches.clone()
        }
    }

    pub fn sort(&mut self) {
        self.matches.sort_by(|a, b| {
            a.file_name
                .cmp(&b.file_name)
                .then(a.page_number.cmp(&b.page_number))
        });
    }
}

pub struct PhraseSearch<E> {
    extractor: E,
    scanner: FileScanner,
    sort_results: bool,
    show_progress: bool,
}

impl<E: PageTextExtractor> PhraseSearch<E> {
    pub fn new(extractor: E, config: &SearchConfig) -> Self {
        Self {
            extractor,
            scanner: FileScanner::new(config.follow_links),
            sort_results: config.sort_results,
            show_progress: config.show_progress,
        }
    }

    /// Scans `root` for pdf files and searches each of them.
    pub fn search_directory(&self, root: &Path, phrase: &str) -> Result<SearchReport> {
        let files = self.scanner.scan_directory(root)?;
        self.search_files(&files, phrase)
    }

    /// Searches `files` in the given order.
    pub fn search_files(&self, files: &[CorpusFile], phrase: &str) -> Result<SearchReport> {
        if phrase.is_empty() {
            return Err(SearchError::MissingInput(
                "search phrase must not be empty".to_string(),
            ));
        }

        let matcher = PhraseMatcher::new(phrase);
        let progress = if self.show_progress {
            ProgressTracker::new(files.len())
        } else {
            ProgressTracker::hidden(files.len())
        };

        let mut report = SearchReport {
            phrase: phrase.to_string(),
            ..SearchReport::default()
        };

        for file in files {
            progress.set_current_file(&file.file_name);

            match self.search_file(file, &matcher) {
                Ok((pages, found)) => {
                    debug!(
                        "{}: {} pages, {} matching",
                        file.relative_path,
                        pages,
                        found.len()
                    );
                    progress.inc_files_scanned(pages, found.len());
                    report.matches.extend(found);
                }
                Err(err) => {
                    warn!("{}", err);
                    progress.inc_files_skipped();
                    report.skipped.push(SkippedFile {
                        path: file.path.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        progress.finish();
        report.stats = progress.get_stats();

        if self.sort_results {
            report.sort();
        }

        info!(
            "Searched {} files ({} pages): {} matches, {} skipped",
            report.stats.files_scanned,
            report.stats.pages_scanned,
            report.matches.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Returns the page count and one record per matching page. Records are
    /// only kept if every page of the file was read.
    fn search_file(
        &self,
        file: &CorpusFile,
        matcher: &PhraseMatcher,
    ) -> Result<(usize, Vec<SearchResult>)> {
        let pages = self.extractor.extract_pages(&file.path)?;

        let found = pages
            .iter()
            .enumerate()
            .filter(|(_, text)| matcher.is_match(text))
            .map(|(index, _)| SearchResult::new(file.file_name.clone(), index as u32 + 1))
            .collect();

        Ok((pages.len(), found))
    }
}
