// file: src/search/progress.rs
// description: progress tracking and statistics reporting for a corpus scan
// reference: uses indicatif for progress bars and tracks scan counters

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub pages_scanned: usize,
    pub matches: usize,
    pub duration_ms: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files_total(&self) -> usize {
        self.files_scanned + self.files_skipped
    }

    pub fn pages_per_second(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.pages_scanned as f64 * 1000.0 / self.duration_ms as f64
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    files_scanned: AtomicUsize,
    files_skipped: AtomicUsize,
    pages_scanned: AtomicUsize,
    matches: AtomicUsize,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_files: usize) -> Self {
        Self::with_target(total_files, ProgressDrawTarget::stderr())
    }

    /// Tracks counters without drawing anything.
    pub fn hidden(total_files: usize) -> Self {
        Self::with_target(total_files, ProgressDrawTarget::hidden())
    }

    fn with_target(total_files: usize, target: ProgressDrawTarget) -> Self {
        let multi_progress = MultiProgress::with_draw_target(target);

        let main_bar = create_progress_bar(&multi_progress, total_files as u64);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            files_scanned: AtomicUsize::new(0),
            files_skipped: AtomicUsize::new(0),
            pages_scanned: AtomicUsize::new(0),
            matches: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn set_current_file(&self, name: &str) {
        self.main_bar.set_message(name.to_string());
    }

    pub fn inc_files_scanned(&self, pages: usize, matches: usize) {
        self.files_scanned.fetch_add(1, Ordering::SeqCst);
        self.pages_scanned.fetch_add(pages, Ordering::SeqCst);
        self.matches.fetch_add(matches, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_files_skipped(&self) {
        self.files_skipped.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Search complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> SearchStats {
        SearchStats {
            files_scanned: self.files_scanned.load(Ordering::SeqCst),
            files_skipped: self.files_skipped.load(Ordering::SeqCst),
            pages_scanned: self.pages_scanned.load(Ordering::SeqCst),
            matches: self.matches.load(Ordering::SeqCst),
            duration_ms: self.start_time.elapsed().as_millis() as u64,
        }
    }

    fn update_detail_bar(&self) {
        let pages = self.pages_scanned.load(Ordering::SeqCst);
        let matches = self.matches.load(Ordering::SeqCst);
        let skipped = self.files_skipped.load(Ordering::SeqCst);

        self.detail_bar.set_message(format!(
            "Pages: {} | Matches: {} | Skipped: {}",
            pages, matches, skipped
        ));
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        bar.set_style(style.progress_chars("█▓▒░"));
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}
