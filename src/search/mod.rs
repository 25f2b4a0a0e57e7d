// file: src/search/mod.rs
// description: phrase search module exports and public api
// reference: matching, scan progress and the search engine

mod engine;
mod matcher;
mod progress;

pub use engine::{PhraseSearch, SearchReport, SkippedFile};
pub use matcher::PhraseMatcher;
pub use progress::{ProgressTracker, SearchStats};
