// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod corpus;
pub mod error;
pub mod exporter;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod source;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{Config, DriveConfig, OutputConfig, OutputFormat, SearchConfig};
pub use corpus::{CorpusFile, FileScanner, LopdfExtractor, PageTextExtractor};
pub use error::{Result, SearchError};
pub use exporter::{JsonExporter, TableExporter, write_report};
pub use models::{PageNumber, SearchRequest, SearchResult, SourceDescriptor, SourceKind};
pub use pipeline::{SearchOutcome, SearchPipeline};
pub use search::{PhraseMatcher, PhraseSearch, ProgressTracker, SearchReport, SearchStats, SkippedFile};
pub use source::{
    DownloadedFolder, DriveClient, FolderDownloader, ResolvedCorpus, SourceResolver,
    extract_folder_id, extract_zip,
};
pub use utils::{OperationTimer, Validator};
