// file: src/corpus/mod.rs
// description: Corpus discovery and text extraction exports
// reference: Internal module structure

pub mod extractor;
pub mod scanner;

pub use extractor::{LopdfExtractor, PageTextExtractor};
pub use scanner::{CorpusFile, FileScanner};
