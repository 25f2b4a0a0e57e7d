// file: src/source/mod.rs
// description: Corpus acquisition module exports
// reference: Internal module structure

pub mod archive;
pub mod drive;
pub mod link;
pub mod resolver;

pub use archive::extract_zip;
pub use drive::{DownloadedFolder, DriveClient, FolderDownloader};
pub use link::extract_folder_id;
pub use resolver::{ResolvedCorpus, SourceResolver};
