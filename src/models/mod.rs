// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod request;
pub mod search_result;

pub use request::{SearchRequest, SourceDescriptor, SourceKind};
pub use search_result::{PageNumber, SearchResult};
