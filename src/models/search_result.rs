// file: src/models/search_result.rs
// description: Search result record, one per matching page
// reference: Rendered as the "File Name" / "Page Number" table

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const NO_MATCH_FILE_NAME: &str = "No match found";
pub const NO_PAGE: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PageNumber {
    /// 1-based page index.
    Page(u32),
    /// Placeholder used by the sentinel record, shown as `-`.
    NotApplicable,
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageNumber::Page(n) => write!(f, "{}", n),
            PageNumber::NotApplicable => f.write_str(NO_PAGE),
        }
    }
}

impl Serialize for PageNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PageNumber::Page(n) => serializer.serialize_u32(*n),
            PageNumber::NotApplicable => serializer.serialize_str(NO_PAGE),
        }
    }
}

impl<'de> Deserialize<'de> for PageNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Page(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Page(n) => Ok(PageNumber::Page(n)),
            Raw::Text(text) if text == NO_PAGE => Ok(PageNumber::NotApplicable),
            Raw::Text(text) => Err(serde::de::Error::custom(format!(
                "expected a page number or \"{}\", got \"{}\"",
                NO_PAGE, text
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Base name of the PDF, without its directory
    #[serde(rename = "File Name")]
    pub file_name: String,

    #[serde(rename = "Page Number")]
    pub page_number: PageNumber,
}

impl SearchResult {
    pub fn new(file_name: impl Into<String>, page: u32) -> Self {
        Self {
            file_name: file_name.into(),
            page_number: PageNumber::Page(page),
        }
    }

    /// The single record emitted when nothing in the corpus matched.
    pub fn no_match() -> Self {
        Self {
            file_name: NO_MATCH_FILE_NAME.to_string(),
            page_number: PageNumber::NotApplicable,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.page_number == PageNumber::NotApplicable
    }
}
