// file: src/test_support.rs
// description: fixtures shared by unit tests
// reference: https://docs.rs/lopdf, https://docs.rs/zip

use crate::corpus::PageTextExtractor;
use crate::error::{Result, SearchError};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// In-memory corpus keyed by path.
#[derive(Debug, Default)]
pub struct FakeExtractor {
    documents: HashMap<PathBuf, Option<Vec<String>>>,
}

impl FakeExtractor {
    pub fn with_pages(mut self, path: &str, pages: &[&str]) -> Self {
        self.documents.insert(
            PathBuf::from(path),
            Some(pages.iter().map(|p| p.to_string()).collect()),
        );
        self
    }

    pub fn with_failure(mut self, path: &str) -> Self {
        self.documents.insert(PathBuf::from(path), None);
        self
    }
}

impl PageTextExtractor for FakeExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        match self.documents.get(path) {
            Some(Some(pages)) => Ok(pages.clone()),
            _ => Err(SearchError::PageRead {
                path: path.to_path_buf(),
                page: None,
                message: "fake extraction failure".to_string(),
            }),
        }
    }
}

/// A PDF with one text line per page.
pub fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content encodes"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("pdf serializes");
    buffer
}

pub fn write_pdf(path: &Path, pages: &[&str]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("parent dir");
    }
    std::fs::write(path, pdf_bytes(pages)).expect("pdf written");
}

/// A zip archive holding `entries` as `(name, bytes)` pairs.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default();

        for (name, bytes) in entries {
            zip.start_file(*name, options).expect("zip entry");
            zip.write_all(bytes).expect("zip write");
        }
        zip.finish().expect("zip finish");
    }
    buffer
}
