// file: src/source/archive.rs
// description: zip archive extraction into a scoped temporary directory
// reference: https://docs.rs/zip

use crate::error::{Result, SearchError};
use std::fs;
use std::io::{self, Cursor};
use tempfile::TempDir;
use tracing::{debug, info, warn};
use zip::ZipArchive;

const TEMP_PREFIX: &str = "pdf-phrase-search-";

/// Extracts every entry of `bytes` into a fresh temporary directory, keeping
/// relative paths. The directory is removed when the returned guard drops.
pub fn extract_zip(bytes: &[u8]) -> Result<TempDir> {
    let temp_dir = tempfile::Builder::new().prefix(TEMP_PREFIX).tempdir()?;
    let extracted = extract_into(bytes, &temp_dir)?;

    info!(
        "Extracted {} archive entries into {}",
        extracted,
        temp_dir.path().display()
    );
    Ok(temp_dir)
}

fn extract_into(bytes: &[u8], temp_dir: &TempDir) -> Result<usize> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| SearchError::Archive(format!("Not a valid zip archive: {}", e)))?;

    let root = temp_dir.path();
    let mut extracted = 0;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;

        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping archive entry with unsafe path: {}", entry.name());
            continue;
        };
        let target = root.join(&relative);

        let failed = |e: io::Error| {
            SearchError::Archive(format!("Failed to extract {}: {}", relative.display(), e))
        };

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(failed)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(failed)?;
        }

        let mut out = fs::File::create(&target).map_err(failed)?;
        io::copy(&mut entry, &mut out).map_err(failed)?;

        debug!("Extracted {}", target.display());
        extracted += 1;
    }

    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::zip_bytes;
    use std::path::PathBuf;

    #[test]
    fn test_extract_preserves_relative_paths() {
        let bytes = zip_bytes(&[
            ("top.pdf", b"%PDF-1.5".as_slice()),
            ("nested/deeper/inner.pdf", b"inner".as_slice()),
        ]);

        let dir = extract_zip(&bytes).unwrap();
        assert!(dir.path().join("top.pdf").is_file());
        assert_eq!(
            fs::read(dir.path().join("nested/deeper/inner.pdf")).unwrap(),
            b"inner"
        );
    }

    #[test]
    fn test_directory_removed_on_drop() {
        let bytes = zip_bytes(&[("a.pdf", b"a".as_slice())]);
        let dir = extract_zip(&bytes).unwrap();
        let path: PathBuf = dir.path().to_path_buf();
        assert!(path.exists());

        drop(dir);
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_archive() {
        let bytes = zip_bytes(&[]);
        let dir = extract_zip(&bytes).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_malformed_archive() {
        let err = extract_zip(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, SearchError::Archive(_)));

        let err = extract_zip(&[]).unwrap_err();
        assert!(matches!(err, SearchError::Archive(_)));
    }

    #[test]
    fn test_entry_colliding_with_file_is_archive_error() {
        let bytes = zip_bytes(&[
            ("docs", b"plain file".as_slice()),
            ("docs/a.pdf", b"%PDF-1.5".as_slice()),
        ]);

        let err = extract_zip(&bytes).unwrap_err();
        match err {
            SearchError::Archive(message) => assert!(message.contains("docs")),
            other => panic!("expected an archive error, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_archive() {
        let bytes = zip_bytes(&[("a.pdf", b"some pdf content here".as_slice())]);
        let err = extract_zip(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, SearchError::Archive(_)));
    }
}
