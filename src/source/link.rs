// file: src/source/link.rs
// description: google drive folder id extraction from share links
// reference: https://docs.rs/regex

use crate::error::{Result, SearchError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref FOLDER_ID: Regex =
        Regex::new(r"/folders/([a-zA-Z0-9_-]+)").expect("FOLDER_ID regex is valid");
}

/// Returns the `<id>` of the first `/folders/<id>` segment in `link`.
pub fn extract_folder_id(link: &str) -> Result<String> {
    FOLDER_ID
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| SearchError::InvalidReference(link.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_from_share_link() {
        let id = extract_folder_id(
            "https://drive.google.com/drive/folders/1AbC-dEf_123?usp=sharing",
        )
        .unwrap();
        assert_eq!(id, "1AbC-dEf_123");
    }

    #[test]
    fn test_extract_from_user_scoped_link() {
        let id = extract_folder_id("https://drive.google.com/drive/u/0/folders/XYZ789").unwrap();
        assert_eq!(id, "XYZ789");
    }

    #[test]
    fn test_capture_round_trip() {
        for id in ["a", "0", "abc-DEF_ghi", "___", "--x--", "1x2y3z4w5v6u7t8s9r0q"] {
            let link = format!("https://drive.google.com/drive/folders/{}", id);
            assert_eq!(extract_folder_id(&link).unwrap(), id);

            let bare = format!("/folders/{}/view", id);
            assert_eq!(extract_folder_id(&bare).unwrap(), id);
        }
    }

    #[test]
    fn test_stops_at_first_invalid_character() {
        let id = extract_folder_id("https://drive.google.com/drive/folders/abc.def").unwrap();
        assert_eq!(id, "abc");
    }

    #[test]
    fn test_invalid_links() {
        for link in [
            "",
            "https://drive.google.com/file/d/abc/view",
            "https://drive.google.com/drive/folders/",
            "https://drive.google.com/drive/folders/?id=abc",
            "folders/abc",
            "https://example.com/folder/abc",
        ] {
            let err = extract_folder_id(link).unwrap_err();
            assert!(
                matches!(err, SearchError::InvalidReference(_)),
                "expected InvalidReference for {:?}",
                link
            );
        }
    }
}
