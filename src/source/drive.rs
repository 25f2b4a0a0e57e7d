// file: src/source/drive.rs
// description: Google Drive folder download through the Drive v3 REST API
// reference: https://developers.google.com/drive/api/reference/rest/v3/files

use crate::config::DriveConfig;
use crate::error::{Result, SearchError};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
const NATIVE_MIME_PREFIX: &str = "application/vnd.google-apps.";

/// Local copy of a downloaded folder.
#[derive(Debug, Clone)]
pub struct DownloadedFolder {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Bulk download of a cloud folder into a local directory tree.
/// Implemented by `DriveClient`; tests substitute fakes.
#[allow(async_fn_in_trait)]
pub trait FolderDownloader {
    async fn download_folder(&self, folder_id: &str) -> Result<DownloadedFolder>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    name: String,
    mime_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    next_page_token: Option<String>,
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone)]
pub struct DriveClient {
    http: Client,
    api_key: Option<ApiKey>,
    base_url: String,
    download_dir: PathBuf,
    page_size: u32,
}

impl DriveClient {
    pub fn new(config: &DriveConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let api_key = config
            .api_key
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(ApiKey);

        Ok(Self {
            http,
            api_key,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            download_dir: config.download_dir.clone(),
            page_size: config.page_size,
        })
    }

    fn key(&self) -> Result<&str> {
        self.api_key.as_ref().map(|k| k.0.as_str()).ok_or_else(|| {
            SearchError::Config(
                "drive.api_key is not set (PDF_PHRASE_SEARCH__DRIVE__API_KEY)".to_string(),
            )
        })
    }

    async fn get_metadata(&self, file_id: &str) -> Result<DriveFile> {
        let url = format!("{}/drive/v3/files/{}", self.base_url, file_id);
        let response = self
            .http
            .get(&url)
            .query(&[("fields", "id,name,mimeType"), ("key", self.key()?)])
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SearchError::EmptyOrUnavailableSource(format!(
                "folder {} not found or not shared publicly",
                file_id
            )));
        }
        if !status.is_success() {
            return Err(api_failure(status, response).await);
        }

        response.json().await.map_err(unavailable)
    }

    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveFile>> {
        let url = format!("{}/drive/v3/files", self.base_url);
        let query = format!("'{}' in parents and trashed = false", folder_id);
        let page_size = self.page_size.to_string();
        let mut children = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![
                ("q", query.as_str()),
                ("fields", "nextPageToken,files(id,name,mimeType)"),
                ("pageSize", page_size.as_str()),
                ("key", self.key()?),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let response = self
                .http
                .get(&url)
                .query(&params)
                .send()
                .await
                .map_err(unavailable)?;

            let status = response.status();
            if !status.is_success() {
                return Err(api_failure(status, response).await);
            }

            let page: FileList = response.json().await.map_err(unavailable)?;
            debug!(
                "Listed {} entries in folder {}",
                page.files.len(),
                folder_id
            );
            children.extend(page.files);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(children)
    }

    async fn download_file(&self, file: &DriveFile, target: &Path) -> Result<()> {
        let url = format!("{}/drive/v3/files/{}", self.base_url, file.id);
        let mut response = self
            .http
            .get(&url)
            .query(&[("alt", "media"), ("key", self.key()?)])
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_failure(status, response).await);
        }

        let mut out = tokio::fs::File::create(target).await?;
        while let Some(chunk) = response.chunk().await.map_err(unavailable)? {
            out.write_all(&chunk).await?;
        }
        out.flush().await?;

        debug!("Downloaded {} -> {}", file.name, target.display());
        Ok(())
    }

    /// Mirrors `folder_id` and its subfolders under `dest`, returning the
    /// paths of every file written.
    async fn download_tree(&self, folder_id: &str, dest: &Path) -> Result<Vec<PathBuf>> {
        tokio::fs::create_dir_all(dest).await?;

        let mut written = Vec::new();
        let mut pending = vec![(folder_id.to_string(), dest.to_path_buf())];

        while let Some((id, dir)) = pending.pop() {
            let mut taken = HashSet::new();
            for child in self.list_children(&id).await? {
                let name = unique_name(local_name(&child.name, &child.id), &child.id, &mut taken);
                let target = dir.join(&name);

                if child.mime_type == FOLDER_MIME_TYPE {
                    tokio::fs::create_dir_all(&target).await?;
                    pending.push((child.id, target));
                } else if child.mime_type.starts_with(NATIVE_MIME_PREFIX) {
                    debug!(
                        "Skipping native Google file {} ({})",
                        child.name, child.mime_type
                    );
                } else {
                    self.download_file(&child, &target).await?;
                    written.push(target);
                }
            }
        }

        Ok(written)
    }
}

impl FolderDownloader for DriveClient {
    async fn download_folder(&self, folder_id: &str) -> Result<DownloadedFolder> {
        let metadata = self.get_metadata(folder_id).await?;
        if metadata.mime_type != FOLDER_MIME_TYPE {
            return Err(SearchError::EmptyOrUnavailableSource(format!(
                "{} is not a folder ({})",
                folder_id, metadata.mime_type
            )));
        }

        let root = self.download_dir.join(local_name(folder_id, folder_id));
        if tokio::fs::try_exists(&root).await? {
            debug!("Removing previous download at {}", root.display());
            tokio::fs::remove_dir_all(&root).await?;
        }
        info!(
            "Downloading folder '{}' ({}) into {}",
            metadata.name,
            folder_id,
            root.display()
        );

        let files = self.download_tree(folder_id, &root).await?;
        info!("Downloaded {} files", files.len());

        Ok(DownloadedFolder { root, files })
    }
}

/// Reduces a remote name to a single safe path component.
fn local_name(name: &str, fallback: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        fallback.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Drive lets siblings share a name. Later duplicates get their id appended
/// to the stem, `scan.pdf` becoming `scan (id).pdf`.
fn unique_name(name: String, id: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.clone()) {
        return name;
    }

    let path = Path::new(&name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.clone());
    let renamed = match path.extension() {
        Some(ext) => format!("{} ({}).{}", stem, id, ext.to_string_lossy()),
        None => format!("{} ({})", stem, id),
    };

    taken.insert(renamed.clone());
    renamed
}

fn unavailable(err: reqwest::Error) -> SearchError {
    SearchError::EmptyOrUnavailableSource(err.to_string())
}

async fn api_failure(status: StatusCode, response: reqwest::Response) -> SearchError {
    let text = response.text().await.unwrap_or_default();
    let snippet: String = text.chars().take(200).collect();
    warn!(status = %status, "Google Drive API error");
    SearchError::EmptyOrUnavailableSource(format!("HTTP {}: {}", status, snippet))
}
