// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, SearchError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "PDF_PHRASE_SEARCH";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub drive: DriveConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DriveConfig {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub download_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub page_size: u32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: "https://www.googleapis.com".to_string(),
            download_dir: PathBuf::from("./downloads"),
            request_timeout_secs: 60,
            page_size: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Sort records by file name then page instead of keeping visit order.
    pub sort_results: bool,
    pub follow_links: bool,
    pub show_progress: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sort_results: false,
            follow_links: false,
            show_progress: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl Config {
    /// Layers defaults, the TOML file (if it exists) and `PDF_PHRASE_SEARCH__*`
    /// environment variables, in that order.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        let builder = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let settings = builder
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if self.drive.api_base_url.trim().is_empty() {
            return Err(SearchError::Config(
                "drive.api_base_url must not be empty".to_string(),
            ));
        }

        if self.drive.request_timeout_secs == 0 {
            return Err(SearchError::Config(
                "drive.request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !(1..=1000).contains(&self.drive.page_size) {
            return Err(SearchError::Config(
                "drive.page_size must be between 1 and 1000".to_string(),
            ));
        }

        Ok(())
    }
}
