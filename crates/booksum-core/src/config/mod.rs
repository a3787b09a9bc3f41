use crate::error::{BooksumError, Result};
use crate::model::{SummaryLength, SummaryType};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `api.base_url` after the files are merged.
pub const API_URL_ENV: &str = "BOOKSUM_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BooksumConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub downloads: DownloadsConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Custom path for the persisted token. Defaults to `~/.config/booksum/session.toml`.
    #[serde(default)]
    pub token_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadsConfig {
    /// Where downloaded summaries are written. Defaults to the working directory.
    #[serde(default)]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_summary_type")]
    pub default_type: String,
    #[serde(default = "default_summary_length")]
    pub default_length: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            default_type: default_summary_type(),
            default_length: default_summary_length(),
        }
    }
}

impl SummaryConfig {
    pub fn summary_type(&self) -> SummaryType {
        self.default_type.parse().unwrap_or_default()
    }

    pub fn summary_length(&self) -> SummaryLength {
        SummaryLength::from_words(self.default_length).unwrap_or_default()
    }
}

// -- Defaults --

fn default_base_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}
fn default_user_agent() -> String {
    format!("booksum/{}", env!("CARGO_PKG_VERSION"))
}
fn default_summary_type() -> String {
    "paragraph".to_string()
}
fn default_summary_length() -> u32 {
    75
}

impl BooksumConfig {
    /// Load configuration with three-layer TOML merge:
    /// 1. ~/.config/booksum/config.toml (global)
    /// 2. .booksum/config.toml (project)
    /// 3. .booksum/config.local.toml (local, gitignored)
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            let project_config = dir.join(".booksum").join("config.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }

            let local_config = dir.join(".booksum").join("config.local.toml");
            if local_config.exists() {
                builder = builder.add_source(File::from(local_config).required(false));
            }
        }

        let config = builder
            .build()
            .map_err(|e| BooksumError::Config(e.to_string()))?;

        let mut cfg: Self = config
            .try_deserialize()
            .map_err(|e| BooksumError::Config(e.to_string()))?;

        if let Ok(url) = std::env::var(API_URL_ENV) {
            cfg.api.base_url = url;
        }

        cfg.validate();
        Ok(cfg)
    }

    /// Load with defaults only (no files).
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            downloads: DownloadsConfig::default(),
            summary: SummaryConfig::default(),
        }
    }

    /// Validate config values, replacing bad ones and logging warnings.
    /// Lenient: never rejects the config.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        let trimmed = self.api.base_url.trim().trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            warnings.push(format!(
                "api.base_url is empty, using {}",
                default_base_url()
            ));
            self.api.base_url = default_base_url();
        } else if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            warnings.push(format!(
                "api.base_url '{trimmed}' has no scheme, assuming http://"
            ));
            self.api.base_url = format!("http://{trimmed}");
        } else {
            self.api.base_url = trimmed;
        }

        if self.summary.default_type.parse::<SummaryType>().is_err() {
            warnings.push(format!(
                "unknown summary.default_type '{}', valid: paragraph, bullet",
                self.summary.default_type
            ));
            self.summary.default_type = default_summary_type();
        }

        if SummaryLength::from_words(self.summary.default_length).is_none() {
            warnings.push(format!(
                "summary.default_length = {} not one of 50, 75, 100, setting to 75",
                self.summary.default_length
            ));
            self.summary.default_length = default_summary_length();
        }

        for w in &warnings {
            tracing::warn!("config: {}", w);
        }

        warnings
    }

    /// Resolved token file path.
    pub fn token_path(&self) -> Result<PathBuf> {
        match &self.session.token_path {
            Some(p) if !p.trim().is_empty() => Ok(PathBuf::from(p)),
            _ => default_token_path(),
        }
    }

    /// Resolved download directory.
    pub fn download_dir(&self) -> PathBuf {
        self.downloads
            .dir
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("booksum").join("config.toml"))
}

/// Default token path: `~/.config/booksum/session.toml`
fn default_token_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join("booksum").join("session.toml"))
        .ok_or_else(|| BooksumError::Config("cannot determine config directory".to_string()))
}
