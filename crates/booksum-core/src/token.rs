use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::BooksumConfig;
use crate::error::{BooksumError, Result};

/// On-disk shape of the persisted session: a single fixed `token` key.
#[derive(Debug, Serialize, Deserialize)]
struct TokenFile {
    token: String,
}

/// Persisted bearer token, the only piece of a session that survives a restart.
///
/// Written by login/registration, removed by logout or by a failed startup
/// validation. Reads never fail: a missing or unreadable file means "no token".
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &BooksumConfig) -> Result<Self> {
        Ok(Self::new(config.token_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current token, if one is stored and non-empty.
    pub fn load(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<TokenFile>(&contents) {
            Ok(file) if !file.token.trim().is_empty() => Some(file.token),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("ignoring unreadable token file {}: {e}", self.path.display());
                None
            }
        }
    }

    pub fn is_present(&self) -> bool {
        self.load().is_some()
    }

    /// Save the token, creating the parent directory if needed.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BooksumError::Config(format!("failed to create session dir: {e}"))
            })?;
        }
        let body = toml::to_string(&TokenFile {
            token: token.to_string(),
        })
        .map_err(|e| BooksumError::Config(format!("failed to serialize session token: {e}")))?;
        write_private(&self.path, body.as_bytes())?;
        tracing::debug!("session token saved to {}", self.path.display());
        Ok(())
    }

    /// Remove the token. Removing an absent token is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("session token removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Create the file owner-only from the first byte. A file that already exists
/// is tightened before the token is written into it.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)?;
    Ok(())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents)?;
    Ok(())
}
