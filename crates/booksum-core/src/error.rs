use thiserror::Error;

use crate::api::Operation;

#[derive(Debug, Error)]
pub enum BooksumError {
    /// The backend answered with a non-success status.
    #[error("{}", api_message(.op, .detail))]
    Api {
        op: Operation,
        status: u16,
        detail: Option<String>,
    },

    /// The request never produced a response (connect, DNS, body decode).
    #[error("{}: {}", .op.fallback_message(), .source)]
    Transport {
        op: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
}

fn api_message(op: &Operation, detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.trim().is_empty() => d.clone(),
        _ => op.fallback_message(),
    }
}

impl BooksumError {
    /// The text a view shows inline: the backend's own message when it sent
    /// one, otherwise the operation's generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { op, detail, .. } => api_message(op, detail),
            Self::Transport { op, .. } => op.fallback_message(),
            other => other.to_string(),
        }
    }

    /// Operation that produced the error, for HTTP failures.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Api { op, .. } | Self::Transport { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// `true` for 401/403 answers: the token is missing, expired or lacks the role.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == 401 || *status == 403)
    }
}

pub type Result<T> = std::result::Result<T, BooksumError>;
