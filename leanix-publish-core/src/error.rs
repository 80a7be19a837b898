//! Error taxonomy for the publish pipeline.
//!
//! Every failure in token exchange, manifest upload or document attachment is a
//! [`PublishError`]. The CLI maps [`PublishError::kind`] to a process exit code.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// A required environment variable is absent or empty.
    #[error("missing required environment variable {name}")]
    MissingEnv { name: &'static str },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}: {body}")]
    Http {
        url: String,
        status: u16,
        body: String,
    },

    /// A 2xx response lacked a field the pipeline depends on.
    #[error("no {field} in response: {body}")]
    MissingField { field: &'static str, body: String },

    #[error("invalid JSON in response from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Coarse failure classes, one per exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Http,
    Protocol,
    Io,
    Transport,
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Config => 2,
            ErrorKind::Http => 3,
            ErrorKind::Protocol => 4,
            ErrorKind::Io => 5,
            ErrorKind::Transport => 6,
        }
    }
}

impl PublishError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PublishError::MissingEnv { .. } => ErrorKind::Config,
            PublishError::Http { .. } => ErrorKind::Http,
            PublishError::MissingField { .. } | PublishError::InvalidJson { .. } => {
                ErrorKind::Protocol
            }
            PublishError::Io { .. } => ErrorKind::Io,
            PublishError::Transport { .. } | PublishError::InvalidRequest(_) => {
                ErrorKind::Transport
            }
        }
    }
}
