//! Error types for the FixedFloat SDK

use thiserror::Error;

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the FixedFloat SDK
#[derive(Error, Debug)]
pub enum Error {
    /// Caller-supplied arguments were missing or malformed; no request was sent
    #[error("Invalid call: {0}")]
    InvalidCall(String),

    /// The API answered with a non-success envelope
    #[error("Remote error {code}: {message}")]
    Remote { code: i64, message: String },

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not a valid envelope
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request payload could not be form-encoded
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

/// Coarse failure category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any network activity
    InvalidCall,
    /// The remote side reported a failure
    Remote,
    /// The HTTP exchange itself could not complete
    Transport,
}

impl Error {
    /// Shorthand for building an [`Error::InvalidCall`]
    pub fn invalid_call(msg: impl Into<String>) -> Self {
        Error::InvalidCall(msg.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidCall(_) | Error::Encode(_) => ErrorKind::InvalidCall,
            Error::Remote { .. } => ErrorKind::Remote,
            Error::Http(_) | Error::Json(_) => ErrorKind::Transport,
        }
    }

    /// Remote result code, if this is a remote error
    pub fn remote_code(&self) -> Option<i64> {
        match self {
            Error::Remote { code, .. } => Some(*code),
            _ => None,
        }
    }
}
