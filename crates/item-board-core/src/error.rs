//! Error types for the item board.
//!
//! Every API failure ends up as one `ApiError`; the board turns it into a
//! status message and never propagates it further.

use thiserror::Error;

/// Failure of a single REST call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// Server answered 2xx, but not with the status the operation requires
    #[error("{reason}")]
    UnexpectedStatus { status: u16, reason: String },

    /// Request never completed
    #[error("{0}")]
    Transport(String),

    /// Response body could not be decoded
    #[error("{0}")]
    Parse(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(_) | Self::Parse(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// API base could not be turned into an absolute URL
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid page origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("Invalid API base '{base}': {reason}")]
    InvalidBase { base: String, reason: String },
}

/// Field name that is not part of the draft
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);
