//! Error types surfaced as state rather than thrown into the render path.

use thiserror::Error;


/// Failure of a call to the REST collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Network failures and 5xx responses; worth offering a retry for.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}


/// Failure to read or write a value kept in browser storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to decode base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("failed to deserialize: {0}")]
    Deserialize(#[from] ciborium::de::Error<std::io::Error>),
    #[error("failed to serialize: {0}")]
    Serialize(#[from] ciborium::ser::Error<std::io::Error>),
}
