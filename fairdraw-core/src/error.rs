use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DrawError>;

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No unused value found for draw {step} after {attempts} attempts")]
    ExhaustedAttempts { step: usize, attempts: u32 },

    #[error("Unsupported draw type: {0}")]
    UnsupportedType(String),

    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    #[error("Result does not match a replay of the recorded seed and config")]
    ResultMismatch,

    #[error("Hash mismatch: proof carries {recorded}, replay computed {computed}")]
    HashMismatch { recorded: String, computed: String },

    #[error("Stale proof: {0}")]
    StaleProof(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Stable failure classification handed across the core boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidInput,
    ExhaustedAttempts,
    UnsupportedType,
    MalformedProof,
    ResultMismatch,
    HashMismatch,
    StaleProof,
    Config,
    NotFound,
    Storage,
    Internal,
}

impl DrawError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unsupported_type(msg: impl Into<String>) -> Self {
        Self::UnsupportedType(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedProof(msg.into())
    }

    pub fn stale(msg: impl Into<String>) -> Self {
        Self::StaleProof(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::ExhaustedAttempts { .. } => ErrorKind::ExhaustedAttempts,
            Self::UnsupportedType(_) => ErrorKind::UnsupportedType,
            Self::MalformedProof(_) => ErrorKind::MalformedProof,
            Self::ResultMismatch => ErrorKind::ResultMismatch,
            Self::HashMismatch { .. } => ErrorKind::HashMismatch,
            Self::StaleProof(_) => ErrorKind::StaleProof,
            Self::Config(_) => ErrorKind::Config,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) | Self::Io(_) => ErrorKind::Storage,
            Self::Serialization(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// True for the verdicts a verifier hands back for a rejected proof.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MalformedProof
                | ErrorKind::ResultMismatch
                | ErrorKind::HashMismatch
                | ErrorKind::StaleProof
        )
    }
}
