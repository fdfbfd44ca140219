use std::fmt;

use thiserror::Error;

/// Why the keyword-metrics provider rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFailure {
    /// 401: the API key was rejected.
    Unauthorized,
    /// 402/403: the account is out of credits or not allowed to call the endpoint.
    InsufficientCredit,
    /// 429: too many requests.
    RateLimited,
    /// Any other non-success status, transport failure or undecodable body.
    Other,
}

impl ProviderFailure {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            402 | 403 => Self::InsufficientCredit,
            429 => Self::RateLimited,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::InsufficientCredit => write!(f, "insufficient credit"),
            Self::RateLimited => write!(f, "rate limited"),
            Self::Other => write!(f, "request failed"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No keyword provider API key configured")]
    MissingCredential,

    #[error("Keyword provider error ({reason}): {message}")]
    Provider {
        reason: ProviderFailure,
        status: Option<u16>,
        message: String,
    },

    #[error(
        "Keyword provider returned implausible data: '{keyword}' reported {volume} monthly searches (limit {threshold})"
    )]
    SuspiciousData {
        keyword: String,
        volume: u64,
        threshold: u64,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ScoutError {
    pub fn provider(reason: ProviderFailure, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Provider {
            reason,
            status,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
