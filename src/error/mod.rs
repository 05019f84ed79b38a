use launchpad_core::LaunchpadError;
use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

mod utils;
pub use utils::*;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("API error: {service} - {message}")]
    Api {
        service: String,
        message: String,
        status: Option<u16>,
    },

    #[error("HTTP error: {status} - {message}")]
    HttpError { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid input: {kind} - {message}")]
    InvalidInput {
        kind: InputErrorKind,
        message: String,
    },

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputErrorKind {
    InvalidAmount,
    InvalidPrice,
    InvalidRange,
    Other,
}

impl fmt::Display for InputErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount => write!(f, "Invalid amount"),
            Self::InvalidPrice => write!(f, "Invalid price"),
            Self::InvalidRange => write!(f, "Invalid price range"),
            Self::Other => write!(f, "Other input error"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

impl ScreenerError {
    pub fn api(
        service: impl Into<String>,
        message: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        ScreenerError::Api {
            service: service.into(),
            message: message.into(),
            status,
        }
    }

    pub fn invalid_input(kind: InputErrorKind, message: impl Into<String>) -> Self {
        ScreenerError::InvalidInput {
            kind,
            message: message.into(),
        }
    }

    /// Whether a later attempt could plausibly succeed. The poller does not
    /// retry on its own; this only drives log severity and health reporting.
    pub fn is_retryable(&self) -> bool {
        match self {
            ScreenerError::Api { status: Some(status), .. } => *status >= 500,
            ScreenerError::Api { status: None, .. } => true,
            ScreenerError::HttpError { status, .. } => status.is_server_error(),
            ScreenerError::NetworkError(_) => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ScreenerError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ScreenerError::HttpError {
                status,
                message: err.to_string(),
            }
        } else {
            ScreenerError::NetworkError(err.to_string())
        }
    }
}

impl From<LaunchpadError> for ScreenerError {
    fn from(err: LaunchpadError) -> Self {
        match err {
            LaunchpadError::Http { status, body } => {
                ScreenerError::api("launchpad", body, Some(status))
            }
            LaunchpadError::Transport(e) => handle_reqwest_error(e, "launchpad list"),
            LaunchpadError::Decode(e) => ScreenerError::Serialization(e),
            LaunchpadError::InvalidConfig(msg) => ScreenerError::ConfigError(msg),
        }
    }
}
