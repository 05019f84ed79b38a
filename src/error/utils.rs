use super::ScreenerError;
use tracing::{error, warn};

/// Logs an error with severity chosen by its kind.
///
/// Upstream hiccups (5xx, network) are expected while polling a third-party
/// listing and are logged as warnings; everything else is an error.
pub fn log_error(error: &ScreenerError, context: &str) {
    match error {
        ScreenerError::HttpError { status, message } => {
            if status.is_server_error() {
                warn!("{} - HTTP error {}: {}", context, status, message);
            } else {
                error!("{} - HTTP error {}: {}", context, status, message);
            }
        }
        ScreenerError::Api { service, message, status } => {
            if error.is_retryable() {
                warn!(service = %service, status = ?status, "{} - API error: {}", context, message);
            } else {
                error!(
                    service = %service,
                    status = ?status,
                    "{} - API error: {}",
                    context,
                    message
                );
            }
        }
        ScreenerError::NetworkError(msg) => {
            warn!("{} - Network error: {}", context, msg);
        }
        ScreenerError::Serialization(e) => {
            warn!("{} - Malformed response: {}", context, e);
        }
        ScreenerError::ConfigError(msg) => {
            error!("{} - Configuration error: {}", context, msg);
        }
        ScreenerError::InternalError(msg) => {
            error!("{} - Internal error: {}", context, msg);
        }
        _ => error!("{} - Unexpected error: {}", context, error),
    }
}

/// Converts a reqwest error to a ScreenerError with additional context.
pub fn handle_reqwest_error(error: reqwest::Error, context: &str) -> ScreenerError {
    if error.is_timeout() {
        ScreenerError::NetworkError(format!("{}: Request timed out - {}", context, error))
    } else if let Some(status) = error.status() {
        ScreenerError::HttpError {
            status,
            message: format!("{}: {}", context, error),
        }
    } else {
        ScreenerError::NetworkError(format!("{}: {}", context, error))
    }
}
