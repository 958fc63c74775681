//! Standardized HTTP error classification for registry and destination calls

use crate::error::{ApiError, TransportError};
use reqwest::StatusCode;

/// Standard error handler for HTTP responses
pub struct HttpErrorHandler;

impl HttpErrorHandler {
    /// Handle source-registry HTTP errors (catalog and tag listing)
    pub fn handle_registry_error(
        status: StatusCode,
        error_text: &str,
        operation: &str,
    ) -> TransportError {
        let error_msg = match status.as_u16() {
            401 => format!(
                "Unauthorized to perform {} operation, check the registry credentials: {}",
                operation, error_text
            ),
            403 => format!(
                "Forbidden: insufficient permissions for {}: {}",
                operation, error_text
            ),
            404 => format!("Resource not found for {}: {}", operation, error_text),
            429 => format!("Rate limited during {}: {}", operation, error_text),
            500 => format!("Registry server error during {}: {}", operation, error_text),
            502 | 503 => format!("Registry unavailable for {}: {}", operation, error_text),
            _ => format!("{} failed (status {}): {}", operation, status, error_text),
        };

        TransportError::Status(error_msg)
    }

    /// Destination API calls only count HTTP 200 as success
    pub fn check_api_status(status: StatusCode, operation: &str) -> Result<(), ApiError> {
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(ApiError::Status {
                operation: operation.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

/// Network error categorization and handling
pub struct NetworkErrorHandler;

impl NetworkErrorHandler {
    /// Categorize and format network errors with helpful context
    pub fn describe(error: &reqwest::Error, context: &str) -> String {
        if error.is_timeout() {
            format!("{} timeout: {}", context, error)
        } else if error.is_connect() {
            format!("Connection error during {}: {}", context, error)
        } else if error.to_string().contains("certificate") {
            format!("TLS certificate error during {}: {}", context, error)
        } else {
            format!("{} network error: {}", context, error)
        }
    }

    pub fn handle_network_error(error: &reqwest::Error, url: &str, context: &str) -> TransportError {
        TransportError::Request {
            url: url.to_string(),
            reason: Self::describe(error, context),
        }
    }
}
