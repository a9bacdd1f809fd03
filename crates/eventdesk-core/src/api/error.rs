use serde::Deserialize;
use thiserror::Error;

/// Shown when an event id does not parse as a number.
pub const INVALID_EVENT_ID_MESSAGE: &str = "Please enter a valid numeric Event ID.";

/// Shown for any 404 from the API.
pub const NOT_FOUND_MESSAGE: &str = "Event not found. Please check the Event ID.";

/// Shown for any 400 from the API.
pub const BAD_REQUEST_MESSAGE: &str = "Invalid data. Please check the input fields.";

/// Shown when the request went out but nothing came back.
pub const NO_RESPONSE_MESSAGE: &str =
    "No response from the server. Please check your network connection.";

/// Failure of a single API action.
///
/// Each variant corresponds to exactly one origin: local validation, a
/// server status, the transport, or request construction. None of them are
/// retried; the user has to trigger the action again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error ({status}): {body}")]
    Server {
        status: u16,
        message: Option<String>,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request could not be sent: {0}")]
    Construction(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error payload shape used by the API (`{"message": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        match body.char_indices().nth(MAX_ERROR_BODY_LENGTH) {
            None => body.to_string(),
            Some((cut, _)) => format!(
                "{}... (truncated, {} total bytes)",
                &body[..cut],
                body.len()
            ),
        }
    }

    /// Pull the server-supplied `message` field out of an error body, if any.
    fn server_message(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            404 => ApiError::NotFound(truncated),
            400 => ApiError::BadRequest(truncated),
            code => ApiError::Server {
                status: code,
                message: Self::server_message(body),
                body: truncated,
            },
        }
    }

    /// Classify a failure reported by reqwest before any status was seen.
    ///
    /// Builder errors mean the request never left the client; everything
    /// else (connect, timeout, reset, body read) counts as no response.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::Construction(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// A 2xx response whose body did not match the expected shape.
    pub fn from_decode(status: reqwest::StatusCode, err: &serde_json::Error, body: &str) -> Self {
        ApiError::Server {
            status: status.as_u16(),
            message: Some(format!("Invalid response from server: {}", err)),
            body: Self::truncate_body(body),
        }
    }

    /// The message shown to the user, both inline and in the notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::NotFound(_) => NOT_FOUND_MESSAGE.to_string(),
            ApiError::BadRequest(_) => BAD_REQUEST_MESSAGE.to_string(),
            ApiError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Server { status, .. } => format!("Unexpected error ({})", status),
            ApiError::Network(_) => NO_RESPONSE_MESSAGE.to_string(),
            ApiError::Construction(cause) => format!("Error: {}", cause),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}
