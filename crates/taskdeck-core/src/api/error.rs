use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// What the API sent back alongside a failure status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBody {
    /// The `message` field, when the body is JSON and has one
    pub message: Option<String>,
    /// Truncated raw body
    pub raw: String,
}

#[derive(Deserialize)]
struct MessageField {
    message: Option<String>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        let message = serde_json::from_str::<MessageField>(body)
            .ok()
            .and_then(|m| m.message)
            .filter(|m| !m.trim().is_empty());
        Self {
            message,
            raw: truncate_body(body),
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message {
            Some(ref message) => write!(f, "{}", message),
            None => write!(f, "{}", self.raw),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - token missing, invalid or expired")]
    Unauthorized(ErrorBody),

    #[error("Access denied: {0}")]
    AccessDenied(ErrorBody),

    #[error("Resource not found: {0}")]
    NotFound(ErrorBody),

    #[error("Rate limited - please wait before retrying")]
    RateLimited(ErrorBody),

    #[error("Request rejected ({status}): {body}")]
    Rejected { status: u16, body: ErrorBody },

    #[error("Server error ({status}): {body}")]
    ServerError { status: u16, body: ErrorBody },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Truncate a response body to avoid logging excessive data
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }
}

impl ApiError {
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = ErrorBody::parse(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized(body),
            403 => ApiError::AccessDenied(body),
            404 => ApiError::NotFound(body),
            429 => ApiError::RateLimited(body),
            code @ 500..=599 => ApiError::ServerError { status: code, body },
            code => ApiError::Rejected { status: code, body },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::AccessDenied(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::RateLimited(_) => Some(429),
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::ServerError { status, .. } => Some(*status),
            ApiError::NetworkError(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidResponse(_) => None,
        }
    }

    /// The server's own `message`, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(body)
            | ApiError::AccessDenied(body)
            | ApiError::NotFound(body)
            | ApiError::RateLimited(body)
            | ApiError::Rejected { body, .. }
            | ApiError::ServerError { body, .. } => body.message.as_deref(),
            ApiError::NetworkError(_) | ApiError::InvalidResponse(_) => None,
        }
    }

    /// Text to show the user: the server's message or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_maps_variants() {
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, "").is_unauthorized());
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, ""),
            ApiError::AccessDenied(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, ""),
            ApiError::Rejected { status: 400, .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, ""),
            ApiError::ServerError { status: 502, .. }
        ));
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ApiError::from_status(
            StatusCode::CONFLICT,
            r#"{"message":"Project name already in use","code":"DUP"}"#,
        );
        assert_eq!(err.server_message(), Some("Project name already in use"));
        assert_eq!(err.user_message("fallback"), "Project name already in use");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, "<html>oops</html>");
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message("Could not save"), "Could not save");

        let blank = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"message":"  "}"#);
        assert_eq!(blank.user_message("Could not save"), "Could not save");
    }

    #[test]
    fn test_truncate_body() {
        let long = "é".repeat(400);
        let truncated = truncate_body(&long);
        assert!(truncated.contains("truncated, 800 total bytes"));
        assert_eq!(truncate_body("short"), "short");
    }
}
