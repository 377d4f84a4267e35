//! Client error types

use serde::Deserialize;
use thiserror::Error;

/// Client error type
///
/// The backend errors (400/404/5xx) carry the structured `detail` message
/// when the response body had one; an unstructured body (a proxy's HTML
/// error page, an empty body) carries `None` and callers fall back to
/// their own generic message.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request rejected by the backend (400)
    #[error("Validation error: {}", .0.as_deref().unwrap_or("no detail"))]
    Validation(Option<String>),

    /// Resource not found (404)
    #[error("Not found: {}", .0.as_deref().unwrap_or("no detail"))]
    NotFound(Option<String>),

    /// Backend failure (5xx)
    #[error("Internal error: {}", .0.as_deref().unwrap_or("no detail"))]
    Internal(Option<String>),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// The backend's own error message when the response carried one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Validation(d) | ClientError::NotFound(d) | ClientError::Internal(d) => {
                d.as_deref()
            }
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Extract the backend's structured `{"detail": ...}` message from an
/// error body
///
/// `None` for anything else: raw text, HTML error pages, empty bodies,
/// or a blank detail field.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|parsed| parsed.detail)
        .filter(|detail| !detail.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_detail_is_extracted() {
        assert_eq!(
            error_detail(r#"{"detail":"barber unavailable"}"#),
            Some("barber unavailable".to_string())
        );
    }

    #[test]
    fn unstructured_body_has_no_detail() {
        assert_eq!(error_detail("gateway timeout"), None);
        assert_eq!(
            error_detail("<html><body>502 Bad Gateway</body></html>"),
            None
        );
    }

    #[test]
    fn empty_and_blank_bodies_have_no_detail() {
        assert_eq!(error_detail(""), None);
        assert_eq!(error_detail(r#"{"detail":"   "}"#), None);
    }

    #[test]
    fn detail_accessor_only_covers_backend_messages() {
        assert_eq!(
            ClientError::Validation(Some("bad date".into())).detail(),
            Some("bad date")
        );
        assert_eq!(ClientError::Internal(None).detail(), None);
        assert_eq!(
            ClientError::InvalidResponse("truncated".into()).detail(),
            None
        );
    }
}
