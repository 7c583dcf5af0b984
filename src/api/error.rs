use reqwest::StatusCode;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401: the bearer credential was missing, expired or revoked.
    #[error("unauthorized")]
    Unauthorized,
    /// Any other 4xx, carrying the backend's `message` for the user.
    #[error("request rejected with {status}: {message}")]
    Rejected { status: StatusCode, message: String },
    #[error("unexpected status code: {0}")]
    Status(StatusCode),
    #[error("error sending request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("error encoding request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("error parsing response: {0}")]
    Decode(String),
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    /// Maps a non-success status and its body to an error.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized
        } else if status.is_client_error() {
            ApiError::Rejected {
                status,
                message: extract_message(body).unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request rejected")
                        .to_string()
                }),
            }
        } else {
            ApiError::Status(status)
        }
    }

    /// The message to show the user, if this failure is meant to be shown at all.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::Rejected { status, .. } | ApiError::Status(status) => Some(*status),
            ApiError::Transport(e) => e.status(),
            ApiError::Encode(_) | ApiError::Decode(_) | ApiError::InvalidBaseUrl { .. } => None,
        }
    }
}

/// Pulls `message` out of an error body such as `{"message": "Email in use"}`.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::String(_) | Value::Null => None,
        other => Some(other.to_string()),
    }
}
