use std::fmt;

use serde::{Deserialize, Serialize};

/// The access/refresh credential pair handed out by the backend.
///
/// Persisted as a single JSON record `{"token": ..., "refreshToken": ...}`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        TokenPair {
            token: token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Both fields are bearer credentials; keep them out of logs.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}
