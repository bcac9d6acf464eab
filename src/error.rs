// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Errors raised while talking to the marketplace backend.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout, or TLS failure.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; `message` comes from the body when the server sent one.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Please sign in first.")]
    MissingSession,

    #[error("Failed to read {name}: {source}")]
    File {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_shows_server_message() {
        let err = ApiError::Status {
            status: 403,
            message: "Forbidden".into(),
        };
        assert_eq!(err.to_string(), "Forbidden (HTTP 403)");
        assert!(!err.is_not_found());
        assert!(
            ApiError::Status {
                status: 404,
                message: String::new()
            }
            .is_not_found()
        );
    }
}
