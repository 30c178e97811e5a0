//! Authentication error types.

use thiserror::Error;

/// Authentication error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("invalid login credentials: {message}")]
    InvalidCredentials { message: String },

    #[error("session rejected by backend: {message}")]
    SessionRejected { message: String },

    #[error("no user session found")]
    NoSession,

    #[error("this account has been banned")]
    Banned,

    #[error("administrator access required")]
    NotAdmin,

    #[error("failed to retrieve stored session: {message}")]
    SessionRetrievalFailed { message: String },

    #[error("failed to store session: {message}")]
    SessionStorageFailed { message: String },

    #[error("network error during authentication: {message}")]
    NetworkError { message: String },

    #[error("rate limited by backend, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("unexpected authentication error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    /// Creates invalid credentials error.
    #[must_use]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    /// Creates session rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::SessionRejected {
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates retrieval failed error.
    #[must_use]
    pub fn retrieval_failed(message: impl Into<String>) -> Self {
        Self::SessionRetrievalFailed {
            message: message.into(),
        }
    }

    /// Creates storage failed error.
    #[must_use]
    pub fn storage_failed(message: impl Into<String>) -> Self {
        Self::SessionStorageFailed {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::RateLimited { .. })
    }
}
