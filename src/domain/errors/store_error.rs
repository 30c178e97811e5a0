//! Row store error types.

use thiserror::Error;

/// Errors returned by row store operations.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StoreError {
    #[error("no matching row in {table}")]
    NotFound { table: String },

    #[error("request rejected by backend: {message}")]
    Rejected { message: String },

    #[error("rate limited by backend, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode {table} row: {message}")]
    Decode { table: String, message: String },

    #[error("unexpected store error: {message}")]
    Unexpected { message: String },
}

impl StoreError {
    #[must_use]
    pub fn not_found(table: impl Into<String>) -> Self {
        Self::NotFound {
            table: table.into(),
        }
    }

    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn decode(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            table: table.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
