//! Application error aggregating the domain error types.

use thiserror::Error;

use crate::domain::errors::{AuthError, CartError, StoreError, ValidationError};

/// Any failure a use case can surface to the user.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AppError {
    /// Whether the error came from the network rather than the request itself.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        match self {
            Self::Auth(e) => e.is_network_error(),
            Self::Store(e) => matches!(e, StoreError::Network { .. } | StoreError::RateLimited { .. }),
            Self::Cart(_) | Self::Validation(_) => false,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_passed_through() {
        let error: AppError = ValidationError::required("address").into();
        assert_eq!(error.to_string(), "address is required");
    }

    #[test]
    fn test_network_classification() {
        assert!(AppError::from(StoreError::network("timeout")).is_network_error());
        assert!(AppError::from(AuthError::network("timeout")).is_network_error());
        assert!(!AppError::from(CartError::Empty).is_network_error());
        assert!(AppError::from(StoreError::not_found("profiles")).is_not_found());
    }
}
