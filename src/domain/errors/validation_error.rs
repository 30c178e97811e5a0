//! Input validation errors.

use thiserror::Error;

/// Rejected user input, raised before any backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    #[must_use]
    pub const fn required(field: &'static str) -> Self {
        Self::Required { field }
    }

    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// Fails with [`ValidationError::Required`] when the value is blank.
    ///
    /// # Errors
    /// Returns error if `value` is empty or whitespace.
    pub fn require(field: &'static str, value: &str) -> Result<(), Self> {
        if value.trim().is_empty() {
            Err(Self::required(field))
        } else {
            Ok(())
        }
    }
}
