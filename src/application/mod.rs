//! Application layer with use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Application error type.
pub mod error;
/// Use case implementations.
pub mod use_cases;

pub use dto::{Destination, SignInRequest, SignInResponse};
pub use error::AppError;
pub use use_cases::{ResolveSessionUseCase, SignInUseCase};
