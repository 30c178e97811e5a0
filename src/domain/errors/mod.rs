//! Domain error types.

mod auth_error;
mod cart_error;
mod store_error;
mod validation_error;

pub use auth_error::AuthError;
pub use cart_error::CartError;
pub use store_error::StoreError;
pub use validation_error::ValidationError;
