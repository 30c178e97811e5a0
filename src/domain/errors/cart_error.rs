//! Cart error types.

use thiserror::Error;

use crate::domain::entities::FoodItemId;

/// Cart mutation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("{title} is currently out of order")]
    OutOfOrder { title: String },

    #[error("item {id} is not in the cart")]
    UnknownItem { id: FoodItemId },

    #[error("your cart is empty")]
    Empty,
}
