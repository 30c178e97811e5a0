//! Data transfer objects for the application layer.

mod auth_dto;
mod catalog_dto;
mod order_dto;

pub use auth_dto::{Destination, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse};
pub use catalog_dto::{ItemChanges, NewItemRequest, ProfileChanges};
pub use order_dto::{ContactDetails, DetailLine, OrderDetails, OrderReceipt};
