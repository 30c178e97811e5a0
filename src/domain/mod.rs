//! Domain layer with core business entities and port definitions.

/// Client-side shopping cart.
pub mod cart;
/// Menu search and sort state.
pub mod catalog;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Decimal money helpers.
pub mod money;
/// Port definitions.
pub mod ports;
/// Row query model shared by ports and adapters.
pub mod query;
/// Sales aggregation.
pub mod sales;
/// Serde utilities.
pub mod serde_utils;

pub use cart::Cart;
pub use entities::{FoodItem, Order, Profile, Role, Session};
pub use errors::{AuthError, CartError, StoreError, ValidationError};
pub use ports::{AuthPort, RowStorePort, SessionStoragePort};
