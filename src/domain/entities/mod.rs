//! Domain entity definitions.

mod food_item;
mod order;
mod profile;
mod session;

pub use food_item::{FoodItem, FoodItemId, ItemStatus, RatingAggregate, StarRating};
pub use order::{Order, OrderId, OrderLine};
pub use profile::{Profile, ProfileId, Role};
pub use session::{SecretToken, Session, SessionUser};
