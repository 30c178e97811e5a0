//! Menu item entity and its rating aggregate.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::errors::ValidationError;
use crate::domain::serde_utils::{null_as_default, number_or_string};

/// Menu item row identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodItemId(pub i64);

impl FoodItemId {
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for FoodItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for FoodItemId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for FoodItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Availability of a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemStatus {
    #[default]
    Available,
    /// Withdrawn from sale; cannot be added to a cart.
    OutOfOrder,
}

impl ItemStatus {
    const OUT_OF_ORDER: &'static str = "OUT OF ORDER";
    const AVAILABLE: &'static str = "available";

    /// Column value for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => Self::AVAILABLE,
            Self::OutOfOrder => Self::OUT_OF_ORDER,
        }
    }

    #[must_use]
    pub fn from_column(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case(Self::OUT_OF_ORDER) {
            Self::OutOfOrder
        } else {
            Self::Available
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => f.write_str("Available"),
            Self::OutOfOrder => f.write_str(Self::OUT_OF_ORDER),
        }
    }
}

impl Serialize for ItemStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ItemStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Self::Available, Self::from_column))
    }
}

/// A single customer rating of one to five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating(u8);

impl StarRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validates a star value.
    ///
    /// # Errors
    /// Returns error if the value is outside one to five.
    pub fn new(stars: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(ValidationError::invalid(
                "rating",
                format!("expected {} to {} stars, got {stars}", Self::MIN, Self::MAX),
            ))
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Running rating totals for a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingAggregate {
    pub sum: u64,
    pub count: u64,
}

impl RatingAggregate {
    pub const MAX_AVERAGE: f64 = 5.0;

    #[must_use]
    pub const fn new(sum: u64, count: u64) -> Self {
        Self { sum, count }
    }

    /// Adds one rating.
    #[must_use]
    pub const fn submit(self, rating: StarRating) -> Self {
        Self {
            sum: self.sum.saturating_add(rating.0 as u64),
            count: self.count.saturating_add(1),
        }
    }

    /// Mean of all submitted ratings, clamped to `[0, 5]`; zero when unrated.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.sum as f64 / self.count as f64).clamp(0.0, Self::MAX_AVERAGE)
    }

    /// Average rounded to one decimal, as stored in the `rating` column.
    #[must_use]
    pub fn display_rating(self) -> f64 {
        (self.average() * 10.0).round() / 10.0
    }
}

/// Menu item row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: FoodItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default, with = "number_or_string")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating_sum: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating_count: u64,
}

impl FoodItem {
    #[must_use]
    pub fn new(id: impl Into<FoodItemId>, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            description: None,
            image_url: None,
            status: ItemStatus::Available,
            rating: None,
            rating_sum: 0,
            rating_count: 0,
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        matches!(self.status, ItemStatus::Available)
    }

    #[must_use]
    pub const fn rating_aggregate(&self) -> RatingAggregate {
        RatingAggregate::new(self.rating_sum, self.rating_count)
    }

    /// Applies a new aggregate, keeping the stored rating in sync.
    pub fn apply_rating(&mut self, aggregate: RatingAggregate) {
        self.rating_sum = aggregate.sum;
        self.rating_count = aggregate.count;
        self.rating = Some(aggregate.display_rating());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;
    use serde_json::json;
    use test_case::test_case;

    fn stars(values: &[u8]) -> RatingAggregate {
        values
            .iter()
            .map(|v| StarRating::new(*v).unwrap())
            .fold(RatingAggregate::default(), RatingAggregate::submit)
    }

    #[test_case(&[5], 5.0 ; "single five")]
    #[test_case(&[1, 2, 3, 4, 5], 3.0 ; "full range")]
    #[test_case(&[4, 5], 4.5 ; "half star")]
    #[test_case(&[1, 1, 2], 4.0 / 3.0 ; "repeating fraction")]
    fn test_average_is_mean_of_submissions(values: &[u8], expected: f64) {
        let aggregate = stars(values);
        assert_eq!(aggregate.count, values.len() as u64);
        assert!((aggregate.average() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unrated_average_is_zero() {
        assert!(RatingAggregate::default().average().abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_is_clamped() {
        let corrupted = RatingAggregate::new(60, 10);
        assert!((corrupted.average() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_incremental_submit_from_existing_totals() {
        let current = RatingAggregate::new(9, 2);
        let next = current.submit(StarRating::new(3).unwrap());

        assert_eq!(next, RatingAggregate::new(12, 3));
        assert!((next.display_rating() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display_rating_rounds_to_one_decimal() {
        let aggregate = stars(&[1, 1, 2]);
        assert!((aggregate.display_rating() - 1.3).abs() < 1e-9);
    }

    #[test_case(0 ; "zero")]
    #[test_case(6 ; "six")]
    fn test_star_rating_out_of_range(value: u8) {
        assert!(StarRating::new(value).is_err());
    }

    #[test]
    fn test_food_item_from_row() {
        let row = json!({
            "id": 3,
            "title": "Bun bo Hue",
            "price": 45.5,
            "description": null,
            "imageUrl": "https://img.example/bun.png",
            "status": "OUT OF ORDER",
            "rating": "4.2",
            "rating_sum": 21,
            "rating_count": 5
        });

        let item: FoodItem = serde_json::from_value(row).unwrap();

        assert_eq!(item.id, FoodItemId(3));
        assert_eq!(item.price, Decimal::from_f64(45.5).unwrap());
        assert_eq!(item.status, ItemStatus::OutOfOrder);
        assert!(!item.is_orderable());
        assert_eq!(item.rating, Some(4.2));
        assert_eq!(item.rating_aggregate(), RatingAggregate::new(21, 5));
    }

    #[test]
    fn test_food_item_defaults_for_fresh_row() {
        let row = json!({
            "id": 8,
            "title": "Che",
            "price": "12",
            "status": null,
            "rating_sum": null,
            "rating_count": null
        });

        let item: FoodItem = serde_json::from_value(row).unwrap();

        assert_eq!(item.status, ItemStatus::Available);
        assert_eq!(item.price, Decimal::from(12));
        assert_eq!(item.rating_aggregate(), RatingAggregate::default());
        assert_eq!(item.rating, None);
    }

    #[test]
    fn test_apply_rating_updates_stored_fields() {
        let mut item = FoodItem::new(1, "Pho", Decimal::from(50));
        item.apply_rating(stars(&[4, 5]));

        assert_eq!(item.rating_sum, 9);
        assert_eq!(item.rating_count, 2);
        assert_eq!(item.rating, Some(4.5));
    }
}
