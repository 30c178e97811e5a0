//! Placed order entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::profile::ProfileId;
use crate::domain::money;
use crate::domain::serde_utils::{json_string, null_as_default};

/// Order row identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for OrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Snapshot of one cart line at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub title: String,
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Decimal,
}

impl OrderLine {
    #[must_use]
    pub fn new(title: impl Into<String>, quantity: u32, price: Decimal) -> Self {
        Self {
            title: title.into(),
            quantity,
            price,
        }
    }

    /// Price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Order row as written at checkout and read back by history and analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "json_string")]
    pub items: Vec<OrderLine>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: Decimal,
    #[serde(default, rename = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub user_id: Option<ProfileId>,
}

impl Order {
    /// Sum of the snapshot lines, rounded to cents.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        money::round(self.items.iter().map(OrderLine::subtotal).sum())
    }

    /// Note text if present and not blank.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref().filter(|n| !n.trim().is_empty())
    }
}
