//! Checkout and order detail DTOs.

use rust_decimal::Decimal;

use crate::domain::entities::{Order, OrderLine};
use crate::domain::errors::ValidationError;

/// Delivery contact collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub phone_number: String,
    pub address: String,
    pub note: Option<String>,
}

impl ContactDetails {
    #[must_use]
    pub fn new(phone_number: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            address: address.into(),
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = (!note.trim().is_empty()).then_some(note);
        self
    }

    /// Fills blank fields from another set of details.
    #[must_use]
    pub fn or(mut self, defaults: &Self) -> Self {
        if self.phone_number.trim().is_empty() {
            self.phone_number.clone_from(&defaults.phone_number);
        }
        if self.address.trim().is_empty() {
            self.address.clone_from(&defaults.address);
        }
        self
    }

    /// Phone number and address are both required.
    ///
    /// # Errors
    /// Returns error naming the first blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require("phone number", &self.phone_number)?;
        ValidationError::require("address", &self.address)
    }
}

/// Placed order as confirmed to the customer.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub order: Order,
}

impl OrderReceipt {
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.order.total
    }
}

/// One order line with its menu image, when one could be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub line: OrderLine,
    pub image_url: Option<String>,
}

/// Order with resolved line images and, for administrators, the customer name.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: Order,
    pub lines: Vec<DetailLine>,
    pub customer_name: Option<String>,
}
