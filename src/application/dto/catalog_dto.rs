//! Inventory and profile edit DTOs.

use rust_decimal::Decimal;
use serde_json::{Map, Value, json};

use crate::domain::errors::ValidationError;
use crate::domain::money;

/// New menu item as entered by an administrator.
#[derive(Debug, Clone, Default)]
pub struct NewItemRequest {
    pub title: String,
    /// Raw price text, parsed on submit.
    pub price: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl NewItemRequest {
    #[must_use]
    pub fn new(title: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
            ..Self::default()
        }
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

    /// Validates the input and builds the row to insert.
    ///
    /// # Errors
    /// Returns error if the title is blank or the price does not parse.
    pub fn to_row(&self) -> Result<Value, ValidationError> {
        ValidationError::require("title", &self.title)?;
        let price = money::parse_price(&self.price)?;

        Ok(json!({
            "title": self.title.trim(),
            "price": price,
            "description": self.description,
            "imageUrl": self.image_url,
            "status": crate::domain::entities::ItemStatus::Available,
            "rating_sum": 0,
            "rating_count": 0,
        }))
    }
}

/// Partial edit of a menu item; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl ItemChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
    }

    /// Builds the patch to apply.
    ///
    /// # Errors
    /// Returns error if nothing changes, a title is blank or a price does not parse.
    pub fn to_patch(&self) -> Result<Value, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::invalid("changes", "nothing to update"));
        }

        let mut patch = Map::new();
        if let Some(title) = &self.title {
            ValidationError::require("title", title)?;
            patch.insert("title".into(), json!(title.trim()));
        }
        if let Some(price) = &self.price {
            let price: Decimal = money::parse_price(price)?;
            patch.insert("price".into(), json!(price));
        }
        if let Some(description) = &self.description {
            patch.insert("description".into(), json!(description));
        }
        if let Some(image_url) = &self.image_url {
            patch.insert("imageUrl".into(), json!(image_url));
        }
        Ok(Value::Object(patch))
    }
}

/// Profile fields edited by the account owner or an administrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub full_name: String,
    pub phone_number: String,
    pub address: String,
    pub username: Option<String>,
}

impl ProfileChanges {
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone_number: phone_number.into(),
            address: address.into(),
            username: None,
        }
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Full name, phone number and address are all required.
    ///
    /// # Errors
    /// Returns error naming the first blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require("full name", &self.full_name)?;
        ValidationError::require("phone number", &self.phone_number)?;
        ValidationError::require("address", &self.address)
    }

    /// Column values for this edit.
    #[must_use]
    pub fn to_patch(&self) -> Value {
        let mut patch = Map::new();
        patch.insert("full_name".into(), json!(self.full_name.trim()));
        patch.insert("phoneNumber".into(), json!(self.phone_number.trim()));
        patch.insert("address".into(), json!(self.address.trim()));
        if let Some(username) = &self.username {
            patch.insert("username".into(), json!(username.trim()));
        }
        Value::Object(patch)
    }
}
