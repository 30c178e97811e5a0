//! Client-side shopping cart.
//!
//! The cart lives for one checkout session and is never persisted.

use rust_decimal::Decimal;

use crate::domain::entities::{FoodItem, FoodItemId, OrderLine};
use crate::domain::errors::CartError;
use crate::domain::money;

/// Largest quantity accepted for one line in a single request.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item_id: FoodItemId,
    pub title: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Ordered collection of cart lines, one per menu item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`.
    ///
    /// # Errors
    /// Returns [`CartError::OutOfOrder`] if the item is not available.
    pub fn add(&mut self, item: &FoodItem) -> Result<u32, CartError> {
        self.add_many(item, 1)
    }

    /// Adds `quantity` units of `item` and returns the line quantity.
    ///
    /// # Errors
    /// Returns [`CartError::OutOfOrder`] if the item is not available.
    pub fn add_many(&mut self, item: &FoodItem, quantity: u32) -> Result<u32, CartError> {
        if !item.is_orderable() {
            return Err(CartError::OutOfOrder {
                title: item.title.clone(),
            });
        }

        if let Some(line) = self.line_mut(item.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return Ok(line.quantity);
        }

        self.lines.push(CartLine {
            item_id: item.id,
            title: item.title.clone(),
            price: item.price,
            quantity,
        });
        Ok(quantity)
    }

    /// Removes one unit, dropping the line when it reaches zero.
    ///
    /// Returns the remaining quantity.
    ///
    /// # Errors
    /// Returns [`CartError::UnknownItem`] if the item is not in the cart.
    pub fn decrement(&mut self, id: FoodItemId) -> Result<u32, CartError> {
        let index = self.index_of(id)?;
        let line = &mut self.lines[index];
        if line.quantity > 1 {
            line.quantity -= 1;
            Ok(line.quantity)
        } else {
            self.lines.remove(index);
            Ok(0)
        }
    }

    /// Adds one unit to an existing line.
    ///
    /// # Errors
    /// Returns [`CartError::UnknownItem`] if the item is not in the cart.
    pub fn increase_quantity(&mut self, id: FoodItemId) -> Result<u32, CartError> {
        let line = self.line_mut(id).ok_or(CartError::UnknownItem { id })?;
        line.quantity = line.quantity.saturating_add(1);
        Ok(line.quantity)
    }

    /// Removes one unit but never goes below one.
    ///
    /// # Errors
    /// Returns [`CartError::UnknownItem`] if the item is not in the cart.
    pub fn decrease_quantity(&mut self, id: FoodItemId) -> Result<u32, CartError> {
        let line = self.line_mut(id).ok_or(CartError::UnknownItem { id })?;
        line.quantity = line.quantity.saturating_sub(1).max(1);
        Ok(line.quantity)
    }

    /// Removes the whole line.
    ///
    /// # Errors
    /// Returns [`CartError::UnknownItem`] if the item is not in the cart.
    pub fn remove(&mut self, id: FoodItemId) -> Result<CartLine, CartError> {
        let index = self.index_of(id)?;
        Ok(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of price times quantity, rounded to cents.
    #[must_use]
    pub fn total(&self) -> Decimal {
        money::round(self.lines.iter().map(CartLine::subtotal).sum())
    }

    /// Line snapshot stored with the order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|l| OrderLine::new(l.title.clone(), l.quantity, l.price))
            .collect()
    }

    fn index_of(&self, id: FoodItemId) -> Result<usize, CartError> {
        self.lines
            .iter()
            .position(|l| l.item_id == id)
            .ok_or(CartError::UnknownItem { id })
    }

    fn line_mut(&mut self, id: FoodItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.item_id == id)
    }
}
