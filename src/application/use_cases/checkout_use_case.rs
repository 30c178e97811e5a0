//! Checkout use case.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::application::AppError;
use crate::application::dto::{ContactDetails, OrderReceipt};
use crate::domain::cart::Cart;
use crate::domain::entities::{Order, ProfileId};
use crate::domain::errors::{CartError, StoreError};
use crate::domain::ports::{RowStorePort, decode};
use crate::domain::query::{RowQuery, Tables};

#[derive(Deserialize)]
struct ContactRow {
    #[serde(default, rename = "phoneNumber")]
    phone_number: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

/// Turns a cart into a placed order.
#[derive(Clone)]
pub struct CheckoutUseCase {
    store: Arc<dyn RowStorePort>,
    tables: Tables,
}

impl CheckoutUseCase {
    #[must_use]
    pub const fn new(store: Arc<dyn RowStorePort>, tables: Tables) -> Self {
        Self { store, tables }
    }

    /// Phone number and address saved on the profile, for prefilling.
    ///
    /// # Errors
    /// Returns error if the lookup fails for a reason other than a missing profile.
    pub async fn contact_defaults(&self, user: ProfileId) -> Result<ContactDetails, AppError> {
        let table = &self.tables.profiles;
        let query = RowQuery::from(table)
            .select("phoneNumber, address")
            .eq("id", user);

        match self.store.select_single(&query).await {
            Ok(row) => {
                let contact: ContactRow = decode(table, row)?;
                Ok(ContactDetails::new(
                    contact.phone_number.unwrap_or_default(),
                    contact.address.unwrap_or_default(),
                ))
            }
            Err(e) if e.is_not_found() => {
                debug!(user_id = %user, "No profile to prefill contact from");
                Ok(ContactDetails::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the order and returns it as stored.
    ///
    /// The cart is left untouched; callers clear it once this succeeds.
    ///
    /// # Errors
    /// Returns error if the cart is empty, contact details are blank or the
    /// insert fails.
    pub async fn place_order(
        &self,
        user: ProfileId,
        cart: &Cart,
        contact: ContactDetails,
    ) -> Result<OrderReceipt, AppError> {
        if cart.is_empty() {
            return Err(CartError::Empty.into());
        }
        contact.validate()?;

        let table = &self.tables.orders;
        let items = serde_json::to_string(&cart.snapshot())
            .map_err(|e| StoreError::unexpected(format!("failed to encode order items: {e}")))?;
        let total = cart.total();

        let row = json!({
            "items": items,
            "total": total,
            "phoneNumber": contact.phone_number.trim(),
            "address": contact.address.trim(),
            "user_id": user,
            "note": contact.note,
        });

        let mut inserted = self.store.insert(table, vec![row]).await?;
        if inserted.is_empty() {
            return Err(StoreError::unexpected("insert returned no order row").into());
        }
        let order: Order = decode(table, inserted.remove(0))?;

        info!(
            order_id = %order.id,
            user_id = %user,
            lines = order.items.len(),
            total = %order.total,
            "Order placed"
        );
        Ok(OrderReceipt { order })
    }
}
