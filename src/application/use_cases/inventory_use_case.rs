//! Menu inventory administration.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::info;

use crate::application::AppError;
use crate::application::dto::{ItemChanges, NewItemRequest};
use crate::domain::entities::{FoodItem, FoodItemId, ItemStatus};
use crate::domain::errors::StoreError;
use crate::domain::ports::{RowStorePort, decode, decode_all};
use crate::domain::query::{Filter, RowQuery, Tables};

/// Adds, edits and withdraws menu items.
#[derive(Clone)]
pub struct InventoryUseCase {
    store: Arc<dyn RowStorePort>,
    tables: Tables,
}

impl InventoryUseCase {
    #[must_use]
    pub const fn new(store: Arc<dyn RowStorePort>, tables: Tables) -> Self {
        Self { store, tables }
    }

    /// # Errors
    /// Returns error if the select fails or a row does not decode.
    pub async fn list(&self) -> Result<Vec<FoodItem>, AppError> {
        let table = &self.tables.food_items;
        let rows = self.store.select(&RowQuery::from(table)).await?;
        Ok(decode_all(table, rows)?)
    }

    /// Inserts a new available item and returns the created row.
    ///
    /// # Errors
    /// Returns error if the title is blank, the price is invalid or the insert fails.
    pub async fn add_item(&self, request: NewItemRequest) -> Result<FoodItem, AppError> {
        let row = request.to_row()?;
        let table = &self.tables.food_items;

        let mut inserted = self.store.insert(table, vec![row]).await?;
        if inserted.is_empty() {
            return Err(StoreError::unexpected("insert returned no item row").into());
        }
        let item: FoodItem = decode(table, inserted.remove(0))?;

        info!(item_id = %item.id, title = %item.title, price = %item.price, "Menu item added");
        Ok(item)
    }

    /// Applies a partial edit.
    ///
    /// # Errors
    /// Returns error if the edit is invalid or no item has this id.
    pub async fn update_item(&self, id: FoodItemId, changes: ItemChanges) -> Result<FoodItem, AppError> {
        let patch = changes.to_patch()?;
        let item = self.patch(id, patch).await?;
        info!(item_id = %id, "Menu item updated");
        Ok(item)
    }

    /// Withdraws an item from sale. Rows are never deleted.
    ///
    /// # Errors
    /// Returns error if no item has this id.
    pub async fn mark_out_of_order(&self, id: FoodItemId) -> Result<FoodItem, AppError> {
        self.set_status(id, ItemStatus::OutOfOrder).await
    }

    /// Puts a withdrawn item back on sale.
    ///
    /// # Errors
    /// Returns error if no item has this id.
    pub async fn mark_available(&self, id: FoodItemId) -> Result<FoodItem, AppError> {
        self.set_status(id, ItemStatus::Available).await
    }

    async fn set_status(&self, id: FoodItemId, status: ItemStatus) -> Result<FoodItem, AppError> {
        let item = self.patch(id, json!({ "status": status })).await?;
        info!(item_id = %id, status = %status, "Menu item status changed");
        Ok(item)
    }

    async fn patch(&self, id: FoodItemId, patch: Value) -> Result<FoodItem, AppError> {
        let table = &self.tables.food_items;
        let mut updated = self
            .store
            .update(table, patch, &[Filter::eq("id", id)])
            .await?;
        if updated.is_empty() {
            return Err(StoreError::not_found(table.as_str()).into());
        }
        Ok(decode(table, updated.remove(0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ValidationError;
    use crate::domain::ports::mocks::InMemoryRowStore;
    use rust_decimal::Decimal;

    async fn store() -> Arc<InMemoryRowStore> {
        Arc::new(
            InMemoryRowStore::new()
                .with_rows(
                    "food_items",
                    vec![json!({ "id": 1, "title": "Pho", "price": 45.5, "status": "available" })],
                )
                .await,
        )
    }

    #[tokio::test]
    async fn test_add_item_returns_created_row() {
        let store = store().await;
        let use_case = InventoryUseCase::new(store.clone(), Tables::default());

        let item = use_case
            .add_item(NewItemRequest::new("Bun cha", "35").with_image_url("https://img/bun.png"))
            .await
            .unwrap();

        assert_eq!(item.title, "Bun cha");
        assert_eq!(item.price, Decimal::from(35));
        assert!(item.is_orderable());
        assert_eq!(store.rows("food_items").await.len(), 2);
    }

    #[tokio::test]
    async fn test_add_item_rejects_negative_price() {
        let store = store().await;
        let use_case = InventoryUseCase::new(store.clone(), Tables::default());

        let result = use_case.add_item(NewItemRequest::new("Bun cha", "-1")).await;

        assert!(matches!(result, Err(AppError::Validation(ValidationError::Invalid { .. }))));
        assert_eq!(store.rows("food_items").await.len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_order_and_back() {
        let use_case = InventoryUseCase::new(store().await, Tables::default());

        let item = use_case.mark_out_of_order(FoodItemId(1)).await.unwrap();
        assert_eq!(item.status, ItemStatus::OutOfOrder);

        let item = use_case.mark_available(FoodItemId(1)).await.unwrap();
        assert_eq!(item.status, ItemStatus::Available);
    }

    #[tokio::test]
    async fn test_out_of_order_stores_column_value() {
        let store = store().await;
        let use_case = InventoryUseCase::new(store.clone(), Tables::default());

        use_case.mark_out_of_order(FoodItemId(1)).await.unwrap();

        assert_eq!(store.rows("food_items").await[0]["status"], "OUT OF ORDER");
    }

    #[tokio::test]
    async fn test_update_item() {
        let use_case = InventoryUseCase::new(store().await, Tables::default());
        let changes = ItemChanges {
            title: Some("Pho bo".into()),
            price: Some("50".into()),
            ..ItemChanges::default()
        };

        let item = use_case.update_item(FoodItemId(1), changes).await.unwrap();

        assert_eq!(item.title, "Pho bo");
        assert_eq!(item.price, Decimal::from(50));
    }

    #[tokio::test]
    async fn test_update_unknown_item() {
        let use_case = InventoryUseCase::new(store().await, Tables::default());

        let result = use_case.mark_out_of_order(FoodItemId(42)).await;

        assert!(matches!(result, Err(AppError::Store(StoreError::NotFound { .. }))));
    }
}
