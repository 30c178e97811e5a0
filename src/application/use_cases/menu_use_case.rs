//! Menu browsing and rating use case.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::application::AppError;
use crate::domain::entities::{FoodItem, FoodItemId, StarRating};
use crate::domain::ports::{RowStorePort, decode, decode_all};
use crate::domain::query::{Filter, RowQuery, Tables};

/// Loads the menu and records customer ratings.
#[derive(Clone)]
pub struct MenuUseCase {
    store: Arc<dyn RowStorePort>,
    tables: Tables,
}

impl MenuUseCase {
    #[must_use]
    pub const fn new(store: Arc<dyn RowStorePort>, tables: Tables) -> Self {
        Self { store, tables }
    }

    /// Every menu item, available or not.
    ///
    /// # Errors
    /// Returns error if the select fails or a row does not decode.
    pub async fn load_menu(&self) -> Result<Vec<FoodItem>, AppError> {
        let table = &self.tables.food_items;
        let rows = self.store.select(&RowQuery::from(table)).await?;
        let items: Vec<FoodItem> = decode_all(table, rows)?;
        debug!(count = items.len(), "Loaded menu");
        Ok(items)
    }

    /// One menu item by id.
    ///
    /// # Errors
    /// Returns [`crate::domain::errors::StoreError::NotFound`] for an unknown id.
    pub async fn item(&self, id: FoodItemId) -> Result<FoodItem, AppError> {
        let table = &self.tables.food_items;
        let row = self
            .store
            .select_single(&RowQuery::from(table).eq("id", id))
            .await?;
        Ok(decode(table, row)?)
    }

    /// Submits a one-to-five star rating and returns the updated item.
    ///
    /// The aggregate is read fresh before computing the next one.
    ///
    /// # Errors
    /// Returns error if the star value is out of range or a backend call fails.
    pub async fn rate_item(&self, id: FoodItemId, stars: u8) -> Result<FoodItem, AppError> {
        let rating = StarRating::new(stars)?;
        let mut item = self.item(id).await?;

        let next = item.rating_aggregate().submit(rating);
        item.apply_rating(next);

        let patch = json!({
            "rating_sum": next.sum,
            "rating_count": next.count,
            "rating": next.display_rating(),
        });
        let updated = self
            .store
            .update(&self.tables.food_items, patch, &[Filter::eq("id", id)])
            .await?;

        if updated.is_empty() {
            warn!(item_id = %id, "Rating update matched no rows");
        }

        info!(
            item_id = %id,
            stars = rating.value(),
            average = next.display_rating(),
            count = next.count,
            "Rating submitted"
        );
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{StoreError, ValidationError};
    use crate::domain::ports::mocks::InMemoryRowStore;
    use serde_json::json;

    async fn store() -> Arc<InMemoryRowStore> {
        Arc::new(
            InMemoryRowStore::new()
                .with_rows(
                    "food_items",
                    vec![
                        json!({ "id": 1, "title": "Pho", "price": 45.5, "rating_sum": 9, "rating_count": 2, "rating": "4.5" }),
                        json!({ "id": 2, "title": "Banh mi", "price": 20, "status": "OUT OF ORDER" }),
                    ],
                )
                .await,
        )
    }

    #[tokio::test]
    async fn test_load_menu() {
        let use_case = MenuUseCase::new(store().await, Tables::default());

        let items = use_case.load_menu().await.unwrap();

        assert_eq!(items.len(), 2);
        assert!(!items[1].is_orderable());
    }

    #[tokio::test]
    async fn test_rate_item_updates_aggregate() {
        let store = store().await;
        let use_case = MenuUseCase::new(store.clone(), Tables::default());

        let item = use_case.rate_item(FoodItemId(1), 3).await.unwrap();

        assert_eq!(item.rating_sum, 12);
        assert_eq!(item.rating_count, 3);
        assert_eq!(item.rating, Some(4.0));

        let rows = store.rows("food_items").await;
        assert_eq!(rows[0]["rating_sum"], 12);
        assert_eq!(rows[0]["rating_count"], 3);
        assert_eq!(rows[0]["rating"], 4.0);
    }

    #[tokio::test]
    async fn test_first_rating_on_unrated_item() {
        let use_case = MenuUseCase::new(store().await, Tables::default());

        let item = use_case.rate_item(FoodItemId(2), 5).await.unwrap();

        assert_eq!(item.rating, Some(5.0));
        assert_eq!(item.rating_count, 1);
    }

    #[tokio::test]
    async fn test_out_of_range_rating_never_reaches_store() {
        let store = store().await;
        store.set_should_fail(true);
        let use_case = MenuUseCase::new(store, Tables::default());

        let result = use_case.rate_item(FoodItemId(1), 6).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::Invalid { field: "rating", .. }))
        ));
    }

    #[tokio::test]
    async fn test_unknown_item() {
        let use_case = MenuUseCase::new(store().await, Tables::default());

        let result = use_case.rate_item(FoodItemId(99), 4).await;

        assert!(matches!(result, Err(AppError::Store(StoreError::NotFound { .. }))));
    }

    #[tokio::test]
    async fn test_failure_leaves_store_unchanged() {
        let store = store().await;
        let use_case = MenuUseCase::new(store.clone(), Tables::default());
        store.set_should_fail(true);

        assert!(use_case.rate_item(FoodItemId(1), 5).await.is_err());

        store.set_should_fail(false);
        assert_eq!(store.rows("food_items").await[0]["rating_sum"], 9);
    }
}
