//! Row store port definition.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::errors::StoreError;
use crate::domain::query::{Filter, RowQuery};

/// Loosely typed row as returned by the backend.
pub type Row = serde_json::Value;

/// Port for table reads and writes on the hosted row store.
#[async_trait]
pub trait RowStorePort: Send + Sync {
    /// Returns all rows matching the query.
    async fn select(&self, query: &RowQuery) -> Result<Vec<Row>, StoreError>;

    /// Returns exactly one row; zero rows is [`StoreError::NotFound`].
    async fn select_single(&self, query: &RowQuery) -> Result<Row, StoreError> {
        let mut rows = self.select(query).await?;
        match rows.len() {
            0 => Err(StoreError::not_found(&query.table)),
            1 => Ok(rows.remove(0)),
            n => Err(StoreError::unexpected(format!(
                "expected a single {} row, got {n}",
                query.table
            ))),
        }
    }

    /// Inserts rows and returns them as stored.
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, StoreError>;

    /// Applies `patch` to every row matching `filters` and returns them.
    async fn update(
        &self,
        table: &str,
        patch: Row,
        filters: &[Filter],
    ) -> Result<Vec<Row>, StoreError>;

    /// Inserts the row or merges it into the row with the same primary key.
    async fn upsert(&self, table: &str, row: Row) -> Result<Vec<Row>, StoreError>;
}

/// Decodes one row into an entity.
///
/// # Errors
/// Returns [`StoreError::Decode`] if the row does not fit the entity.
pub fn decode<T: DeserializeOwned>(table: &str, row: Row) -> Result<T, StoreError> {
    serde_json::from_value(row).map_err(|e| StoreError::decode(table, e.to_string()))
}

/// Decodes every row into an entity.
///
/// # Errors
/// Returns [`StoreError::Decode`] for the first row that does not fit.
pub fn decode_all<T: DeserializeOwned>(table: &str, rows: Vec<Row>) -> Result<Vec<T>, StoreError> {
    rows.into_iter().map(|row| decode(table, row)).collect()
}


#[cfg(test)]
mod tests {
    use super::mock::InMemoryRowStore;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_select_single_not_found() {
        let store = InMemoryRowStore::new();
        let result = store.select_single(&RowQuery::from("profiles").eq("id", 1)).await;

        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_select_single_rejects_many() {
        let store = InMemoryRowStore::new()
            .with_rows("food_items", vec![json!({ "id": 1 }), json!({ "id": 2 })])
            .await;

        let result = store.select_single(&RowQuery::from("food_items")).await;
        assert!(matches!(result, Err(StoreError::Unexpected { .. })));
    }

    #[tokio::test]
    async fn test_decode_error_names_table() {
        let error = decode::<crate::domain::entities::FoodItem>("food_items", json!({ "x": 1 }))
            .unwrap_err();

        assert!(error.to_string().contains("food_items"));
    }
}
