//! Order history and order detail use case.

use std::sync::Arc;

use futures_util::future::join_all;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::AppError;
use crate::application::dto::{DetailLine, OrderDetails};
use crate::domain::entities::{Order, OrderId, OrderLine, ProfileId};
use crate::domain::ports::{RowStorePort, decode, decode_all};
use crate::domain::query::{RowQuery, Tables};

#[derive(Deserialize)]
struct ImageRow {
    #[serde(default, rename = "imageUrl")]
    image_url: Option<String>,
}

/// Looks up the menu image for each line by title.
///
/// Lines whose lookup fails keep no image; failures are logged only.
pub(crate) async fn resolve_line_images(
    store: &dyn RowStorePort,
    food_items: &str,
    lines: &[OrderLine],
) -> Vec<DetailLine> {
    let lookups = lines.iter().map(|line| async move {
        let query = RowQuery::from(food_items)
            .select("imageUrl")
            .eq("title", &line.title)
            .limit(1);

        let image_url = match store.select_single(&query).await {
            Ok(row) => decode::<ImageRow>(food_items, row)
                .map(|r| r.image_url)
                .unwrap_or_else(|e| {
                    warn!(title = %line.title, error = %e, "Unreadable image row");
                    None
                }),
            Err(e) => {
                warn!(title = %line.title, error = %e, "Image lookup failed");
                None
            }
        };

        DetailLine {
            line: line.clone(),
            image_url,
        }
    });

    join_all(lookups).await
}

/// Reads a customer's past orders.
#[derive(Clone)]
pub struct OrderHistoryUseCase {
    store: Arc<dyn RowStorePort>,
    tables: Tables,
}

impl OrderHistoryUseCase {
    #[must_use]
    pub const fn new(store: Arc<dyn RowStorePort>, tables: Tables) -> Self {
        Self { store, tables }
    }

    /// Orders placed by `user`, in backend order.
    ///
    /// # Errors
    /// Returns error if the select fails or a row does not decode.
    pub async fn history(&self, user: ProfileId) -> Result<Vec<Order>, AppError> {
        let table = &self.tables.orders;
        let rows = self
            .store
            .select(&RowQuery::from(table).eq("user_id", user))
            .await?;
        let orders: Vec<Order> = decode_all(table, rows)?;
        debug!(user_id = %user, count = orders.len(), "Loaded order history");
        Ok(orders)
    }

    /// One of `user`'s orders by id.
    ///
    /// # Errors
    /// Returns [`crate::domain::errors::StoreError::NotFound`] if the order
    /// does not exist or belongs to someone else.
    pub async fn order(&self, user: ProfileId, id: OrderId) -> Result<Order, AppError> {
        let table = &self.tables.orders;
        let row = self
            .store
            .select_single(&RowQuery::from(table).eq("id", id).eq("user_id", user))
            .await?;
        Ok(decode(table, row)?)
    }

    /// Attaches line images to an order.
    pub async fn details(&self, order: Order) -> OrderDetails {
        let lines =
            resolve_line_images(self.store.as_ref(), &self.tables.food_items, &order.items).await;
        OrderDetails {
            order,
            lines,
            customer_name: None,
        }
    }
}
