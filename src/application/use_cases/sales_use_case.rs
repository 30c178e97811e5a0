//! Sales analytics for administrators.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};

use super::order_history_use_case::resolve_line_images;
use crate::application::AppError;
use crate::application::dto::OrderDetails;
use crate::domain::entities::{Order, OrderId, ProfileId};
use crate::domain::ports::{RowStorePort, decode, decode_all};
use crate::domain::query::{RowQuery, Tables};
use crate::domain::sales::SalesReport;

const UNKNOWN_CUSTOMER: &str = "Unknown";

#[derive(Deserialize)]
struct NameRow {
    #[serde(default)]
    full_name: Option<String>,
}

/// Daily, weekly and monthly totals across all customers.
#[derive(Clone)]
pub struct SalesUseCase {
    store: Arc<dyn RowStorePort>,
    tables: Tables,
}

impl SalesUseCase {
    #[must_use]
    pub const fn new(store: Arc<dyn RowStorePort>, tables: Tables) -> Self {
        Self { store, tables }
    }

    /// Every order of every customer.
    ///
    /// # Errors
    /// Returns error if the select fails or a row does not decode.
    pub async fn load_orders(&self) -> Result<Vec<Order>, AppError> {
        let table = &self.tables.orders;
        let rows = self.store.select(&RowQuery::from(table)).await?;
        let orders: Vec<Order> = decode_all(table, rows)?;
        debug!(count = orders.len(), "Loaded orders for sales report");
        Ok(orders)
    }

    /// Loads all orders and aggregates them around `date`.
    ///
    /// # Errors
    /// Returns error if the orders cannot be loaded.
    pub async fn report(&self, date: NaiveDate) -> Result<SalesReport, AppError> {
        let orders = self.load_orders().await?;
        Ok(SalesReport::for_date(&orders, date))
    }

    /// Any order by id with line images and the customer's name.
    ///
    /// # Errors
    /// Returns error if the order does not exist or cannot be read.
    pub async fn order_details(&self, id: OrderId) -> Result<OrderDetails, AppError> {
        let table = &self.tables.orders;
        let row = self
            .store
            .select_single(&RowQuery::from(table).eq("id", id))
            .await?;
        let order: Order = decode(table, row)?;

        let lines =
            resolve_line_images(self.store.as_ref(), &self.tables.food_items, &order.items).await;
        let customer_name = match order.user_id {
            Some(user) => self.customer_name(user).await,
            None => UNKNOWN_CUSTOMER.to_string(),
        };

        Ok(OrderDetails {
            order,
            lines,
            customer_name: Some(customer_name),
        })
    }

    async fn customer_name(&self, user: ProfileId) -> String {
        let table = &self.tables.profiles;
        let query = RowQuery::from(table).select("full_name").eq("id", user);

        let name = match self.store.select_single(&query).await {
            Ok(row) => decode::<NameRow>(table, row).ok().and_then(|r| r.full_name),
            Err(e) => {
                warn!(user_id = %user, error = %e, "Customer lookup failed");
                None
            }
        };

        name.filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string())
    }
}
