//! Row store endpoints.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::client::{BackendClient, error_message, store_error, transport_message};
use crate::domain::errors::StoreError;
use crate::domain::ports::{Row, RowStorePort};
use crate::domain::query::{Filter, RowQuery};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=representation";

fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|f| (f.column().to_string(), f.to_param_value()))
        .collect()
}

fn query_params(query: &RowQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), query.columns.replace(' ', ""))];
    params.extend(filter_params(&query.filters));
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

async fn parse<T: DeserializeOwned>(request: RequestBuilder, table: &str) -> Result<T, StoreError> {
    let response = request
        .send()
        .await
        .map_err(|e| StoreError::network(transport_message(&e)))?;

    let status = response.status();
    if !status.is_success() {
        let message = error_message(status, response).await;
        debug!(table = %table, status = %status, message = %message, "Row request failed");
        return Err(store_error(status, message, table));
    }

    response.json().await.map_err(|e| {
        warn!(table = %table, error = %e, "Failed to parse row response");
        StoreError::decode(table, e.to_string())
    })
}

#[async_trait]
impl RowStorePort for BackendClient {
    async fn select(&self, query: &RowQuery) -> Result<Vec<Row>, StoreError> {
        debug!(table = %query.table, filters = query.filters.len(), "Selecting rows");
        let request = self
            .authorised(Method::GET, &self.rest_url(&query.table))
            .await
            .query(&query_params(query));
        parse(request, &query.table).await
    }

    async fn select_single(&self, query: &RowQuery) -> Result<Row, StoreError> {
        debug!(table = %query.table, "Selecting single row");
        let request = self
            .authorised(Method::GET, &self.rest_url(&query.table))
            .await
            .header(header::ACCEPT, SINGLE_OBJECT)
            .query(&query_params(query));
        parse(request, &query.table).await
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, StoreError> {
        debug!(table = %table, count = rows.len(), "Inserting rows");
        let request = self
            .authorised(Method::POST, &self.rest_url(table))
            .await
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&rows);
        parse(request, table).await
    }

    async fn update(
        &self,
        table: &str,
        patch: Row,
        filters: &[Filter],
    ) -> Result<Vec<Row>, StoreError> {
        debug!(table = %table, filters = filters.len(), "Updating rows");
        let request = self
            .authorised(Method::PATCH, &self.rest_url(table))
            .await
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&filter_params(filters))
            .json(&patch);
        parse(request, table).await
    }

    async fn upsert(&self, table: &str, row: Row) -> Result<Vec<Row>, StoreError> {
        debug!(table = %table, "Upserting row");
        let request = self
            .authorised(Method::POST, &self.rest_url(table))
            .await
            .header("Prefer", MERGE_DUPLICATES)
            .json(&row);
        parse(request, table).await
    }
}
