// ABOUTME: HTTP table store speaking the PostgREST dialect used by hosted Supabase projects
// ABOUTME: Implements select/insert/update/delete over REST with apikey and bearer headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

//! PostgREST table store client.
//!
//! Speaks the REST dialect exposed by hosted Postgres projects: tables are
//! URL path segments, filters and ordering are query parameters
//! (`?select=*&order=name.asc`, `?id=eq.<uuid>`), and writes opt into
//! returning the persisted rows with `Prefer: return=representation`.
//!
//! # Example
//! ```rust,no_run
//! use nutriplan::config::RemoteStoreConfig;
//! use nutriplan::store::PostgrestStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RemoteStoreConfig {
//!     base_url: "https://xyz.supabase.co/rest/v1".to_owned(),
//!     api_key: "anon-key".to_owned(),
//!     timeout_secs: 30,
//!     connect_timeout_secs: 10,
//! };
//! let store = PostgrestStore::new(config);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Response};
use uuid::Uuid;

use super::{Row, SortDirection, SortKey, StoreError, StoreResult, TableStore};
use crate::config::RemoteStoreConfig;

/// HTTP [`TableStore`] implementation for PostgREST-style endpoints.
pub struct PostgrestStore {
    config: RemoteStoreConfig,
    http_client: reqwest::Client,
}

impl PostgrestStore {
    /// Create a store client from an already-validated configuration.
    #[must_use]
    pub fn new(config: RemoteStoreConfig) -> Self {
        let http_client = client_with_timeouts(config.timeout_secs, config.connect_timeout_secs);
        Self {
            config,
            http_client,
        }
    }

    /// Load configuration from the environment, validate it, and create a
    /// store client.
    ///
    /// # Errors
    ///
    /// Returns an error when required environment variables are missing or
    /// the configuration fails validation.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = RemoteStoreConfig::from_env()?;
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Start a request against `table` with auth headers applied.
    fn request(&self, method: Method, table: &str) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, table_url(&self.config.base_url, table))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }
}

/// Build the endpoint URL for a table, tolerating a trailing slash on the
/// configured base.
fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/{table}", base_url.trim_end_matches('/'))
}

/// Render an ordering as the dialect's `order` parameter value,
/// e.g. `date.asc,created_at.asc`.
fn order_expr(ordering: &[SortKey]) -> String {
    ordering
        .iter()
        .map(|key| {
            let direction = match key.direction {
                SortDirection::Ascending => "asc",
                SortDirection::Descending => "desc",
            };
            format!("{}.{direction}", key.column)
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn client_with_timeouts(timeout_secs: u64, connect_timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Pass a successful response through, turning any other status into
/// [`StoreError::Api`] with the response body as the message.
async fn ensure_success(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(StoreError::Api {
        status: status.as_u16(),
        message: response.text().await.unwrap_or_default(),
    })
}

#[async_trait]
impl TableStore for PostgrestStore {
    async fn select_all(&self, table: &str, ordering: &[SortKey]) -> StoreResult<Vec<Row>> {
        let mut request = self.request(Method::GET, table).query(&[("select", "*")]);
        if !ordering.is_empty() {
            request = request.query(&[("order", order_expr(ordering).as_str())]);
        }
        let response = ensure_success(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn select_single(&self, table: &str) -> StoreResult<Option<Row>> {
        // Fetch up to two rows: exactly one means the singleton is intact,
        // zero means nothing saved yet, two means the invariant broke. The
        // latter two both yield None.
        let request = self
            .request(Method::GET, table)
            .query(&[("select", "*"), ("limit", "2")]);
        let response = ensure_success(request.send().await?).await?;
        let mut rows: Vec<Row> = response.json().await?;
        if rows.len() == 1 {
            Ok(rows.pop())
        } else {
            Ok(None)
        }
    }

    async fn insert(&self, table: &str, row: Row) -> StoreResult<Row> {
        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&[row]);
        let response = ensure_success(request.send().await?).await?;
        let rows: Vec<Row> = response.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Unavailable(format!("{table} insert returned no rows")))
    }

    async fn update(&self, table: &str, id: Uuid, row: Row) -> StoreResult<Row> {
        let request = self
            .request(Method::PATCH, table)
            .query(&[("id", format!("eq.{id}").as_str())])
            .header("Prefer", "return=representation")
            .json(&row);
        let response = ensure_success(request.send().await?).await?;
        let rows: Vec<Row> = response.json().await?;
        rows.into_iter().next().ok_or_else(|| StoreError::Api {
            status: 404,
            message: format!("no {table} row with id {id}"),
        })
    }

    async fn delete(&self, table: &str, id: Uuid) -> StoreResult<()> {
        let request = self
            .request(Method::DELETE, table)
            .query(&[("id", format!("eq.{id}").as_str())]);
        ensure_success(request.send().await?).await?;
        Ok(())
    }

    async fn delete_all(&self, table: &str) -> StoreResult<()> {
        // An always-true id filter; the dialect refuses unfiltered deletes.
        let request = self
            .request(Method::DELETE, table)
            .query(&[("id", "not.is.null")]);
        ensure_success(request.send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn table_urls_tolerate_trailing_slash() {
        assert_eq!(
            table_url("https://x.supabase.co/rest/v1", "recipes"),
            "https://x.supabase.co/rest/v1/recipes"
        );
        assert_eq!(
            table_url("https://x.supabase.co/rest/v1/", "meal_plans"),
            "https://x.supabase.co/rest/v1/meal_plans"
        );
    }

    #[test]
    fn order_expr_joins_keys_in_request_order() {
        assert_eq!(order_expr(&[SortKey::asc("name")]), "name.asc");
        assert_eq!(
            order_expr(&[SortKey::asc("date"), SortKey::asc("created_at")]),
            "date.asc,created_at.asc"
        );
        assert_eq!(order_expr(&[SortKey::desc("created_at")]), "created_at.desc");
        assert_eq!(order_expr(&[]), "");
    }
}
