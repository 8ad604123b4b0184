// ABOUTME: Remote table-store boundary shared by all store implementations
// ABOUTME: TableStore trait, loosely-typed rows, ordering types, and the row codec
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

//! # Table Store Boundary
//!
//! The planner talks to persistence exclusively through [`TableStore`], a
//! small generic query interface over loosely-typed rows. Two implementations
//! ship: [`PostgrestStore`] speaks the hosted store's REST dialect and
//! [`MemoryStore`] backs tests and offline development.
//!
//! Rows are JSON objects; typed entities are produced by the codec helpers
//! ([`decode_rows`], [`encode_row`]) so every implementation stays agnostic of
//! the domain model.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub mod memory;
pub mod postgrest;

pub use memory::{MemoryStore, StoreOp};
pub use postgrest::PostgrestStore;

/// A loosely-typed record as exchanged with the remote store.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised at the store boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP transport failed before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store api error (http {status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, as returned by the store.
        message: String,
    },

    /// A fetched row did not fit the expected entity shape.
    #[error("row decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// A write payload could not be turned into a row.
    #[error("row encode failed: {0}")]
    Encode(String),

    /// The store refused or could not service the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Sort direction for a single ordering column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// One column of an ordering specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Column to sort by.
    pub column: &'static str,
    /// Direction to sort in.
    pub direction: SortDirection,
}

impl SortKey {
    /// Sort ascending by `column`.
    #[must_use]
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Sort descending by `column`.
    #[must_use]
    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }
}

/// Generic query interface over the five remote tables.
///
/// Implementations must be safe to share across tasks; the planner holds one
/// behind an `Arc<dyn TableStore>`.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Fetch every row of `table`, sorted by `ordering` (applied left to
    /// right, earlier keys dominating).
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails or the store rejects the
    /// query.
    async fn select_all(&self, table: &str, ordering: &[SortKey]) -> StoreResult<Vec<Row>>;

    /// Fetch the single row of a logical singleton table.
    ///
    /// Returns `None` unless the table holds exactly one row; an empty table
    /// is the normal "nothing saved yet" case and a multi-row table means the
    /// singleton invariant broke, which is treated the same way rather than
    /// guessing which row to trust.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails or the store rejects the
    /// query.
    async fn select_single(&self, table: &str) -> StoreResult<Option<Row>>;

    /// Insert `row` into `table`, returning the persisted row with
    /// store-assigned columns filled in.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails or the store rejects the
    /// write.
    async fn insert(&self, table: &str, row: Row) -> StoreResult<Row>;

    /// Overwrite columns of the row identified by `id`, returning the
    /// persisted row.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails, the store rejects the
    /// write, or no row matches `id`.
    async fn update(&self, table: &str, id: Uuid, row: Row) -> StoreResult<Row>;

    /// Delete the row identified by `id`. Deleting an absent row is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails or the store rejects the
    /// delete.
    async fn delete(&self, table: &str, id: Uuid) -> StoreResult<()>;

    /// Delete every row of `table`. Used to reset singleton tables before
    /// re-inserting.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails or the store rejects the
    /// delete.
    async fn delete_all(&self, table: &str) -> StoreResult<()>;
}

/// Serialize a write payload into a row.
///
/// # Errors
///
/// Returns [`StoreError::Encode`] when the payload does not serialize to a
/// JSON object.
pub fn encode_row<T: Serialize>(value: &T) -> StoreResult<Row> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err(StoreError::Encode(
            "payload serialized to non-object JSON".into(),
        )),
        Err(e) => Err(StoreError::Encode(e.to_string())),
    }
}

/// Deserialize one row into a typed entity.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] when the row does not fit `T`.
pub fn decode_row<T: DeserializeOwned>(row: Row) -> StoreResult<T> {
    Ok(serde_json::from_value(serde_json::Value::Object(row))?)
}

/// Deserialize a whole result set into typed entities, preserving order.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] on the first row that does not fit `T`.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> StoreResult<Vec<T>> {
    rows.into_iter().map(decode_row).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{NutritionFacts, QuickFoodDraft};

    #[test]
    fn encode_then_decode_preserves_fields() {
        let draft = QuickFoodDraft {
            name: "Yogurt".into(),
            calories: 120.0,
            protein: 11.0,
            carbs: 9.0,
            fat: 4.5,
        };
        let row = encode_row(&draft).unwrap();
        assert_eq!(row["name"], "Yogurt");
        let back: QuickFoodDraft = decode_row(row).unwrap();
        assert_eq!(back, draft);
    }

    #[test]
    fn encode_rejects_non_object_payloads() {
        let err = encode_row(&NutritionFacts::default().calories).unwrap_err();
        assert!(matches!(err, StoreError::Encode(_)));
    }

    #[test]
    fn decode_surfaces_shape_mismatches() {
        let mut row = Row::new();
        row.insert("name".into(), serde_json::Value::Bool(true));
        let err = decode_rows::<QuickFoodDraft>(vec![row]).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }
}
