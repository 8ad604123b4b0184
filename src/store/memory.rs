// ABOUTME: In-memory table store for tests and offline development
// ABOUTME: Honors ordering, assigns server-side columns, and supports failure injection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

// RwLock poisoning is reported as StoreError::Unavailable rather than
// panicking.

//! # In-Memory Table Store
//!
//! A [`TableStore`] implementation backed by process memory. Unlike the real
//! hosted store it:
//!
//! - Requires no network or credentials
//! - Assigns ids and creation timestamps locally
//! - Supports injecting one-shot failures per table and operation
//!
//! ## Use Cases
//!
//! - **Tests**: Drive the planner through full load/write cycles, including
//!   the failure paths no real deployment reproduces on demand
//! - **Development**: Run an embedding host application without a remote store
//!
//! ## Thread Safety
//!
//! All data access is protected by `RwLock`; a single instance can be shared
//! across tasks.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::{Row, SortDirection, SortKey, StoreError, StoreResult, TableStore};

/// Store operations that can be targeted by failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    /// Full-table fetch.
    SelectAll,
    /// Singleton fetch.
    SelectSingle,
    /// Row insert.
    Insert,
    /// Row update.
    Update,
    /// Row delete by id.
    Delete,
    /// Whole-table delete.
    DeleteAll,
}

/// In-memory [`TableStore`] for tests and offline development.
///
/// # Examples
///
/// ```rust,no_run
/// use nutriplan::store::memory::{MemoryStore, StoreOp};
///
/// let store = MemoryStore::new();
/// store.fail_next("recipes", StoreOp::Insert);
/// // The next recipe insert errors; every call after it succeeds again.
/// ```
pub struct MemoryStore {
    /// Rows per table, in insertion order.
    tables: Arc<RwLock<HashMap<String, Vec<Row>>>>,
    /// Pending one-shot failures, consumed on first match.
    failures: Arc<RwLock<Vec<(String, StoreOp)>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            failures: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Arrange for the next `op` on `table` to fail with
    /// [`StoreError::Unavailable`]. Each injected failure fires exactly once.
    pub fn fail_next(&self, table: &str, op: StoreOp) {
        if let Ok(mut failures) = self.failures.write() {
            failures.push((table.to_owned(), op));
        }
    }

    /// Append a row verbatim, without assigning server-side columns.
    ///
    /// Lets tests seed malformed or pre-identified rows that the insert path
    /// would normalize.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the table lock is poisoned.
    pub fn push_row(&self, table: &str, row: Row) -> StoreResult<()> {
        let mut tables = self.write_tables()?;
        tables.entry(table.to_owned()).or_default().push(row);
        Ok(())
    }

    /// Snapshot of a table's rows in insertion order, for assertions.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the table lock is poisoned.
    pub fn rows(&self, table: &str) -> StoreResult<Vec<Row>> {
        let tables = self.read_tables()?;
        Ok(tables.get(table).cloned().unwrap_or_default())
    }

    fn read_tables(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Vec<Row>>>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("table lock poisoned".into()))
    }

    fn write_tables(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Vec<Row>>>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("table lock poisoned".into()))
    }

    /// Consume a pending failure for (`table`, `op`), erroring if one was set.
    fn take_failure(&self, table: &str, op: StoreOp) -> StoreResult<()> {
        let mut failures = self
            .failures
            .write()
            .map_err(|_| StoreError::Unavailable("failure lock poisoned".into()))?;
        if let Some(pos) = failures.iter().position(|(t, o)| t == table && *o == op) {
            failures.remove(pos);
            return Err(StoreError::Unavailable(format!(
                "injected failure for {op:?} on {table}"
            )));
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare two JSON values for ordering purposes.
///
/// Numbers compare numerically, strings lexicographically (which is
/// chronological for ISO dates and timestamps). Nulls sort last, matching the
/// hosted store's default. Mismatched types compare equal, leaving the stable
/// sort to preserve insertion order.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn sort_rows(rows: &mut [Row], ordering: &[SortKey]) {
    rows.sort_by(|a, b| {
        for key in ordering {
            let left = a.get(key.column).unwrap_or(&Value::Null);
            let right = b.get(key.column).unwrap_or(&Value::Null);
            let cmp = match key.direction {
                SortDirection::Ascending => compare_values(left, right),
                SortDirection::Descending => compare_values(right, left),
            };
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    });
}

fn id_matches(row: &Row, id: Uuid) -> bool {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|v| Uuid::parse_str(v).ok())
        .is_some_and(|v| v == id)
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn select_all(&self, table: &str, ordering: &[SortKey]) -> StoreResult<Vec<Row>> {
        self.take_failure(table, StoreOp::SelectAll)?;
        let mut rows = {
            let tables = self.read_tables()?;
            tables.get(table).cloned().unwrap_or_default()
        };
        sort_rows(&mut rows, ordering);
        Ok(rows)
    }

    async fn select_single(&self, table: &str) -> StoreResult<Option<Row>> {
        self.take_failure(table, StoreOp::SelectSingle)?;
        let tables = self.read_tables()?;
        let rows = tables.get(table).map_or(&[] as &[Row], Vec::as_slice);
        match rows {
            [row] => Ok(Some(row.clone())),
            _ => Ok(None),
        }
    }

    async fn insert(&self, table: &str, row: Row) -> StoreResult<Row> {
        self.take_failure(table, StoreOp::Insert)?;
        let mut persisted = row;
        persisted
            .entry("id".to_owned())
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        persisted
            .entry("created_at".to_owned())
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
        let mut tables = self.write_tables()?;
        tables
            .entry(table.to_owned())
            .or_default()
            .push(persisted.clone());
        Ok(persisted)
    }

    async fn update(&self, table: &str, id: Uuid, row: Row) -> StoreResult<Row> {
        self.take_failure(table, StoreOp::Update)?;
        let mut tables = self.write_tables()?;
        let rows = tables.entry(table.to_owned()).or_default();
        let Some(existing) = rows.iter_mut().find(|r| id_matches(r, id)) else {
            return Err(StoreError::Api {
                status: 404,
                message: format!("no {table} row with id {id}"),
            });
        };
        for (column, value) in row {
            existing.insert(column, value);
        }
        Ok(existing.clone())
    }

    async fn delete(&self, table: &str, id: Uuid) -> StoreResult<()> {
        self.take_failure(table, StoreOp::Delete)?;
        let mut tables = self.write_tables()?;
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|r| !id_matches(r, id));
        }
        Ok(())
    }

    async fn delete_all(&self, table: &str) -> StoreResult<()> {
        self.take_failure(table, StoreOp::DeleteAll)?;
        let mut tables = self.write_tables()?;
        if let Some(rows) = tables.get_mut(table) {
            rows.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn named_row(name: &str) -> Row {
        let mut row = Row::new();
        row.insert("name".to_owned(), Value::String(name.to_owned()));
        row
    }

    #[tokio::test]
    async fn insert_assigns_id_and_created_at() {
        let store = MemoryStore::new();
        let persisted = store.insert("quick_foods", named_row("Apple")).await.unwrap();
        assert!(persisted.get("id").and_then(Value::as_str).is_some());
        assert!(persisted.get("created_at").and_then(Value::as_str).is_some());
    }

    #[tokio::test]
    async fn select_all_sorts_by_requested_columns() {
        let store = MemoryStore::new();
        store.insert("quick_foods", named_row("Oats")).await.unwrap();
        store.insert("quick_foods", named_row("Apple")).await.unwrap();

        let rows = store
            .select_all("quick_foods", &[SortKey::asc("name")])
            .await
            .unwrap();
        assert_eq!(rows[0]["name"], "Apple");
        assert_eq!(rows[1]["name"], "Oats");

        let rows = store
            .select_all("quick_foods", &[SortKey::desc("name")])
            .await
            .unwrap();
        assert_eq!(rows[0]["name"], "Oats");
    }

    #[tokio::test]
    async fn injected_failure_fires_once() {
        let store = MemoryStore::new();
        store.fail_next("recipes", StoreOp::Insert);

        let err = store.insert("recipes", named_row("Soup")).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));

        store.insert("recipes", named_row("Soup")).await.unwrap();
        assert_eq!(store.rows("recipes").unwrap().len(), 1);
    }
}
