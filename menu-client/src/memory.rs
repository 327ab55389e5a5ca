//! In-process table store
//!
//! Same contract as [`HttpTableClient`](crate::HttpTableClient), backed by a
//! map of tables. Used by tests and demos; can be told to fail updates for
//! given ids to simulate partial network failure, and records every update
//! call in dispatch order.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::{ClientError, ClientResult, Query, RemoteStore, Row, Table};

/// A recorded update call
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCall {
    pub table: Table,
    pub id: String,
    pub patch: Row,
}

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<Table, Vec<Row>>,
    failing_ids: HashSet<String>,
    update_log: Vec<UpdateCall>,
}

/// In-memory implementation of [`RemoteStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryTableClient {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryTableClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with rows, bypassing the update log
    pub fn seed(&self, table: Table, rows: impl IntoIterator<Item = Row>) {
        let mut inner = self.inner.write();
        inner.tables.entry(table).or_default().extend(rows);
    }

    /// Every row of a table in insertion order
    pub fn rows(&self, table: Table) -> Vec<Row> {
        self.inner
            .read()
            .tables
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }

    /// Look a row up by id
    pub fn row(&self, table: Table, id: &str) -> Option<Row> {
        self.inner
            .read()
            .tables
            .get(&table)?
            .iter()
            .find(|row| row_id(row) == Some(id))
            .cloned()
    }

    /// Make every update or delete of this id fail
    pub fn fail_writes_for(&self, id: impl Into<String>) {
        self.inner.write().failing_ids.insert(id.into());
    }

    pub fn clear_failures(&self) {
        self.inner.write().failing_ids.clear();
    }

    /// Update calls received so far, in the order they arrived
    pub fn update_log(&self) -> Vec<UpdateCall> {
        self.inner.read().update_log.clone()
    }

    fn check_failure(inner: &Inner, table: Table, id: &str) -> ClientResult<()> {
        if inner.failing_ids.contains(id) {
            return Err(ClientError::Internal(format!(
                "simulated failure for {}/{}",
                table, id
            )));
        }
        Ok(())
    }
}

fn row_id(row: &Row) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

fn matches(row: &Row, query: &Query) -> bool {
    query
        .filters
        .iter()
        .all(|f| row.get(&f.column).unwrap_or(&Value::Null) == &f.value)
}

/// Ordering for sort columns. Missing values sort last.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[async_trait]
impl RemoteStore for MemoryTableClient {
    async fn select(&self, table: Table, query: &Query) -> ClientResult<Vec<Row>> {
        let inner = self.inner.read();
        let mut rows: Vec<Row> = inner
            .tables
            .get(&table)
            .map(|rows| rows.iter().filter(|r| matches(r, query)).cloned().collect())
            .unwrap_or_default();

        if let Some(order) = &query.order {
            // stable sort keeps insertion order among equal keys
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.column), b.get(&order.column));
                if order.ascending { ord } else { ord.reverse() }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn insert(&self, table: Table, mut row: Row) -> ClientResult<Row> {
        if row_id(&row).is_none() {
            row.insert("id".to_string(), Value::String(shared::util::new_id()));
        }
        let mut inner = self.inner.write();
        let rows = inner.tables.entry(table).or_default();
        if let Some(id) = row_id(&row)
            && rows.iter().any(|r| row_id(r) == Some(id))
        {
            return Err(ClientError::Conflict(format!("{}/{}", table, id)));
        }
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: Table, id: &str, patch: Row) -> ClientResult<Row> {
        let mut inner = self.inner.write();
        inner.update_log.push(UpdateCall {
            table,
            id: id.to_string(),
            patch: patch.clone(),
        });
        Self::check_failure(&inner, table, id)?;

        let row = inner
            .tables
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|r| row_id(r) == Some(id)))
            .ok_or_else(|| ClientError::NotFound(format!("{}/{}", table, id)))?;
        for (key, value) in patch {
            row.insert(key, value);
        }
        Ok(row.clone())
    }

    async fn delete(&self, table: Table, id: &str) -> ClientResult<()> {
        let mut inner = self.inner.write();
        Self::check_failure(&inner, table, id)?;
        let rows = inner
            .tables
            .get_mut(&table)
            .ok_or_else(|| ClientError::NotFound(format!("{}/{}", table, id)))?;
        let before = rows.len();
        rows.retain(|r| row_id(r) != Some(id));
        if rows.len() == before {
            return Err(ClientError::NotFound(format!("{}/{}", table, id)));
        }
        Ok(())
    }
}
