//! Durable write-back of a new order
//!
//! One independent `update` per id, `sort_order` set to the array index.
//! There is no batching and no rollback: if some calls fail the remote
//! store keeps a mixed order while the local mirror shows the intended one.
//! The [`PersistReport`] is the only place that drift becomes visible.

use futures::future::join_all;
use menu_client::{RemoteStore, Row, Table};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Outcome of one reorder write-back
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersistReport {
    pub updated: usize,
    /// (id, error message) for every failed update
    pub failed: Vec<(String, String)>,
}

impl PersistReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.updated + self.failed.len()
    }
}

fn sort_order_patch(index: usize) -> Row {
    let mut patch = Row::new();
    patch.insert("sort_order".to_string(), Value::from(index));
    patch
}

/// Write every id's index as its `sort_order`.
///
/// Calls are created in array order and run concurrently; completion order
/// is whatever the store gives.
pub async fn persist_order(
    store: Arc<dyn RemoteStore>,
    table: Table,
    ids: Vec<String>,
) -> PersistReport {
    tracing::info!(table = %table, count = ids.len(), "Persisting sort order");

    let calls = ids.iter().enumerate().map(|(index, id)| {
        let store = store.clone();
        async move {
            tracing::debug!(table = %table, id = %id, sort_order = index, "Updating sort order");
            store.update(table, id, sort_order_patch(index)).await
        }
    });
    let results = join_all(calls).await;

    let mut report = PersistReport::default();
    for (id, result) in ids.into_iter().zip(results) {
        match result {
            Ok(_) => report.updated += 1,
            Err(e) => {
                tracing::error!(table = %table, id = %id, error = %e, "Failed to update sort order");
                report.failed.push((id, e.to_string()));
            }
        }
    }

    if report.is_complete() {
        tracing::info!(table = %table, updated = report.updated, "Sort order persisted");
    } else {
        tracing::warn!(
            table = %table,
            updated = report.updated,
            failed = report.failed.len(),
            "Sort order partially persisted, remote order has drifted"
        );
    }
    report
}

/// Run [`persist_order`] as a task on `runtime` so the caller never waits
/// on it. The caller's thread does not need a runtime context.
pub fn spawn_persist(
    runtime: &Handle,
    store: Arc<dyn RemoteStore>,
    table: Table,
    ids: Vec<String>,
) -> JoinHandle<PersistReport> {
    runtime.spawn(persist_order(store, table, ids))
}
