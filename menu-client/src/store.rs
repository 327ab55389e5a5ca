//! Remote store trait and typed helpers

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{ClientError, ClientResult, Query, Table};

/// One row of a table, as a JSON object
pub type Row = Map<String, Value>;

/// Row-level CRUD over the remote table store.
///
/// Every call is an independent request: callers that issue several updates
/// get no ordering or atomicity guarantee between them.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Select rows matching every filter, ordered and limited per `query`
    async fn select(&self, table: Table, query: &Query) -> ClientResult<Vec<Row>>;

    /// Insert one row and return it as stored
    async fn insert(&self, table: Table, row: Row) -> ClientResult<Row>;

    /// Shallow-merge `patch` into the row with this id and return the result
    async fn update(&self, table: Table, id: &str, patch: Row) -> ClientResult<Row>;

    /// Delete the row with this id
    async fn delete(&self, table: Table, id: &str) -> ClientResult<()>;
}

fn to_row<B: Serialize>(body: &B) -> ClientResult<Row> {
    match serde_json::to_value(body)? {
        Value::Object(map) => Ok(map),
        other => Err(ClientError::InvalidResponse(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

fn from_row<T: DeserializeOwned>(row: Row) -> ClientResult<T> {
    serde_json::from_value(Value::Object(row)).map_err(Into::into)
}

/// Select and deserialize rows
pub async fn select_as<T: DeserializeOwned>(
    store: &dyn RemoteStore,
    table: Table,
    query: &Query,
) -> ClientResult<Vec<T>> {
    store
        .select(table, query)
        .await?
        .into_iter()
        .map(from_row)
        .collect()
}

/// Insert a serializable row and deserialize what the store returns
pub async fn insert_as<T: DeserializeOwned, B: Serialize + Sync>(
    store: &dyn RemoteStore,
    table: Table,
    body: &B,
) -> ClientResult<T> {
    let row = store.insert(table, to_row(body)?).await?;
    from_row(row)
}

/// Update a row with a serializable patch and deserialize the result
pub async fn update_as<T: DeserializeOwned, B: Serialize + Sync>(
    store: &dyn RemoteStore,
    table: Table,
    id: &str,
    patch: &B,
) -> ClientResult<T> {
    let row = store.update(table, id, to_row(patch)?).await?;
    from_row(row)
}
