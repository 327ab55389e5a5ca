//! HTTP table client
//!
//! Speaks the REST dialect of PostgREST-style table APIs:
//!
//! ```text
//! GET    /rest/v1/{table}?select=*&business_id=eq.{id}&order=sort_order.asc
//! POST   /rest/v1/{table}                      (Prefer: return=representation)
//! PATCH  /rest/v1/{table}?id=eq.{id}           (Prefer: return=representation)
//! DELETE /rest/v1/{table}?id=eq.{id}           (Prefer: return=representation)
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use shared::error::ErrorCode;

use crate::{ClientConfig, ClientError, ClientResult, Query, RemoteStore, Row, Table};

const REST_PREFIX: &str = "rest/v1";

/// HTTP client for the remote table store
#[derive(Debug, Clone)]
pub struct HttpTableClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTableClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            REST_PREFIX,
            table.name()
        )
    }

    /// Attach the API key headers
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request
                .header("apikey", key)
                .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", key)),
            None => request,
        }
    }

    /// Render a query as URL parameters
    pub fn query_params(query: &Query) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        for filter in &query.filters {
            params.push((filter.column.clone(), eq_operand(&filter.value)));
        }
        if let Some(order) = &query.order {
            let dir = if order.ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{}", order.column, dir)));
        }
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    /// Map error statuses, then decode the body
    async fn handle_response(response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return Err(status_error(status, text));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Array(Vec::new()));
        }
        response.json().await.map_err(Into::into)
    }

    fn rows(value: Value) -> ClientResult<Vec<Row>> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(row) => Ok(row),
                    other => Err(ClientError::InvalidResponse(format!(
                        "expected row object, got {}",
                        other
                    ))),
                })
                .collect(),
            Value::Object(row) => Ok(vec![row]),
            other => Err(ClientError::InvalidResponse(format!(
                "expected row array, got {}",
                other
            ))),
        }
    }

    fn single(table: Table, id: &str, value: Value) -> ClientResult<Row> {
        Self::rows(value)?
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(format!("{}/{}", table, id)))
    }
}

/// Error for a non-success status, classified by the shared status mapping
fn status_error(status: StatusCode, body: String) -> ClientError {
    match ErrorCode::from_http_status(status) {
        ErrorCode::NotAuthenticated => ClientError::Unauthorized,
        ErrorCode::NotFound => ClientError::NotFound(body),
        ErrorCode::AlreadyExists => ClientError::Conflict(body),
        ErrorCode::ValidationFailed => ClientError::Validation(body),
        code => ClientError::Remote {
            code,
            message: format!("{}: {}", status, body),
        },
    }
}

/// `eq.` operand for a filter value
fn eq_operand(value: &Value) -> String {
    match value {
        Value::Null => "is.null".to_string(),
        Value::String(s) => format!("eq.{}", s),
        other => format!("eq.{}", other),
    }
}

#[async_trait]
impl RemoteStore for HttpTableClient {
    async fn select(&self, table: Table, query: &Query) -> ClientResult<Vec<Row>> {
        let request = self
            .client
            .get(self.table_url(table))
            .query(&Self::query_params(query));
        let response = self.authorize(request).send().await?;
        let rows = Self::rows(Self::handle_response(response).await?)?;
        tracing::debug!(table = %table, count = rows.len(), "Remote select completed");
        Ok(rows)
    }

    async fn insert(&self, table: Table, row: Row) -> ClientResult<Row> {
        let request = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&row);
        let response = self.authorize(request).send().await?;
        let value = Self::handle_response(response).await?;
        Self::rows(value)?
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse("insert returned no row".to_string()))
    }

    async fn update(&self, table: Table, id: &str, patch: Row) -> ClientResult<Row> {
        let request = self
            .client
            .patch(self.table_url(table))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&patch);
        let response = self.authorize(request).send().await?;
        Self::single(table, id, Self::handle_response(response).await?)
    }

    async fn delete(&self, table: Table, id: &str) -> ClientResult<()> {
        let request = self
            .client
            .delete(self.table_url(table))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation");
        let response = self.authorize(request).send().await?;
        Self::single(table, id, Self::handle_response(response).await?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        let query = Query::new()
            .eq("business_id", "b1")
            .eq("is_active", true)
            .order_by("sort_order")
            .limit(5);
        let params = HttpTableClient::query_params(&query);
        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*".to_string()),
                ("business_id".to_string(), "eq.b1".to_string()),
                ("is_active".to_string(), "eq.true".to_string()),
                ("order".to_string(), "sort_order.asc".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_descending_order_and_null_filter() {
        let query = Query::new()
            .eq("phone", Value::Null)
            .order_by_desc("created_at");
        let params = HttpTableClient::query_params(&query);
        assert_eq!(params[1], ("phone".to_string(), "is.null".to_string()));
        assert_eq!(params[2], ("order".to_string(), "created_at.desc".to_string()));
    }

    #[test]
    fn test_table_url() {
        let client = HttpTableClient::new(&ClientConfig::new("https://db.example.com/")).unwrap();
        assert_eq!(
            client.table_url(Table::Categories),
            "https://db.example.com/rest/v1/categories"
        );
    }

    #[test]
    fn test_single_maps_empty_to_not_found() {
        let err = HttpTableClient::single(Table::Products, "p9", Value::Array(vec![])).unwrap_err();
        assert!(matches!(err, ClientError::NotFound(msg) if msg == "products/p9"));
    }

    #[test]
    fn test_status_error_auth() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "JWT expired".into()),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, "RLS".into()),
            ClientError::Unauthorized
        ));
    }

    #[test]
    fn test_status_error_keeps_body() {
        let err = status_error(StatusCode::NOT_FOUND, "no table".into());
        assert!(matches!(err, ClientError::NotFound(msg) if msg == "no table"));

        let err = status_error(StatusCode::CONFLICT, "duplicate key".into());
        assert!(matches!(err, ClientError::Conflict(msg) if msg == "duplicate key"));

        let err = status_error(StatusCode::UNPROCESSABLE_ENTITY, "bad column".into());
        assert!(matches!(err, ClientError::Validation(msg) if msg == "bad column"));

        let err = status_error(StatusCode::BAD_REQUEST, "bad filter".into());
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn test_status_error_server_side() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom".into());
        assert!(matches!(
            &err,
            ClientError::Remote { code: ErrorCode::RemoteStoreError, message }
                if message.ends_with("boom")
        ));

        let err: shared::AppError = status_error(StatusCode::SERVICE_UNAVAILABLE, String::new()).into();
        assert_eq!(err.code, ErrorCode::NetworkError);

        let err: shared::AppError = status_error(StatusCode::GATEWAY_TIMEOUT, String::new()).into();
        assert_eq!(err.code, ErrorCode::TimeoutError);
    }
}
