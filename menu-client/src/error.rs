//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// API key rejected
    #[error("Authentication required")]
    Unauthorized,

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row rejected by the store (constraint, bad column, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unique constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other error status from the store
    #[error("Remote store error ({code}): {message}")]
    Remote { code: ErrorCode, message: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let code = match &err {
            ClientError::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            ClientError::Http(_) => ErrorCode::NetworkError,
            ClientError::Unauthorized => ErrorCode::NotAuthenticated,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Validation(_) => ErrorCode::ValidationFailed,
            ClientError::Conflict(_) => ErrorCode::AlreadyExists,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ErrorCode::InvalidFormat
            }
            ClientError::Remote { code, .. } => *code,
            ClientError::Internal(_) => ErrorCode::RemoteStoreError,
        };
        AppError::with_message(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_to_app_error() {
        let err: AppError = ClientError::NotFound("categories/c1".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Not found: categories/c1");

        let err: AppError = ClientError::Conflict("slug".into()).into();
        assert_eq!(err.code, ErrorCode::AlreadyExists);

        let err: AppError = ClientError::Internal("boom".into()).into();
        assert_eq!(err.code, ErrorCode::RemoteStoreError);

        let err: AppError = ClientError::Remote {
            code: ErrorCode::NetworkError,
            message: "upstream down".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert_eq!(err.message, "Remote store error (9003): upstream down");
    }
}
