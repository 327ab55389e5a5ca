//! Shared types for the QR menu workspace
//!
//! Data models persisted in the remote table store, the theme settings
//! record, local storage keys and the unified error type.

pub mod error;
pub mod keys;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
