//! Menu Core - application state of the QR menu
//!
//! # Modules
//!
//! - [`theme`]: theme settings store, presets and style variables
//! - [`ordering`]: drag-to-reorder gesture and sort order write-back
//! - [`catalog`]: repositories and the admin menu editor
//! - [`feedback`], [`favorites`], [`session`]: the remaining storefront and
//!   admin state
//! - [`storage`]: device-local key/value persistence

pub mod catalog;
pub mod config;
pub mod favorites;
pub mod feedback;
pub mod logger;
pub mod ordering;
pub mod session;
pub mod storage;
pub mod theme;
pub mod toast;

pub use catalog::MenuEditor;
pub use config::MenuConfig;
pub use favorites::FavoritesStore;
pub use feedback::FeedbackService;
pub use session::AdminSession;
pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageError, StorageResult};
pub use theme::{StyleSheet, StyleSink, ThemeStore};
pub use toast::{Toast, ToastQueue, ToastSeverity};
