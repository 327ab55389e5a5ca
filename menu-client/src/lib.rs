//! Menu Client - thin client for the remote table store
//!
//! The menu data (businesses, categories, products, tags, feedbacks, admins)
//! lives in a remote relational backend exposed as row-level CRUD. This crate
//! only offers the four calls the application needs: insert one row, update
//! a row by id, delete a row by id, and select with equality filters and an
//! order column. No batching, no transactions.

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod store;
pub mod table;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpTableClient;
pub use memory::MemoryTableClient;
pub use store::{RemoteStore, Row, insert_as, select_as, update_as};
pub use table::{Filter, OrderBy, Query, Table};
