//! Tables and select queries

use serde_json::Value;
use std::fmt;

/// Tables of the remote store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Businesses,
    Categories,
    Products,
    Tags,
    Feedbacks,
    Admins,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::Businesses,
        Table::Categories,
        Table::Products,
        Table::Tags,
        Table::Feedbacks,
        Table::Admins,
    ];

    /// Table name as known by the remote store
    pub fn name(&self) -> &'static str {
        match self {
            Self::Businesses => "businesses",
            Self::Categories => "categories",
            Self::Products => "products",
            Self::Tags => "tags",
            Self::Feedbacks => "feedbacks",
            Self::Admins => "admins",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Equality predicate `column = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

/// Order column
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub ascending: bool,
}

/// Select query: equality filters (ANDed), one order column, optional limit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order = Some(OrderBy {
            column: column.into(),
            ascending: true,
        });
        self
    }

    pub fn order_by_desc(mut self, column: impl Into<String>) -> Self {
        self.order = Some(OrderBy {
            column: column.into(),
            ascending: false,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
