//! Typed query model evaluated by store backends.
//!
//! Fields always address top-level document keys. The model covers exactly
//! what the server needs from the store: equality and prefix filters,
//! store-side ordering, and a projection that can report the length of an
//! embedded array without shipping the array itself.

use serde_json::Value;

/// Sort direction for [`OrderBy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive parse; anything other than `desc` sorts ascending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// A single filter clause; clauses combine with logical AND.
#[derive(Debug, Clone)]
pub enum Filter {
    Eq { field: String, value: Value },
    StartsWith { field: String, prefix: String },
}

/// Store-side ordering over one document field.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub field: String,
    pub order: SortOrder,
}

/// One column of a projected result row.
#[derive(Debug, Clone)]
pub enum Select {
    /// Copy a field into the row under `alias`.
    Field { field: String, alias: String },
    /// Emit the length of an array field under `alias`; a missing or
    /// non-array value counts as 0.
    ArrayLength { field: String, alias: String },
}

/// A query against the whole collection.
///
/// An empty projection returns full documents.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub projection: Vec<Select>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn filter_starts_with(
        mut self,
        field: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        self.filters.push(Filter::StartsWith {
            field: field.into(),
            prefix: prefix.into(),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            order,
        });
        self
    }

    pub fn select_field(mut self, field: impl Into<String>, alias: impl Into<String>) -> Self {
        self.projection.push(Select::Field {
            field: field.into(),
            alias: alias.into(),
        });
        self
    }

    pub fn select_array_length(
        mut self,
        field: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        self.projection.push(Select::ArrayLength {
            field: field.into(),
            alias: alias.into(),
        });
        self
    }
}
