//! Declarative descriptions of one store request.
//!
//! A [`TableQuery`] names a table, the columns to return, filters, ordering,
//! a row limit and whether exactly one row is expected. A [`TablePatch`]
//! describes a targeted update. Neither knows how the store encodes them.

use serde_json::{Map, Value};

/// Comparison operators for [`Filter::Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl std::str::FromStr for CompareOp {
    type Err = String;

    /// Parses the store's operator names (`eq`, `neq`, `gt`, `gte`, `lt`, `lte`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "neq" => Ok(Self::Neq),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            other => Err(format!("unknown comparison operator '{other}'")),
        }
    }
}

/// One row filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column <op> value`
    Compare {
        column: String,
        op: CompareOp,
        value: String,
    },
    /// SQL `LIKE` / `ILIKE`; `*` and `%` are wildcards.
    Pattern {
        column: String,
        pattern: String,
        case_insensitive: bool,
    },
    /// Set membership.
    In { column: String, values: Vec<String> },
    /// `column IS NULL`
    IsNull { column: String },
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Self::Compare { column, .. }
            | Self::Pattern { column, .. }
            | Self::In { column, .. }
            | Self::IsNull { column } => column,
        }
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, Self::Compare { op: CompareOp::Eq, .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub column: String,
    pub direction: SortDirection,
    pub nulls_last: bool,
}

/// A read against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    pub table: String,
    /// Empty means all columns.
    pub columns: Vec<String>,
    pub filters: Vec<Filter>,
    pub order: Vec<Ordering>,
    pub limit: Option<u32>,
    /// The store must return exactly one row or fail.
    pub expect_single: bool,
}

impl TableQuery {
    pub fn on(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            expect_single: false,
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn eq(self, column: impl Into<String>, value: impl ToString) -> Self {
        self.compare(column, CompareOp::Eq, value)
    }

    pub fn compare(self, column: impl Into<String>, op: CompareOp, value: impl ToString) -> Self {
        self.filter(Filter::Compare {
            column: column.into(),
            op,
            value: value.to_string(),
        })
    }

    pub fn ilike(self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filter(Filter::Pattern {
            column: column.into(),
            pattern: pattern.into(),
            case_insensitive: true,
        })
    }

    pub fn within<I, S>(self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.filter(Filter::In {
            column: column.into(),
            values: values.into_iter().map(|v| v.to_string()).collect(),
        })
    }

    pub fn is_null(self, column: impl Into<String>) -> Self {
        self.filter(Filter::IsNull {
            column: column.into(),
        })
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.order.push(Ordering {
            column: column.into(),
            direction,
            nulls_last: false,
        });
        self
    }

    /// Sort nulls after non-null values on the most recent `order_by`.
    pub fn nulls_last(mut self) -> Self {
        if let Some(last) = self.order.last_mut() {
            last.nulls_last = true;
        }
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn single(mut self) -> Self {
        self.expect_single = true;
        self
    }
}

/// A targeted update: set `values` on rows matching `filters`.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePatch {
    pub table: String,
    pub filters: Vec<Filter>,
    pub values: Map<String, Value>,
}

impl TablePatch {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
            values: Map::new(),
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter::Compare {
            column: column.into(),
            op: CompareOp::Eq,
            value: value.to_string(),
        });
        self
    }

    /// Patches are only issued with at least one equality filter, so a
    /// mistake can never rewrite a whole table.
    pub fn is_targeted(&self) -> bool {
        self.filters.iter().any(Filter::is_equality)
    }
}
