//! Row query model shared by the row store port and its adapters.

use std::fmt;

/// Column predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`
    Eq { column: String, value: String },
    /// `column <> value`
    Neq { column: String, value: String },
}

impl Filter {
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Self::Eq {
            column: column.into(),
            value: value.to_string(),
        }
    }

    #[must_use]
    pub fn neq(column: impl Into<String>, value: impl ToString) -> Self {
        Self::Neq {
            column: column.into(),
            value: value.to_string(),
        }
    }

    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::Eq { column, .. } | Self::Neq { column, .. } => column,
        }
    }

    /// Operator-prefixed value in the REST query-string form (`eq.42`).
    #[must_use]
    pub fn to_param_value(&self) -> String {
        match self {
            Self::Eq { value, .. } => format!("eq.{value}"),
            Self::Neq { value, .. } => format!("neq.{value}"),
        }
    }

    /// Evaluates the predicate against a loosely typed row.
    ///
    /// Values are compared by their textual form, so `42` matches `"42"`.
    #[must_use]
    pub fn matches(&self, row: &serde_json::Value) -> bool {
        let cell = row.get(self.column()).map(cell_text);
        match self {
            Self::Eq { value, .. } => cell.as_deref() == Some(value.as_str()),
            Self::Neq { value, .. } => cell.as_deref() != Some(value.as_str()),
        }
    }
}

fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.column(), self.to_param_value())
    }
}

/// Select over one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowQuery {
    pub table: String,
    pub columns: String,
    pub filters: Vec<Filter>,
    pub limit: Option<usize>,
}

impl RowQuery {
    /// Selects every column of `table`.
    #[must_use]
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: "*".to_string(),
            filters: Vec::new(),
            limit: None,
        }
    }

    /// Restricts the projected columns (comma separated).
    #[must_use]
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    #[must_use]
    pub fn neq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter::neq(column, value));
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a row satisfies every filter.
    #[must_use]
    pub fn matches(&self, row: &serde_json::Value) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }
}

/// Table names used by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub profiles: String,
    pub food_items: String,
    pub orders: String,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            profiles: "profiles".to_string(),
            food_items: "food_items".to_string(),
            orders: "order_history2".to_string(),
        }
    }
}
