use serde::{Deserialize, Serialize};

use crate::models::CategoryColumn;

// =========================================================
// Filter option types + route
// =========================================================

/// Distinct values of one filterable column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterColumnOptions {
    pub column: CategoryColumn,
    pub label: String,
    /// Query-string key the filter form submits under.
    pub key: String,
    pub values: Vec<String>,
}

/// Options for every filter control, in sidebar order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub columns: Vec<FilterColumnOptions>,
}

impl FilterOptions {
    pub fn column(&self, column: CategoryColumn) -> Option<&FilterColumnOptions> {
        self.columns.iter().find(|c| c.column == column)
    }
}

/// Route path for filter options
pub const GET_FILTER_OPTIONS: &str = "/v1/filters";
