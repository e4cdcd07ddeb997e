//! Data Transfer Objects for the HTTP API.
//!
//! Dashboard DTOs are re-exported from the routes module since they already
//! derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    ColumnStats, CostDivergence, DashboardData, DashboardMetrics, DescriptiveStats, DurationPoint,
    FilterColumnOptions, FilterOptions, GroupMean, PivotTable, RankedListing, ScatterPoint,
};

/// Form body of the sidebar navigation buttons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigateForm {
    /// `home` or `about`
    pub page: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Whether the configured workbook file exists (`present` / `missing`)
    pub source: String,
    /// Number of live browser sessions
    pub sessions: usize,
    /// Number of workbooks held in the dataset cache
    pub cached_datasets: usize,
}
