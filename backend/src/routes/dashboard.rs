use serde::{Deserialize, Serialize};

use super::filters::FilterOptions;
use crate::services::filters::FilterSelection;

// =========================================================
// Dashboard aggregate types + route
// =========================================================

/// Mean of a numeric column within one category group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub key: String,
    pub mean: f64,
    pub count: usize,
}

/// Mean price per hour for one minimum booking duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationPoint {
    pub minimum_duration_hours: f64,
    pub mean_price_per_hour: f64,
    pub count: usize,
}

/// Mean cost per person by capacity tier (rows) and time of day (columns).
///
/// `cells[r][c]` is `None` when no listing in the filtered subset has that
/// tier/time combination with a stored cost per person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl PivotTable {
    pub fn get(&self, row_label: &str, column_label: &str) -> Option<f64> {
        let r = self.row_labels.iter().position(|l| l == row_label)?;
        let c = self.column_labels.iter().position(|l| l == column_label)?;
        self.cells.get(r)?.get(c).copied().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty() || self.column_labels.is_empty()
    }
}

/// A listing in the most-expensive ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedListing {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Position of the listing in the loaded dataset.
    pub row_index: usize,
    pub room_name: String,
    pub organisation_name: String,
    pub capacity_tier: String,
    pub price_per_hour: f64,
}

/// One point of the price-vs-capacity scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub row_index: usize,
    pub capacity: u32,
    pub price_per_hour: f64,
    pub capacity_tier: String,
    pub room_name: String,
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

/// Statistics per numeric column; `None` means no data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub price_per_hour: Option<DescriptiveStats>,
    pub capacity: Option<DescriptiveStats>,
    pub cost_per_person: Option<DescriptiveStats>,
}

/// A listing whose stored cost per person disagrees with price / capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDivergence {
    pub row_index: usize,
    pub room_name: String,
    pub stored: f64,
    pub derived: f64,
}

/// Headline numbers. Means are `None` when the filtered subset is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_count: usize,
    pub filtered_count: usize,
    pub avg_price_per_hour: Option<f64>,
    /// Mean of per-row price / capacity.
    pub avg_price_per_person: Option<f64>,
}

/// Everything the Home page shows, for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub filters: FilterOptions,
    pub selection: FilterSelection,
    pub metrics: DashboardMetrics,
    pub price_by_tier: Vec<GroupMean>,
    pub price_by_time_of_day: Vec<GroupMean>,
    pub cost_per_person_pivot: PivotTable,
    pub scatter: Vec<ScatterPoint>,
    pub top_rooms: Vec<RankedListing>,
    pub price_by_duration: Vec<DurationPoint>,
    pub stats: ColumnStats,
    pub cost_divergences: Vec<CostDivergence>,
    pub source_checksum: Option<String>,
}

/// Route path for dashboard data
pub const GET_DASHBOARD_DATA: &str = "/v1/dashboard";
