//! Public API surface for the dashboard backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::dashboard::ColumnStats;
pub use crate::routes::dashboard::CostDivergence;
pub use crate::routes::dashboard::DashboardData;
pub use crate::routes::dashboard::DashboardMetrics;
pub use crate::routes::dashboard::DescriptiveStats;
pub use crate::routes::dashboard::DurationPoint;
pub use crate::routes::dashboard::GroupMean;
pub use crate::routes::dashboard::PivotTable;
pub use crate::routes::dashboard::RankedListing;
pub use crate::routes::dashboard::ScatterPoint;
pub use crate::routes::filters::FilterColumnOptions;
pub use crate::routes::filters::FilterOptions;

pub use crate::models::{CategoryColumn, Dataset, RoomListing};
pub use crate::services::filters::FilterSelection;
pub use crate::services::navigation::Page;
