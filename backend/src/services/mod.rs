//! Service layer for business logic and orchestration.
//!
//! Services sit between workbook loading and the HTTP/rendering layers:
//! filtering, aggregation, dataset memoization and per-session navigation.

pub mod aggregates;

pub mod dashboard;

pub mod dataset_cache;

pub mod filters;

pub mod navigation;

pub use dashboard::{compute_dashboard_data, get_dashboard_data};
pub use dataset_cache::DatasetCache;
pub use filters::{select, FilterSelection, FilterSet, FilteredSubset, APPLIED_KEY};
pub use navigation::{Page, ResolvedSession, SessionStore};
