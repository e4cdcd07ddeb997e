use crate::api::{DashboardData, DashboardMetrics};
use crate::config::SourceConfig;
use crate::io::LoadResult;
use crate::models::Dataset;

use super::aggregates::{
    average_price_per_hour, average_price_per_person, column_stats, cost_divergences,
    cost_per_person_pivot, price_by_duration, price_by_tier, price_by_time_of_day,
    scatter_points, top_by_price, COST_DIVERGENCE_TOLERANCE, TOP_ROOMS,
};
use super::dataset_cache::DatasetCache;
use super::filters::{select, FilterSelection, FilterSet};

/// Compute every Home page view for one selection.
pub fn compute_dashboard_data(
    dataset: &Dataset,
    filter_set: &FilterSet,
    selection: &FilterSelection,
) -> DashboardData {
    let subset = select(dataset, selection);

    let metrics = DashboardMetrics {
        total_count: dataset.len(),
        filtered_count: subset.len(),
        avg_price_per_hour: average_price_per_hour(&subset),
        avg_price_per_person: average_price_per_person(&subset),
    };

    DashboardData {
        filters: filter_set.to_options(),
        selection: selection.clone(),
        metrics,
        price_by_tier: price_by_tier(&subset),
        price_by_time_of_day: price_by_time_of_day(&subset),
        cost_per_person_pivot: cost_per_person_pivot(&subset),
        scatter: scatter_points(&subset),
        top_rooms: top_by_price(&subset, TOP_ROOMS),
        price_by_duration: price_by_duration(&subset),
        stats: column_stats(&subset),
        cost_divergences: cost_divergences(&subset, COST_DIVERGENCE_TOLERANCE),
        source_checksum: dataset.source_checksum.clone(),
    }
}

/// Load (or reuse) the dataset and compute the dashboard for a raw query string.
///
/// A missing query means the initial render: every filter admits everything.
pub fn get_dashboard_data(
    cache: &DatasetCache,
    source: &SourceConfig,
    query: Option<&str>,
) -> LoadResult<DashboardData> {
    let dataset = cache.get_or_load(source)?;
    let filter_set = FilterSet::from_dataset(&dataset);
    let selection = match query {
        Some(query) => FilterSelection::from_query_string(query, &filter_set),
        None => filter_set.default_selection(),
    };

    let data = compute_dashboard_data(&dataset, &filter_set, &selection);
    log::debug!(
        "Dashboard computed: {} of {} listings selected",
        data.metrics.filtered_count,
        data.metrics.total_count
    );
    Ok(data)
}
