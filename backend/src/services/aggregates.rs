//! Aggregate views over a filtered subset.
//!
//! Every function here is pure and tolerates an empty subset: scalar means
//! come back as `None` ("no data") and grouped views come back empty.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use super::filters::FilteredSubset;
use crate::api::{
    ColumnStats, CostDivergence, DescriptiveStats, DurationPoint, GroupMean, PivotTable,
    RankedListing, ScatterPoint,
};
use crate::models::RoomListing;

/// Number of listings in the most-expensive ranking.
pub const TOP_ROOMS: usize = 5;

/// Largest tolerated gap between stored and derived cost per person.
pub const COST_DIVERGENCE_TOLERANCE: f64 = 0.01;

/// Arithmetic mean, `None` for an empty input.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Compute statistics for a set of values.
/// Calculates mean, median, population std dev, min, max, and sum.
pub fn compute_stats(values: &[f64]) -> Option<DescriptiveStats> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    Some(DescriptiveStats {
        count,
        mean,
        median,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[count - 1],
        sum,
    })
}

/// Mean of `value` per distinct `key`, groups sorted by key.
///
/// Only keys present in the subset produce a group.
pub fn grouped_mean<K, V>(subset: &FilteredSubset<'_>, key: K, value: V) -> Vec<GroupMean>
where
    K: Fn(&RoomListing) -> &str,
    V: Fn(&RoomListing) -> f64,
{
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in subset.listings() {
        let entry = groups.entry(key(row)).or_insert((0.0, 0));
        entry.0 += value(row);
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(key, (sum, count))| GroupMean {
            key: key.to_string(),
            mean: sum / count as f64,
            count,
        })
        .collect()
}

pub fn price_by_tier(subset: &FilteredSubset<'_>) -> Vec<GroupMean> {
    grouped_mean(subset, |r| r.capacity_tier.as_str(), |r| r.price_per_hour)
}

pub fn price_by_time_of_day(subset: &FilteredSubset<'_>) -> Vec<GroupMean> {
    grouped_mean(subset, |r| r.time_of_day.as_str(), |r| r.price_per_hour)
}

pub fn average_price_per_hour(subset: &FilteredSubset<'_>) -> Option<f64> {
    mean(subset.listings().map(|r| r.price_per_hour))
}

/// Mean of the per-row ratio price / capacity.
///
/// Not the same as mean(price) / mean(capacity): a cheap large room and an
/// expensive small room weigh equally here.
pub fn average_price_per_person(subset: &FilteredSubset<'_>) -> Option<f64> {
    mean(subset.listings().map(RoomListing::price_per_person))
}

/// Mean stored cost per person by capacity tier × time of day.
///
/// Tiers and times with no stored cost at all are left out; gaps inside the
/// remaining grid are `None`.
pub fn cost_per_person_pivot(subset: &FilteredSubset<'_>) -> PivotTable {
    let mut sums: BTreeMap<(&str, &str), (f64, usize)> = BTreeMap::new();
    for row in subset.listings() {
        if let Some(cost) = row.cost_per_person {
            let entry = sums
                .entry((row.capacity_tier.as_str(), row.time_of_day.as_str()))
                .or_insert((0.0, 0));
            entry.0 += cost;
            entry.1 += 1;
        }
    }

    let row_labels: BTreeSet<&str> = sums.keys().map(|(tier, _)| *tier).collect();
    let column_labels: BTreeSet<&str> = sums.keys().map(|(_, time)| *time).collect();

    let cells = row_labels
        .iter()
        .map(|tier| {
            column_labels
                .iter()
                .map(|time| sums.get(&(*tier, *time)).map(|(sum, n)| sum / *n as f64))
                .collect()
        })
        .collect();

    PivotTable {
        row_labels: row_labels.into_iter().map(str::to_string).collect(),
        column_labels: column_labels.into_iter().map(str::to_string).collect(),
        cells,
    }
}

/// Most expensive listings by price per hour; ties keep dataset order.
pub fn top_by_price(subset: &FilteredSubset<'_>, n: usize) -> Vec<RankedListing> {
    let mut ranked: Vec<(usize, &RoomListing)> = subset.rows().to_vec();
    // sort_by is stable, so equal prices stay in original order
    ranked.sort_by(|a, b| {
        b.1.price_per_hour
            .partial_cmp(&a.1.price_per_hour)
            .unwrap_or(Ordering::Equal)
    });
    ranked
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (row_index, row))| RankedListing {
            rank: i + 1,
            row_index,
            room_name: row.room_name.clone(),
            organisation_name: row.organisation_name.clone(),
            capacity_tier: row.capacity_tier.clone(),
            price_per_hour: row.price_per_hour,
        })
        .collect()
}

/// Mean price per hour per minimum duration, ascending by duration.
pub fn price_by_duration(subset: &FilteredSubset<'_>) -> Vec<DurationPoint> {
    let mut pairs: Vec<(f64, f64)> = subset
        .listings()
        .map(|r| (r.minimum_duration_hours, r.price_per_hour))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut points: Vec<DurationPoint> = Vec::new();
    let mut sum = 0.0;
    for (duration, price) in pairs {
        if let Some(last) = points
            .last_mut()
            .filter(|p| p.minimum_duration_hours == duration)
        {
            sum += price;
            last.count += 1;
            last.mean_price_per_hour = sum / last.count as f64;
        } else {
            sum = price;
            points.push(DurationPoint {
                minimum_duration_hours: duration,
                mean_price_per_hour: price,
                count: 1,
            });
        }
    }
    points
}

pub fn scatter_points(subset: &FilteredSubset<'_>) -> Vec<ScatterPoint> {
    subset
        .rows()
        .iter()
        .map(|(row_index, row)| ScatterPoint {
            row_index: *row_index,
            capacity: row.capacity,
            price_per_hour: row.price_per_hour,
            capacity_tier: row.capacity_tier.clone(),
            room_name: row.room_name.clone(),
        })
        .collect()
}

pub fn column_stats(subset: &FilteredSubset<'_>) -> ColumnStats {
    let prices: Vec<f64> = subset.listings().map(|r| r.price_per_hour).collect();
    let capacities: Vec<f64> = subset.listings().map(|r| f64::from(r.capacity)).collect();
    let costs: Vec<f64> = subset.listings().filter_map(|r| r.cost_per_person).collect();

    ColumnStats {
        price_per_hour: compute_stats(&prices),
        capacity: compute_stats(&capacities),
        cost_per_person: compute_stats(&costs),
    }
}

/// Listings whose stored cost per person differs from price / capacity by
/// more than `tolerance`. The stored value is reported, never replaced.
pub fn cost_divergences(subset: &FilteredSubset<'_>, tolerance: f64) -> Vec<CostDivergence> {
    subset
        .rows()
        .iter()
        .filter_map(|(row_index, row)| {
            let stored = row.cost_per_person?;
            let derived = row.price_per_person();
            ((stored - derived).abs() > tolerance).then(|| CostDivergence {
                row_index: *row_index,
                room_name: row.room_name.clone(),
                stored,
                derived,
            })
        })
        .collect()
}
