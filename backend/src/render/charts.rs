//! Plotly figures built from the aggregate views.
//!
//! Figures are plain JSON (`{"data": [...], "layout": {...}}`) handed to
//! `Plotly.newPlot` in the browser. Nothing here aggregates: every value comes
//! straight from a [`DashboardData`] field.

use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};

use super::format::{escape_html, script_json};
use crate::api::{DashboardData, DurationPoint, GroupMean, PivotTable, RankedListing, ScatterPoint};

/// One chart slot on the Home page.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub element_id: &'static str,
    pub figure: Value,
}

fn layout(title: &str, x_title: &str, y_title: &str) -> Value {
    json!({
        "title": { "text": title },
        "xaxis": { "title": { "text": x_title } },
        "yaxis": { "title": { "text": y_title } },
        "margin": { "t": 60 },
    })
}

fn rounded(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn group_bar(groups: &[GroupMean], title: &str, x_title: &str) -> Value {
    let x: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    let y: Vec<f64> = groups.iter().map(|g| g.mean).collect();
    let text: Vec<f64> = groups.iter().map(|g| rounded(g.mean)).collect();
    json!({
        "data": [{
            "type": "bar",
            "x": x,
            "y": y,
            "text": text,
            "textposition": "auto",
        }],
        "layout": layout(title, x_title, "Price_per_hour"),
    })
}

pub fn price_by_time_of_day(groups: &[GroupMean]) -> Value {
    group_bar(groups, "Average Price per Hour by Time of Day", "Time_of_day")
}

pub fn price_by_tier(groups: &[GroupMean]) -> Value {
    group_bar(groups, "Average Price per Room by Capacity Tier", "Capacity_tier")
}

/// Heatmap of the cost-per-person pivot. Undefined cells stay `null` so
/// Plotly leaves them blank.
pub fn cost_per_person_heatmap(pivot: &PivotTable) -> Value {
    json!({
        "data": [{
            "type": "heatmap",
            "x": pivot.column_labels,
            "y": pivot.row_labels,
            "z": pivot.cells,
            "texttemplate": "%{z:.2f}",
            "hoverongaps": false,
            "colorscale": "Viridis",
        }],
        "layout": layout("Price per Person by Capacity Tier & Time", "Time_of_day", "Capacity_tier"),
    })
}

/// Price against capacity, one trace per capacity tier.
pub fn price_vs_capacity(points: &[ScatterPoint]) -> Value {
    let mut by_tier: BTreeMap<&str, Vec<&ScatterPoint>> = BTreeMap::new();
    for point in points {
        by_tier.entry(point.capacity_tier.as_str()).or_default().push(point);
    }
    let traces: Vec<Value> = by_tier
        .into_iter()
        .map(|(tier, points)| {
            json!({
                "type": "scatter",
                "mode": "markers",
                "name": tier,
                "x": points.iter().map(|p| p.capacity).collect::<Vec<_>>(),
                "y": points.iter().map(|p| p.price_per_hour).collect::<Vec<_>>(),
                "text": points.iter().map(|p| p.room_name.as_str()).collect::<Vec<_>>(),
            })
        })
        .collect();
    json!({
        "data": traces,
        "layout": layout("Price per Hour vs Capacity", "Capacity", "Price_per_hour"),
    })
}

/// X-axis labels for the ranking. A room name that appears more than once
/// (e.g. day and evening rates of one room) gets its rank appended so the
/// bars do not share a category.
fn ranked_labels(ranked: &[RankedListing]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for listing in ranked {
        *seen.entry(listing.room_name.as_str()).or_default() += 1;
    }
    ranked
        .iter()
        .map(|r| match seen.get(r.room_name.as_str()) {
            Some(n) if *n > 1 => format!("{} #{}", r.room_name, r.rank),
            _ => r.room_name.clone(),
        })
        .collect()
}

/// Ranked bar, coloured by capacity tier, bars kept in rank order.
pub fn top_rooms(ranked: &[RankedListing]) -> Value {
    let labels = ranked_labels(ranked);
    let mut by_tier: BTreeMap<&str, Vec<(&str, f64)>> = BTreeMap::new();
    for (listing, label) in ranked.iter().zip(&labels) {
        by_tier
            .entry(listing.capacity_tier.as_str())
            .or_default()
            .push((label.as_str(), listing.price_per_hour));
    }
    let traces: Vec<Value> = by_tier
        .into_iter()
        .map(|(tier, bars)| {
            json!({
                "type": "bar",
                "name": tier,
                "x": bars.iter().map(|(label, _)| *label).collect::<Vec<_>>(),
                "y": bars.iter().map(|(_, price)| *price).collect::<Vec<_>>(),
            })
        })
        .collect();

    let mut figure_layout = layout("Top 5 Most Expensive Rooms", "Names_of_Room", "Price_per_hour");
    figure_layout["barmode"] = json!("relative");
    figure_layout["xaxis"]["categoryorder"] = json!("array");
    figure_layout["xaxis"]["categoryarray"] = json!(labels);
    json!({ "data": traces, "layout": figure_layout })
}

pub fn price_by_duration(points: &[DurationPoint]) -> Value {
    json!({
        "data": [{
            "type": "scatter",
            "mode": "lines+markers",
            "x": points.iter().map(|p| p.minimum_duration_hours).collect::<Vec<_>>(),
            "y": points.iter().map(|p| p.mean_price_per_hour).collect::<Vec<_>>(),
        }],
        "layout": layout(
            "Price per Hour by Minimum Booking Duration",
            "Minimum_Duration_per_hour",
            "Price_per_hour",
        ),
    })
}

/// The six Home page charts, in page order.
pub fn home_charts(data: &DashboardData) -> Vec<Chart> {
    vec![
        Chart {
            element_id: "chart-time-of-day",
            figure: price_by_time_of_day(&data.price_by_time_of_day),
        },
        Chart {
            element_id: "chart-capacity-tier",
            figure: price_by_tier(&data.price_by_tier),
        },
        Chart {
            element_id: "chart-cost-heatmap",
            figure: cost_per_person_heatmap(&data.cost_per_person_pivot),
        },
        Chart {
            element_id: "chart-price-vs-capacity",
            figure: price_vs_capacity(&data.scatter),
        },
        Chart {
            element_id: "chart-top-rooms",
            figure: top_rooms(&data.top_rooms),
        },
        Chart {
            element_id: "chart-duration",
            figure: price_by_duration(&data.price_by_duration),
        },
    ]
}

/// Container plus the script that draws into it.
pub fn chart_html(chart: &Chart) -> String {
    let id = escape_html(chart.element_id);
    format!(
        "<div class=\"chart\" id=\"{id}\"></div>\n<script>Plotly.newPlot(\"{id}\", {data}, {layout}, {{\"responsive\": true}});</script>\n",
        data = script_json(&chart.figure["data"]),
        layout = script_json(&chart.figure["layout"]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(rank: usize, name: &str, tier: &str, price: f64) -> RankedListing {
        RankedListing {
            rank,
            row_index: rank - 1,
            room_name: name.to_string(),
            organisation_name: "Hall".to_string(),
            capacity_tier: tier.to_string(),
            price_per_hour: price,
        }
    }

    #[test]
    fn test_heatmap_keeps_gaps_null() {
        let pivot = PivotTable {
            row_labels: vec!["Large".to_string()],
            column_labels: vec!["Day".to_string(), "Evening".to_string()],
            cells: vec![vec![None, Some(2.5)]],
        };
        let figure = cost_per_person_heatmap(&pivot);
        assert_eq!(figure["data"][0]["z"][0][0], Value::Null);
        assert_eq!(figure["data"][0]["z"][0][1], 2.5);
    }

    #[test]
    fn test_group_bar_text_rounded() {
        let groups = vec![GroupMean {
            key: "Evening".to_string(),
            mean: 41.666666,
            count: 3,
        }];
        let figure = price_by_time_of_day(&groups);
        assert_eq!(figure["data"][0]["text"][0], 41.67);
        assert_eq!(
            figure["layout"]["title"]["text"],
            "Average Price per Hour by Time of Day"
        );
    }

    #[test]
    fn test_top_rooms_category_order_follows_rank() {
        let rows = vec![
            ranked(1, "Great Hall", "Large", 300.0),
            ranked(2, "Board Room", "Small", 120.0),
            ranked(3, "Studio", "Large", 90.0),
        ];
        let figure = top_rooms(&rows);
        assert_eq!(figure["data"].as_array().map(Vec::len), Some(2));
        assert_eq!(
            figure["layout"]["xaxis"]["categoryarray"],
            json!(["Great Hall", "Board Room", "Studio"])
        );
    }

    #[test]
    fn test_top_rooms_repeated_room_gets_distinct_bars() {
        let rows = vec![
            ranked(1, "Great Hall", "Large", 300.0),
            ranked(2, "Great Hall", "Large", 250.0),
            ranked(3, "Studio", "Small", 90.0),
        ];
        let figure = top_rooms(&rows);
        assert_eq!(
            figure["layout"]["xaxis"]["categoryarray"],
            json!(["Great Hall #1", "Great Hall #2", "Studio"])
        );
        assert_eq!(figure["data"][0]["x"], json!(["Great Hall #1", "Great Hall #2"]));
        assert_eq!(figure["data"][0]["y"], json!([300.0, 250.0]));
        assert_eq!(figure["layout"]["barmode"], "relative");
    }

    #[test]
    fn test_scatter_one_trace_per_tier() {
        let points = vec![
            ScatterPoint {
                row_index: 0,
                capacity: 10,
                price_per_hour: 20.0,
                capacity_tier: "Small".to_string(),
                room_name: "A".to_string(),
            },
            ScatterPoint {
                row_index: 1,
                capacity: 12,
                price_per_hour: 25.0,
                capacity_tier: "Small".to_string(),
                room_name: "B".to_string(),
            },
        ];
        let figure = price_vs_capacity(&points);
        assert_eq!(figure["data"][0]["name"], "Small");
        assert_eq!(figure["data"][0]["x"], json!([10, 12]));
    }
}
