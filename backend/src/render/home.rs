//! Home page: filter sidebar, headline metrics, tables and charts.

use super::charts::{chart_html, home_charts};
use super::format::{escape_html, format_currency, format_number};
use crate::api::{CostDivergence, DashboardData, DescriptiveStats, FilterColumnOptions};
use crate::routes::pages::INDEX;
use crate::services::filters::APPLIED_KEY;

pub const TITLE: &str = "CCH Data Visualization Dashboard";

const TIME_OF_DAY_FINDINGS: [&str; 2] = [
    "Evening prices are higher than daytime.",
    "Day bookings offer better value.",
];

const CAPACITY_TIER_FINDINGS: [&str; 2] = [
    "Larger rooms cost more per hour.",
    "Smaller rooms suit low-budget events.",
];

fn filter_group(data: &DashboardData, options: &FilterColumnOptions) -> String {
    let mut html = format!(
        "<fieldset>\n<legend>{}</legend>\n",
        escape_html(&options.label)
    );
    for value in &options.values {
        let checked = if data.selection.is_admitted(options.column, value) {
            " checked"
        } else {
            ""
        };
        html.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"{}\" value=\"{}\"{checked}> {}</label>\n",
            escape_html(&options.key),
            escape_html(value),
            escape_html(value),
        ));
    }
    html.push_str("</fieldset>\n");
    html
}

/// "Filter Here:" form; submits as a GET to the index with the applied marker.
pub fn filter_form(data: &DashboardData) -> String {
    let mut html = format!(
        "<h2>Filter Here:</h2>\n<form class=\"filters\" method=\"get\" action=\"{INDEX}\">\n<input type=\"hidden\" name=\"{APPLIED_KEY}\" value=\"1\">\n"
    );
    for options in &data.filters.columns {
        html.push_str(&filter_group(data, options));
    }
    html.push_str("<button type=\"submit\">Apply filters</button>\n</form>\n");
    html
}

fn metric(label: &str, value: &str) -> String {
    format!(
        "<div class=\"metric\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
        escape_html(label),
        escape_html(value)
    )
}

fn metrics(data: &DashboardData) -> String {
    format!(
        "<section class=\"metrics\">\n{}{}{}</section>\n<p class=\"count\">Showing {} of {} listings</p>\n",
        metric("Average Price per Room by Tier", ""),
        metric(
            "Average Price per Person",
            &format_currency(data.metrics.avg_price_per_person)
        ),
        metric(
            "Average Price per Hour",
            &format_currency(data.metrics.avg_price_per_hour)
        ),
        data.metrics.filtered_count,
        data.metrics.total_count,
    )
}

fn tier_table(data: &DashboardData) -> String {
    let mut html = String::from(
        "<table class=\"tier-table\">\n<thead><tr><th>Capacity_tier</th><th>Average Price (£)</th></tr></thead>\n<tbody>\n",
    );
    for group in &data.price_by_tier {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(&group.key),
            format_number(group.mean)
        ));
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

fn findings(points: &[&str]) -> String {
    let items: String = points
        .iter()
        .map(|p| format!("<li>{}</li>", escape_html(p)))
        .collect();
    format!("<div class=\"findings\"><strong>Findings:</strong><ul>{items}</ul></div>\n")
}

fn stats_row(name: &str, stats: Option<&DescriptiveStats>) -> String {
    match stats {
        Some(s) => format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            name,
            s.count,
            format_number(s.mean),
            format_number(s.median),
            format_number(s.std_dev),
            format_number(s.min),
            format_number(s.max)
        ),
        None => format!("<tr><td>{name}</td><td colspan=\"6\">No data</td></tr>\n"),
    }
}

fn stats_table(data: &DashboardData) -> String {
    let stats = &data.stats;
    format!(
        "<h3>Summary statistics</h3>\n<table class=\"stats\">\n<thead><tr><th>Column</th><th>Count</th><th>Mean</th><th>Median</th><th>Std dev</th><th>Min</th><th>Max</th></tr></thead>\n<tbody>\n{}{}{}</tbody>\n</table>\n",
        stats_row("Price_per_hour", stats.price_per_hour.as_ref()),
        stats_row("Capacity", stats.capacity.as_ref()),
        stats_row("Cost_per_person", stats.cost_per_person.as_ref()),
    )
}

fn divergence_notice(divergences: &[CostDivergence]) -> String {
    if divergences.is_empty() {
        return String::new();
    }
    let mut html = format!(
        "<div class=\"notice\">\n<p>{} listing(s) have a stored Cost per Person that differs from Price per Hour / Capacity. The stored value is shown in the heatmap.</p>\n<table>\n<thead><tr><th>Room</th><th>Stored</th><th>Price / Capacity</th></tr></thead>\n<tbody>\n",
        divergences.len()
    );
    for d in divergences {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&d.room_name),
            format_currency(Some(d.stored)),
            format_currency(Some(d.derived))
        ));
    }
    html.push_str("</tbody>\n</table>\n</div>\n");
    html
}

/// Main column of the Home page.
pub fn home_main(data: &DashboardData) -> String {
    let charts = home_charts(data);
    let mut html = format!("<h1>{TITLE}</h1>\n");
    html.push_str(&metrics(data));
    html.push_str(&tier_table(data));
    html.push_str("<hr>\n");

    for (i, chart) in charts.iter().enumerate() {
        html.push_str(&chart_html(chart));
        match i {
            0 => html.push_str(&findings(&TIME_OF_DAY_FINDINGS)),
            1 => html.push_str(&findings(&CAPACITY_TIER_FINDINGS)),
            2 => html.push_str(&divergence_notice(&data.cost_divergences)),
            _ => {}
        }
    }

    html.push_str(&stats_table(data));
    html
}
