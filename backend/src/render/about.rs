//! About page. Static text, no dataset dependency.

use super::format::escape_html;
use crate::config::SiteSettings;

pub const TITLE: &str = "About This Dataset";

const DATASET_FIELDS: [&str; 9] = [
    "Location",
    "Organisation Name",
    "Room Names",
    "Capacity",
    "Time of Day",
    "Minimum Booking Duration",
    "Price per Hour",
    "Cost per Person",
    "Capacity Tier",
];

const PURPOSE: [&str; 4] = [
    "Compare room prices",
    "Identify value-for-money options",
    "Support event planning",
    "Analyse pricing trends",
];

fn bullet_list(items: &[&str]) -> String {
    let items: String = items.iter().map(|i| format!("<li>{i}</li>\n")).collect();
    format!("<ul>\n{items}</ul>\n")
}

pub fn about_main(site: &SiteSettings) -> String {
    let website = escape_html(&site.website);
    format!(
        "<h1>{TITLE}</h1>\n<h3>Coventry Central Hall Room Hire Dataset</h3>\n<p>This dashboard analyses room hire data from Coventry venue halls.</p>\n<p><strong>Dataset fields include:</strong></p>\n{}<h3>Purpose</h3>\n{}<h3>Official Website for hall hire</h3>\n<p><a href=\"{website}\">{website}</a></p>\n",
        bullet_list(&DATASET_FIELDS),
        bullet_list(&PURPOSE),
    )
}
