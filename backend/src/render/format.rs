//! Text formatting helpers shared by the page renderers.

/// Shown wherever a mean has no rows to average.
pub const NO_DATA: &str = "No data";

/// `£` amount with two decimals, or [`NO_DATA`].
pub fn format_currency(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("£{:.2}", v),
        None => NO_DATA.to_string(),
    }
}

pub fn format_number(value: f64) -> String {
    format!("{:.2}", value)
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serialize a value for embedding inside a `<script>` element.
pub fn script_json(value: &serde_json::Value) -> String {
    // "<" as a JSON escape, so no "</script>" can appear in the output.
    value.to_string().replace('<', "\\u003c")
}
