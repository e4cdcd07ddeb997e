//! Page shell: head, navigation sidebar and footer.

use super::format::escape_html;
use crate::config::SiteSettings;
use crate::routes::pages::{LOGO_ASSET, NAVIGATE};
use crate::services::navigation::Page;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body { margin: 0; font-family: "Source Sans Pro", Arial, sans-serif; color: #0c0230; }
.app { display: flex; min-height: 100vh; }
.sidebar { width: 280px; padding: 1.5rem 1rem 4rem; background: #f0f2f6; box-sizing: border-box; }
.sidebar h3 { margin-top: 0; }
.sidebar form.nav button { width: 100%; margin-bottom: .5rem; padding: .4rem; }
.sidebar fieldset { border: none; padding: 0; margin: 0 0 1rem; }
.sidebar legend { font-weight: 600; margin-bottom: .3rem; }
.sidebar label { display: block; }
.main { flex: 1; padding: 2rem 2rem 5rem; }
.metrics { display: flex; gap: 2rem; }
.metric { flex: 1; }
.metric .label { font-size: .9rem; }
.metric .value { font-size: 2rem; min-height: 2.4rem; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid #d0d3da; padding: .3rem .8rem; text-align: left; }
.chart { width: 100%; min-height: 420px; }
.notice { background: #fff4e5; border-left: 4px solid #f0a030; padding: .6rem 1rem; }
.error { background: #fdecea; border-left: 4px solid #d93025; padding: 1rem; }
.footer { position: fixed; left: 0; bottom: 0; width: 100%; background-color: #0c0230; color: #fff; text-align: center; padding: 10px; font-size: 14px; }
"#;

/// Site-wide inputs to every page.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub site: &'a SiteSettings,
    /// Whether the logo asset can be served.
    pub logo_available: bool,
}

fn nav_button(page: Page) -> String {
    format!(
        "<form class=\"nav\" method=\"post\" action=\"{NAVIGATE}\"><input type=\"hidden\" name=\"page\" value=\"{}\"><button type=\"submit\">{}</button></form>\n",
        page.as_str(),
        page.button_label()
    )
}

fn sidebar(extra: &str) -> String {
    format!(
        "<aside class=\"sidebar\">\n<h3>Navigation</h3>\n{}{}<hr>\n{}</aside>\n",
        nav_button(Page::Home),
        nav_button(Page::About),
        extra
    )
}

pub fn sidebar_logo(chrome: &Chrome<'_>) -> String {
    if chrome.logo_available {
        format!(
            "<img class=\"logo\" src=\"{LOGO_ASSET}\" alt=\"{}\" width=\"150\">\n",
            escape_html(&chrome.site.title)
        )
    } else {
        String::new()
    }
}

pub fn footer(site: &SiteSettings) -> String {
    format!(
        "<div class=\"footer\">Developed by {} &copy; 2026 CCH Data Visualization</div>\n",
        escape_html(&site.author)
    )
}

/// Full HTML document around `sidebar_extra` and `main`.
///
/// The Plotly script is only pulled in when `with_charts` is set.
pub fn document(chrome: &Chrome<'_>, sidebar_extra: &str, main: &str, with_charts: bool) -> String {
    let mut head = format!(
        "<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{}</title>\n",
        escape_html(&chrome.site.title)
    );
    if chrome.logo_available {
        head.push_str(&format!("<link rel=\"icon\" href=\"{LOGO_ASSET}\">\n"));
    }
    if with_charts {
        head.push_str(&format!("<script src=\"{PLOTLY_CDN}\" charset=\"utf-8\"></script>\n"));
    }
    head.push_str(&format!("<style>{STYLE}</style>\n"));

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n{head}</head>\n<body>\n<div class=\"app\">\n{}<main class=\"main\">\n{main}</main>\n</div>\n{}</body>\n</html>\n",
        sidebar(sidebar_extra),
        footer(chrome.site),
    )
}
