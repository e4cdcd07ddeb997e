//! Server-side HTML rendering.
//!
//! Every function here is pure: it takes the site chrome, the session's page
//! and (for Home) precomputed [`DashboardData`](crate::api::DashboardData),
//! and returns a complete document. Nothing is loaded or aggregated here.

pub mod about;
pub mod charts;
pub mod format;
pub mod home;
pub mod layout;

pub use layout::Chrome;

use crate::api::DashboardData;
use crate::io::LoadError;

/// What the main column shows.
#[derive(Debug, Clone, Copy)]
pub enum PageView<'a> {
    Home(&'a DashboardData),
    About,
}

/// Render the whole document for one page view.
pub fn render_page(chrome: &Chrome<'_>, view: PageView<'_>) -> String {
    match view {
        PageView::Home(data) => {
            let sidebar = format!(
                "{}{}",
                layout::sidebar_logo(chrome),
                home::filter_form(data)
            );
            layout::document(chrome, &sidebar, &home::home_main(data), true)
        }
        PageView::About => layout::document(chrome, "", &about::about_main(chrome.site), false),
    }
}

/// Full page shown instead of the dashboard when the workbook cannot be loaded.
pub fn render_load_error(chrome: &Chrome<'_>, error: &LoadError) -> String {
    let main = format!(
        "<h1>{}</h1>\n<div class=\"error\">\n<p><strong>The room-hire data could not be loaded.</strong></p>\n<p>{}</p>\n<p>Error code: {}</p>\n</div>\n",
        home::TITLE,
        format::escape_html(&error.to_string()),
        error.code()
    );
    layout::document(chrome, "", &main, false)
}
