// =========================================================
// HTML page routes
// =========================================================

/// Route path for the dashboard page (Home or About, per session)
pub const INDEX: &str = "/";

/// Route path for the sidebar navigation buttons
pub const NAVIGATE: &str = "/navigate";

/// Route path for the logo image (favicon and sidebar)
pub const LOGO_ASSET: &str = "/assets/logo";

/// Route path for the health check
pub const HEALTH: &str = "/health";
