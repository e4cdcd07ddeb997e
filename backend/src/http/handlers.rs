//! HTTP handlers for the dashboard pages and the JSON API.
//!
//! Each handler corresponds to a route and delegates to the service layer
//! for business logic and to [`crate::render`] for HTML.

use axum::{
    extract::{rejection::FormRejection, Form, RawQuery, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use std::path::Path;
use uuid::Uuid;

use super::dto::{DashboardData, FilterOptions, HealthResponse, NavigateForm};
use super::error::AppError;
use super::state::AppState;
use crate::render::{render_load_error, render_page, Chrome, PageView};
use crate::routes::pages::INDEX;
use crate::services::{get_dashboard_data, FilterSet, Page};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Cookie holding the session id.
pub const SESSION_COOKIE: &str = "cch_session";

/// Session id from the request's `Cookie` headers, if present and well-formed.
pub fn session_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

fn with_session_cookie(mut response: Response, session_id: Uuid) -> Result<Response, AppError> {
    let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
    let value = HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("Invalid session cookie: {}", e)))?;
    response.headers_mut().insert(header::SET_COOKIE, value);
    Ok(response)
}

fn join_error(e: tokio::task::JoinError) -> AppError {
    AppError::Internal(format!("Task join error: {}", e))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the workbook exists.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let source = if state.config.source.path.is_file() {
        "present"
    } else {
        "missing"
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        source: source.to_string(),
        sessions: state.sessions.len(),
        cached_datasets: state.datasets.len(),
    }))
}

// =============================================================================
// Pages
// =============================================================================

fn render_index(state: &AppState, page: Page, query: Option<&str>) -> (StatusCode, String) {
    let site = &state.config.site;
    let chrome = Chrome {
        site,
        logo_available: site.logo_path.is_file(),
    };

    match page {
        Page::About => (StatusCode::OK, render_page(&chrome, PageView::About)),
        Page::Home => match get_dashboard_data(&state.datasets, &state.config.source, query) {
            Ok(data) => (StatusCode::OK, render_page(&chrome, PageView::Home(&data))),
            Err(e) => {
                tracing::error!("Failed to load dashboard data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    render_load_error(&chrome, &e),
                )
            }
        },
    }
}

/// GET /
///
/// Render the session's current page. Filter selections arrive as query
/// parameters; a new session cookie is issued when none is presented.
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let session = state.sessions.resolve(session_from_headers(&headers));

    let (status, html) =
        tokio::task::spawn_blocking(move || render_index(&state, session.page, query.as_deref()))
            .await
            .map_err(join_error)?;

    let response = (status, Html(html)).into_response();
    if session.is_new {
        with_session_cookie(response, session.session_id)
    } else {
        Ok(response)
    }
}

/// POST /navigate
///
/// Sidebar Home / About buttons. Updates the session's page and redirects
/// back to the index, which re-renders at the new page. A cookie the store
/// does not know (never issued, or expired) is replaced by a fresh session.
pub async fn navigate(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<NavigateForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let page: Page = form.page.parse().map_err(AppError::BadRequest)?;

    let session = state.sessions.navigate(session_from_headers(&headers), page);

    let response = Redirect::to(INDEX).into_response();
    if session.is_new {
        with_session_cookie(response, session.session_id)
    } else {
        Ok(response)
    }
}

fn image_content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// GET /assets/logo
///
/// Serve the configured logo. A missing logo is a 404, not a startup failure.
pub async fn logo(State(state): State<AppState>) -> Result<Response, AppError> {
    let path = state.config.site.logo_path.clone();
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, image_content_type(&path))], bytes).into_response()),
        Err(e) => {
            tracing::warn!("Logo {} unavailable: {}", path.display(), e);
            Err(AppError::NotFound(format!("Logo not found: {}", path.display())))
        }
    }
}

// =============================================================================
// JSON API
// =============================================================================

/// GET /v1/filters
///
/// Distinct values of the four filter columns, from the full dataset.
pub async fn get_filter_options(State(state): State<AppState>) -> HandlerResult<FilterOptions> {
    let options = tokio::task::spawn_blocking(move || {
        state
            .datasets
            .get_or_load(&state.config.source)
            .map(|dataset| FilterSet::from_dataset(&dataset).to_options())
    })
    .await
    .map_err(join_error)??;

    Ok(Json(options))
}

/// GET /v1/dashboard
///
/// Every Home page aggregate for the selection in the query string.
pub async fn get_dashboard(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> HandlerResult<DashboardData> {
    let data = tokio::task::spawn_blocking(move || {
        get_dashboard_data(&state.datasets, &state.config.source, query.as_deref())
    })
    .await
    .map_err(join_error)??;

    Ok(Json(data))
}
