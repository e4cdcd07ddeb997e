//! HTTP server module for the dashboard.
//!
//! This module provides an axum-based HTTP server that serves the dashboard
//! pages and a small JSON API over the same service layer.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Session cookie, query and form parsing                 │
//! │  - HTML / JSON responses                                  │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Render + Service Layer                                   │
//! │  - Filtering and aggregation                              │
//! │  - Page rendering                                         │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Loading (io/ + DatasetCache)                             │
//! │  - Workbook parsing                                       │
//! │  - mtime-keyed memoization                                │
//! └──────────────────────────────────────────────────────────┘
//! ```

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub use router::create_router;

#[cfg(feature = "http-server")]
pub use state::AppState;
