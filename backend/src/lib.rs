//! # CCH Dashboard Backend
//!
//! Room-hire price analytics for Coventry Central Hall.
//!
//! This crate loads the venue's room listings from a spreadsheet, lets the
//! user narrow them with four categorical filters and serves the resulting
//! metrics, charts and tables as an HTML dashboard via Axum.
//!
//! ## Features
//!
//! - **Data Loading**: Read a bounded column/row range of one worksheet into typed listings
//! - **Filtering**: Multi-select filters on organisation, time of day, location and capacity tier
//! - **Aggregation**: Headline means, grouped means, a cost-per-person pivot and rankings
//! - **Rendering**: Server-rendered pages with Plotly figures
//! - **HTTP API**: JSON endpoints for the same data
//!
//! ## Architecture
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`config`]: Deployment settings (source workbook, bind address, site text)
//! - [`io`]: Workbook loading and load errors
//! - [`models`]: Domain types for listings and the dataset
//! - [`services`]: Filtering, aggregation, caching and navigation
//! - [`render`]: HTML for the Home and About pages
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific data types

pub mod api;

pub mod config;
pub mod io;
pub mod models;

pub mod render;
pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
