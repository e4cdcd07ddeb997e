//! Workbook loading.
//!
//! Turns the configured sheet of the source spreadsheet into a typed
//! [`Dataset`](crate::models::Dataset). Loading is pure apart from the file
//! read; memoization is the caller's business.
//!
//! # Example
//!
//! ```no_run
//! use cch_dashboard::config::SourceConfig;
//! use cch_dashboard::io::ListingLoader;
//!
//! let dataset = ListingLoader::load(&SourceConfig::default()).expect("Failed to load");
//! println!("Loaded {} listings", dataset.len());
//! ```

pub mod error;
pub mod loaders;


pub use error::{LoadError, LoadResult};
pub use loaders::{load_listings, workbook_checksum, ColumnRange, ListingLoader};
