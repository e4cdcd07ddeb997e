//! Memoized dataset loading.
//!
//! The loader re-reads the workbook on every call; this cache sits in front of
//! it and reuses the parsed dataset until the file's modification time changes.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use super::aggregates::{cost_divergences, COST_DIVERGENCE_TOLERANCE};
use super::filters::{select, FilterSet};
use crate::config::SourceConfig;
use crate::io::{load_listings, LoadError, LoadResult};
use crate::models::Dataset;

#[derive(Debug, Clone)]
struct CachedDataset {
    modified: Option<SystemTime>,
    dataset: Arc<Dataset>,
}

/// In-memory cache keyed on source settings plus file modification time.
#[derive(Clone, Default)]
pub struct DatasetCache {
    entries: Arc<RwLock<HashMap<SourceConfig, CachedDataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `source`, loading it when absent or stale.
    ///
    /// Failed loads are not cached.
    pub fn get_or_load(&self, source: &SourceConfig) -> LoadResult<Arc<Dataset>> {
        let modified = std::fs::metadata(&source.path)
            .map_err(|e| LoadError::Open {
                path: source.path.clone(),
                source: e,
            })?
            .modified()
            .ok();

        if let Some(entry) = self.entries.read().get(source) {
            if modified.is_some() && entry.modified == modified {
                log::debug!("Dataset cache hit for {}", source.path.display());
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        let dataset = Arc::new(load_listings(source)?);
        report_cost_divergence(&dataset);

        self.entries.write().insert(
            source.clone(),
            CachedDataset {
                modified,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn report_cost_divergence(dataset: &Dataset) {
    let everything = FilterSet::from_dataset(dataset).default_selection();
    let divergent = cost_divergences(&select(dataset, &everything), COST_DIVERGENCE_TOLERANCE);
    if !divergent.is_empty() {
        log::warn!(
            "{} of {} listings have a stored Cost_per_person that differs from Price_per_hour / Capacity",
            divergent.len(),
            dataset.len()
        );
    }
}
