#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use cch_dashboard::config::{DashboardConfig, SourceConfig};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// =========================================================
// Workbook fixtures
// =========================================================

pub const SHEET: &str = "Raw data";

/// Header row in the column order of the stock workbook.
pub const HEADERS: [&str; 10] = [
    "Organisation_Name",
    "Location",
    "Names_of_Room",
    "Capacity",
    "Time_of_day",
    "Minimum_Duration_per_hour",
    "Price_per_hour",
    "Cost_per_person",
    "Capacity_tier",
    "Notes",
];

/// One data row of a fixture workbook.
#[derive(Debug, Clone)]
pub struct FixtureRow {
    pub organisation: String,
    pub location: String,
    pub room: String,
    pub capacity: u32,
    pub time_of_day: String,
    pub minimum_duration: f64,
    pub price_per_hour: f64,
    pub cost_per_person: Option<f64>,
    pub capacity_tier: String,
}

impl FixtureRow {
    pub fn new(organisation: &str, time_of_day: &str, capacity_tier: &str, capacity: u32, price: f64) -> Self {
        Self {
            organisation: organisation.to_string(),
            location: "Coventry".to_string(),
            room: format!("{organisation} {capacity_tier} {time_of_day}"),
            capacity,
            time_of_day: time_of_day.to_string(),
            minimum_duration: 1.0,
            price_per_hour: price,
            cost_per_person: Some(price / capacity as f64),
            capacity_tier: capacity_tier.to_string(),
        }
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn room(mut self, room: &str) -> Self {
        self.room = room.to_string();
        self
    }

    pub fn duration(mut self, hours: f64) -> Self {
        self.minimum_duration = hours;
        self
    }

    pub fn cost(mut self, cost: Option<f64>) -> Self {
        self.cost_per_person = cost;
        self
    }
}

/// The six-listing scenario used across the integration tests.
///
/// Small tier prices are 10, 20 and 30; the Large tier holds 200 and 300.
pub fn scenario_rows() -> Vec<FixtureRow> {
    vec![
        FixtureRow::new("Central Hall", "Day", "Small", 10, 10.0).duration(1.0),
        FixtureRow::new("Central Hall", "Evening", "Small", 10, 20.0).duration(2.0),
        FixtureRow::new("Belgrade", "Day", "Small", 20, 30.0)
            .location("Kenilworth")
            .duration(1.0),
        FixtureRow::new("Belgrade", "Evening", "Large", 100, 200.0).duration(3.0),
        FixtureRow::new("Albany", "Day", "Medium", 50, 75.0).duration(2.0),
        FixtureRow::new("Albany", "Evening", "Large", 150, 300.0)
            .room("Great Hall")
            .duration(4.0),
    ]
}

/// Serialize rows into an xlsx workbook with a single sheet.
pub fn workbook_bytes(sheet_name: &str, rows: &[FixtureRow]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).expect("valid sheet name");
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).expect("write header");
    }
    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, &row.organisation).expect("write cell");
        sheet.write_string(r, 1, &row.location).expect("write cell");
        sheet.write_string(r, 2, &row.room).expect("write cell");
        sheet.write_number(r, 3, row.capacity as f64).expect("write cell");
        sheet.write_string(r, 4, &row.time_of_day).expect("write cell");
        sheet.write_number(r, 5, row.minimum_duration).expect("write cell");
        sheet.write_number(r, 6, row.price_per_hour).expect("write cell");
        if let Some(cost) = row.cost_per_person {
            sheet.write_number(r, 7, cost).expect("write cell");
        }
        sheet.write_string(r, 8, &row.capacity_tier).expect("write cell");
    }
    workbook.save_to_buffer().expect("serialize workbook")
}

/// A workbook written into a temporary directory that lives as long as this value.
pub struct FixtureWorkbook {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl FixtureWorkbook {
    pub fn write(sheet_name: &str, rows: &[FixtureRow]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("CCH1.0.xlsx");
        std::fs::write(&path, workbook_bytes(sheet_name, rows)).expect("write workbook");
        Self { dir, path }
    }

    pub fn scenario() -> Self {
        Self::write(SHEET, &scenario_rows())
    }

    pub fn source(&self) -> SourceConfig {
        SourceConfig {
            path: self.path.clone(),
            ..SourceConfig::default()
        }
    }

    /// Dashboard config pointing at this workbook, with a logo next to it.
    pub fn config(&self) -> DashboardConfig {
        let mut config = DashboardConfig::default();
        config.source = self.source();
        config.site.logo_path = self.dir.path().join("CCH logo.png");
        config
    }

    pub fn write_logo(&self, bytes: &[u8]) {
        std::fs::write(self.dir.path().join("CCH logo.png"), bytes).expect("write logo");
    }
}
