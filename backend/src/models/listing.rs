//! Room-hire listing rows and the in-memory dataset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One venue booking-slot listing, as read from the source workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomListing {
    pub organisation_name: String,
    pub time_of_day: String,
    pub location: String,
    pub capacity_tier: String,
    /// Number of people the room holds (always >= 1).
    pub capacity: u32,
    pub price_per_hour: f64,
    /// Stored cost per person. Blank cells load as `None`.
    pub cost_per_person: Option<f64>,
    pub minimum_duration_hours: f64,
    pub room_name: String,
}

impl RoomListing {
    /// Value of one of the four categorical columns.
    pub fn category(&self, column: CategoryColumn) -> &str {
        match column {
            CategoryColumn::OrganisationName => &self.organisation_name,
            CategoryColumn::TimeOfDay => &self.time_of_day,
            CategoryColumn::Location => &self.location,
            CategoryColumn::CapacityTier => &self.capacity_tier,
        }
    }

    /// Price per hour divided by capacity.
    pub fn price_per_person(&self) -> f64 {
        self.price_per_hour / f64::from(self.capacity)
    }
}

/// The categorical columns a user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryColumn {
    OrganisationName,
    TimeOfDay,
    Location,
    CapacityTier,
}

impl CategoryColumn {
    /// All filterable columns, in sidebar order.
    pub const ALL: [CategoryColumn; 4] = [
        CategoryColumn::OrganisationName,
        CategoryColumn::TimeOfDay,
        CategoryColumn::Location,
        CategoryColumn::CapacityTier,
    ];

    /// Query-string key used by the filter form and the JSON API.
    pub fn query_key(self) -> &'static str {
        match self {
            CategoryColumn::OrganisationName => "organisation",
            CategoryColumn::TimeOfDay => "time_of_day",
            CategoryColumn::Location => "location",
            CategoryColumn::CapacityTier => "capacity_tier",
        }
    }

    /// Label shown above the multi-select control.
    pub fn label(self) -> &'static str {
        match self {
            CategoryColumn::OrganisationName => "Select Organisation Name:",
            CategoryColumn::TimeOfDay => "Select Time of day:",
            CategoryColumn::Location => "Select Location:",
            CategoryColumn::CapacityTier => "Select Capacity Tier:",
        }
    }

    /// Header name in the source workbook.
    pub fn header(self) -> &'static str {
        match self {
            CategoryColumn::OrganisationName => "Organisation_Name",
            CategoryColumn::TimeOfDay => "Time_of_day",
            CategoryColumn::Location => "Location",
            CategoryColumn::CapacityTier => "Capacity_tier",
        }
    }
}

impl fmt::Display for CategoryColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for CategoryColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryColumn::ALL
            .into_iter()
            .find(|c| c.query_key() == s)
            .ok_or_else(|| format!("Unknown filter column: {}", s))
    }
}

/// Ordered, immutable collection of listings loaded from one workbook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    rows: Vec<RoomListing>,
    /// SHA-256 of the workbook bytes the rows were read from.
    #[serde(default)]
    pub source_checksum: Option<String>,
}

impl Dataset {
    pub fn new(rows: Vec<RoomListing>) -> Self {
        Self {
            rows,
            source_checksum: None,
        }
    }

    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.source_checksum = Some(checksum.into());
        self
    }

    pub fn rows(&self) -> &[RoomListing] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
