//! Filter options, user selections and the row selector.
//!
//! Option lists always come from the full dataset, so choosing a value in one
//! filter never narrows the options of another.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::api::{FilterColumnOptions, FilterOptions};
use crate::models::{CategoryColumn, Dataset, RoomListing};

/// Query key marking a submitted filter form.
///
/// Without it every column admits all values; with it, each column admits
/// exactly the values submitted (possibly none).
pub const APPLIED_KEY: &str = "applied";

/// Distinct values of each categorical column, in first-appearance order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    values: BTreeMap<CategoryColumn, Vec<String>>,
}

impl FilterSet {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let values = CategoryColumn::ALL
            .into_iter()
            .map(|column| {
                let mut seen = BTreeSet::new();
                let distinct = dataset
                    .rows()
                    .iter()
                    .map(|row| row.category(column))
                    .filter(|value| seen.insert(*value))
                    .map(str::to_string)
                    .collect();
                (column, distinct)
            })
            .collect();
        Self { values }
    }

    pub fn values(&self, column: CategoryColumn) -> &[String] {
        self.values.get(&column).map(Vec::as_slice).unwrap_or_default()
    }

    /// Selection admitting every value of every column.
    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection {
            admitted: self
                .values
                .iter()
                .map(|(column, values)| (*column, values.iter().cloned().collect()))
                .collect(),
        }
    }

    pub fn to_options(&self) -> FilterOptions {
        FilterOptions {
            columns: CategoryColumn::ALL
                .into_iter()
                .map(|column| FilterColumnOptions {
                    column,
                    label: column.label().to_string(),
                    key: column.query_key().to_string(),
                    values: self.values(column).to_vec(),
                })
                .collect(),
        }
    }
}

/// Admitted values per categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    admitted: BTreeMap<CategoryColumn, BTreeSet<String>>,
}

impl FilterSelection {
    /// Replace the admitted set of one column.
    pub fn with<I, S>(mut self, column: CategoryColumn, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.admitted
            .insert(column, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn admitted(&self, column: CategoryColumn) -> Option<&BTreeSet<String>> {
        self.admitted.get(&column)
    }

    pub fn is_admitted(&self, column: CategoryColumn, value: &str) -> bool {
        self.admitted
            .get(&column)
            .is_some_and(|set| set.contains(value))
    }

    /// True when the row's value in all four columns is admitted.
    pub fn admits(&self, row: &RoomListing) -> bool {
        CategoryColumn::ALL
            .into_iter()
            .all(|column| self.is_admitted(column, row.category(column)))
    }

    /// Build a selection from decoded query pairs.
    ///
    /// Unknown keys are ignored. Values outside the option lists are kept
    /// and simply match nothing.
    pub fn from_query_pairs<I, K, V>(pairs: I, filter_set: &FilterSet) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        if !pairs.iter().any(|(k, _)| k.as_ref() == APPLIED_KEY) {
            return filter_set.default_selection();
        }

        let mut admitted: BTreeMap<CategoryColumn, BTreeSet<String>> = CategoryColumn::ALL
            .into_iter()
            .map(|column| (column, BTreeSet::new()))
            .collect();
        for (key, value) in pairs {
            if let Ok(column) = key.as_ref().parse::<CategoryColumn>() {
                admitted.entry(column).or_default().insert(value.into());
            }
        }
        Self { admitted }
    }

    /// Parse a raw (still percent-encoded) query string.
    pub fn from_query_string(query: &str, filter_set: &FilterSet) -> Self {
        Self::from_query_pairs(url::form_urlencoded::parse(query.as_bytes()), filter_set)
    }

    /// Encode as a query string that [`FilterSelection::from_query_string`] reads back.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer.append_pair(APPLIED_KEY, "1");
        for (column, values) in &self.admitted {
            for value in values {
                serializer.append_pair(column.query_key(), value);
            }
        }
        serializer.finish()
    }
}

/// Rows of a dataset that passed the selection, with their original positions.
#[derive(Debug, Clone)]
pub struct FilteredSubset<'a> {
    rows: Vec<(usize, &'a RoomListing)>,
}

impl<'a> FilteredSubset<'a> {
    /// Indexed rows, in dataset order.
    pub fn rows(&self) -> &[(usize, &'a RoomListing)] {
        &self.rows
    }

    pub fn listings(&self) -> impl Iterator<Item = &'a RoomListing> + '_ {
        self.rows.iter().map(|(_, row)| *row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Keep the rows admitted by `selection`, preserving order.
pub fn select<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredSubset<'a> {
    FilteredSubset {
        rows: dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| selection.admits(row))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(org: &str, time: &str, location: &str, tier: &str) -> RoomListing {
        RoomListing {
            organisation_name: org.to_string(),
            time_of_day: time.to_string(),
            location: location.to_string(),
            capacity_tier: tier.to_string(),
            capacity: 10,
            price_per_hour: 10.0,
            cost_per_person: None,
            minimum_duration_hours: 1.0,
            room_name: format!("{org} room"),
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            listing("Hall", "Evening", "Coventry", "Small"),
            listing("Belgrade", "Day", "Coventry", "Large"),
            listing("Hall", "Day", "Kenilworth", "Small"),
        ])
    }

    #[test]
    fn test_distinct_values_first_appearance_order() {
        let filters = FilterSet::from_dataset(&dataset());
        assert_eq!(filters.values(CategoryColumn::OrganisationName), ["Hall", "Belgrade"]);
        assert_eq!(filters.values(CategoryColumn::TimeOfDay), ["Evening", "Day"]);
        assert_eq!(filters.values(CategoryColumn::Location), ["Coventry", "Kenilworth"]);
        assert_eq!(filters.values(CategoryColumn::CapacityTier), ["Small", "Large"]);
    }

    #[test]
    fn test_default_selection_admits_everything() {
        let data = dataset();
        let filters = FilterSet::from_dataset(&data);
        let subset = select(&data, &filters.default_selection());
        assert_eq!(subset.len(), 3);
    }

    #[test]
    fn test_select_conjunction_keeps_original_index() {
        let data = dataset();
        let selection = FilterSet::from_dataset(&data)
            .default_selection()
            .with(CategoryColumn::TimeOfDay, ["Day"])
            .with(CategoryColumn::CapacityTier, ["Small"]);
        let subset = select(&data, &selection);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset.rows()[0].0, 2);
        assert_eq!(subset.rows()[0].1.location, "Kenilworth");
    }

    #[test]
    fn test_empty_column_selection_matches_nothing() {
        let data = dataset();
        let selection = FilterSet::from_dataset(&data)
            .default_selection()
            .with(CategoryColumn::Location, Vec::<String>::new());
        assert!(select(&data, &selection).is_empty());
    }

    #[test]
    fn test_unknown_value_is_inert() {
        let data = dataset();
        let selection = FilterSet::from_dataset(&data)
            .default_selection()
            .with(CategoryColumn::OrganisationName, ["Hall", "Nowhere"]);
        assert_eq!(select(&data, &selection).len(), 2);
    }

    #[test]
    fn test_query_without_marker_uses_defaults() {
        let filters = FilterSet::from_dataset(&dataset());
        let selection = FilterSelection::from_query_string("location=Kenilworth", &filters);
        assert_eq!(selection, filters.default_selection());
    }

    #[test]
    fn test_query_with_marker() {
        let data = dataset();
        let filters = FilterSet::from_dataset(&data);
        let selection = FilterSelection::from_query_string(
            "applied=1&organisation=Hall&organisation=Belgrade&time_of_day=Day&location=Coventry&capacity_tier=Large&bogus=x",
            &filters,
        );
        assert!(selection.is_admitted(CategoryColumn::OrganisationName, "Belgrade"));
        let subset = select(&data, &selection);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset.rows()[0].0, 1);
    }

    #[test]
    fn test_query_with_marker_and_missing_column_is_empty() {
        let data = dataset();
        let filters = FilterSet::from_dataset(&data);
        let selection = FilterSelection::from_query_string("applied=1&organisation=Hall", &filters);
        assert_eq!(selection.admitted(CategoryColumn::Location).map(|s| s.len()), Some(0));
        assert!(select(&data, &selection).is_empty());
    }

    #[test]
    fn test_query_string_round_trip_with_spaces() {
        let data = Dataset::new(vec![listing("Central Hall", "Late evening", "Coventry", "Extra large")]);
        let filters = FilterSet::from_dataset(&data);
        let selection = filters.default_selection();
        let query = selection.to_query_string();
        assert_eq!(FilterSelection::from_query_string(&query, &filters), selection);
    }
}
