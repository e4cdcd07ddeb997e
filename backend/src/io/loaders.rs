use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::ops::RangeInclusive;
use std::path::Path;

use super::error::{LoadError, LoadResult};
use crate::config::SourceConfig;
use crate::models::{CategoryColumn, Dataset, RoomListing};

/// Inclusive, zero-based column span parsed from a range such as `A:J`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub first: u32,
    pub last: u32,
}

impl ColumnRange {
    /// Parse `A:J` style ranges. Letters are case-insensitive and a single
    /// column (`C`) is accepted as `C:C`.
    pub fn parse(range: &str) -> LoadResult<Self> {
        let invalid = |reason: &str| LoadError::InvalidColumnRange {
            range: range.to_string(),
            reason: reason.to_string(),
        };

        let (start, end) = match range.split_once(':') {
            Some((start, end)) => (start.trim(), end.trim()),
            None => (range.trim(), range.trim()),
        };
        let first = column_index(start).ok_or_else(|| invalid("start is not a column letter"))?;
        let last = column_index(end).ok_or_else(|| invalid("end is not a column letter"))?;
        if first > last {
            return Err(invalid("start column is after end column"));
        }
        Ok(Self { first, last })
    }

    /// Zero-based indices of every column in the span.
    pub fn columns(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }
}

/// `A` -> 0, `Z` -> 25, `AA` -> 26.
fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    letters.chars().try_fold(0u32, |acc, c| {
        let c = c.to_ascii_uppercase();
        c.is_ascii_uppercase()
            .then(|| acc * 26 + (c as u32 - 'A' as u32 + 1))
    })
    .map(|n| n - 1)
}

/// Source columns the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Category(CategoryColumn),
    Capacity,
    PricePerHour,
    CostPerPerson,
    MinimumDuration,
    RoomName,
}

impl Field {
    const ALL: [Field; 9] = [
        Field::Category(CategoryColumn::OrganisationName),
        Field::Category(CategoryColumn::TimeOfDay),
        Field::Category(CategoryColumn::Location),
        Field::Category(CategoryColumn::CapacityTier),
        Field::Capacity,
        Field::PricePerHour,
        Field::CostPerPerson,
        Field::MinimumDuration,
        Field::RoomName,
    ];

    fn header(self) -> &'static str {
        match self {
            Field::Category(column) => column.header(),
            Field::Capacity => "Capacity",
            Field::PricePerHour => "Price_per_hour",
            Field::CostPerPerson => "Cost_per_person",
            Field::MinimumDuration => "Minimum_Duration_per_hour",
            Field::RoomName => "Names_of_Room",
        }
    }
}

/// Header text compared case-insensitively, with spaces read as underscores.
fn normalize_header(raw: &str) -> String {
    raw.trim().replace(' ', "_").to_ascii_lowercase()
}

/// Absolute column index of each field in the sheet.
struct ColumnMap {
    columns: [u32; 9],
}

impl ColumnMap {
    fn resolve(range: &Range<Data>, header_row: u32, span: ColumnRange, raw_range: &str) -> LoadResult<Self> {
        let mut columns = [0u32; 9];
        for (slot, field) in columns.iter_mut().zip(Field::ALL) {
            let wanted = normalize_header(field.header());
            *slot = span
                .columns()
                .find(|&col| {
                    range
                        .get_value((header_row, col))
                        .and_then(cell_text)
                        .map(|text| normalize_header(&text) == wanted)
                        .unwrap_or(false)
                })
                .ok_or_else(|| LoadError::MissingColumn {
                    column: field.header(),
                    range: raw_range.to_string(),
                })?;
        }
        Ok(Self { columns })
    }

    fn column(&self, field: Field) -> u32 {
        let idx = Field::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default();
        self.columns[idx]
    }
}

/// Text content of a cell, `None` when blank.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(n) => {
            // Integral floats print without decimals
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Numeric content of a cell. `Ok(None)` when blank, `Err(raw)` when not a number.
///
/// Text cells are accepted when they hold a number, optionally with a `£`
/// prefix or thousands separators.
fn cell_number(cell: &Data) -> Result<Option<f64>, String> {
    match cell {
        Data::Empty => Ok(None),
        Data::Float(n) => Ok(Some(*n)),
        Data::Int(n) => Ok(Some(*n as f64)),
        Data::DateTime(dt) => Ok(Some(dt.as_f64())),
        Data::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_start_matches('£')
                .chars()
                .filter(|c| *c != ',')
                .collect();
            if cleaned.trim().is_empty() {
                return Ok(None);
            }
            cleaned
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Some)
                .ok_or_else(|| s.clone())
        }
        other => Err(cell_text(other).unwrap_or_default()),
    }
}

/// SHA-256 of the workbook bytes, hex encoded.
pub fn workbook_checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Reads room-hire listings from an Excel (or ODS) workbook.
pub struct ListingLoader;

impl ListingLoader {
    /// Load the first `max_rows` data rows of the configured sheet.
    ///
    /// The loader never caches; see [`crate::services::DatasetCache`].
    pub fn load(source: &SourceConfig) -> LoadResult<Dataset> {
        let bytes = std::fs::read(&source.path).map_err(|e| LoadError::Open {
            path: source.path.clone(),
            source: e,
        })?;
        let dataset = Self::load_from_bytes(bytes, &source.path, source)?;
        log::info!(
            "Loaded {} listings from {} (sheet '{}', columns {})",
            dataset.len(),
            source.path.display(),
            source.sheet,
            source.columns
        );
        Ok(dataset)
    }

    /// Parse a workbook that is already in memory. `path` is only used in errors.
    pub fn load_from_bytes(bytes: Vec<u8>, path: &Path, source: &SourceConfig) -> LoadResult<Dataset> {
        let span = ColumnRange::parse(&source.columns)?;
        let checksum = workbook_checksum(&bytes);

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
            LoadError::Workbook {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        let available = workbook.sheet_names();
        if !available.iter().any(|name| name == &source.sheet) {
            return Err(LoadError::SheetNotFound {
                sheet: source.sheet.clone(),
                available,
            });
        }

        let range = workbook
            .worksheet_range(&source.sheet)
            .map_err(|e| LoadError::Workbook {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let rows = read_rows(&range, span, source)?;
        Ok(Dataset::new(rows).with_checksum(checksum))
    }
}

fn read_rows(range: &Range<Data>, span: ColumnRange, source: &SourceConfig) -> LoadResult<Vec<RoomListing>> {
    // The first used row of the sheet is the header.
    let (header_row, end_row) = match (range.start(), range.end()) {
        (Some((start, _)), Some((end, _))) => (start, end),
        _ => {
            return Err(LoadError::MissingColumn {
                column: Field::ALL[0].header(),
                range: source.columns.clone(),
            })
        }
    };
    let columns = ColumnMap::resolve(range, header_row, span, &source.columns)?;

    let mut rows = Vec::new();
    for row in (header_row + 1..=end_row).take(source.max_rows) {
        let is_blank = span
            .columns()
            .all(|col| range.get_value((row, col)).and_then(cell_text).is_none());
        if is_blank {
            log::debug!("Skipping blank row {}", row + 1);
            continue;
        }
        rows.push(read_listing(range, row, &columns)?);
    }
    Ok(rows)
}

fn read_listing(range: &Range<Data>, row: u32, columns: &ColumnMap) -> LoadResult<RoomListing> {
    let sheet_row = row + 1;
    let cell = |field: Field| range.get_value((row, columns.column(field))).unwrap_or(&Data::Empty);

    let text = |field: Field| -> LoadResult<String> {
        cell_text(cell(field)).ok_or(LoadError::MissingValue {
            row: sheet_row,
            column: field.header(),
        })
    };
    let optional_number = |field: Field| -> LoadResult<Option<f64>> {
        cell_number(cell(field)).map_err(|value| LoadError::InvalidValue {
            row: sheet_row,
            column: field.header(),
            value,
        })
    };
    let number = |field: Field| -> LoadResult<f64> {
        optional_number(field)?.ok_or(LoadError::MissingValue {
            row: sheet_row,
            column: field.header(),
        })
    };

    let capacity_raw = number(Field::Capacity)?;
    if capacity_raw < 1.0 || capacity_raw.fract() != 0.0 || capacity_raw > f64::from(u32::MAX) {
        return Err(LoadError::InvalidValue {
            row: sheet_row,
            column: Field::Capacity.header(),
            value: capacity_raw.to_string(),
        });
    }

    Ok(RoomListing {
        organisation_name: text(Field::Category(CategoryColumn::OrganisationName))?,
        time_of_day: text(Field::Category(CategoryColumn::TimeOfDay))?,
        location: text(Field::Category(CategoryColumn::Location))?,
        capacity_tier: text(Field::Category(CategoryColumn::CapacityTier))?,
        capacity: capacity_raw as u32,
        price_per_hour: number(Field::PricePerHour)?,
        cost_per_person: optional_number(Field::CostPerPerson)?,
        minimum_duration_hours: number(Field::MinimumDuration)?,
        room_name: cell_text(cell(Field::RoomName)).unwrap_or_default(),
    })
}

/// Load the listings described by `source`.
pub fn load_listings(source: &SourceConfig) -> LoadResult<Dataset> {
    ListingLoader::load(source)
}
