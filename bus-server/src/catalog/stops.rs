//! Stop catalog: display name → candidate stop poles.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{Stop, StopId};

use super::column_index;
use super::error::{CatalogError, LookupError};

const COL_NAME: &str = "站名";
const COL_STOP_ID: &str = "站牌ID";
const COL_LAT: &str = "lat";
const COL_LON: &str = "lon";

/// Catalog of all known stop poles, grouped by display name.
///
/// A display name maps to one or more physical stop poles; resolution
/// is a pure enumeration service. When a name is ambiguous the caller
/// must pick exactly one candidate via [`StopCatalog::select`] — the
/// catalog performs no heuristic disambiguation.
#[derive(Debug)]
pub struct StopCatalog {
    by_name: HashMap<String, Vec<Stop>>,
    total: usize,
}

impl StopCatalog {
    /// Load the catalog from a CSV file.
    ///
    /// Expected columns (any order, header row required):
    /// `站名`, `站牌ID`, `lat`, `lon`. A leading UTF-8 BOM is tolerated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_csv(&data)
    }

    /// Build the catalog from CSV text.
    ///
    /// Rows sharing a display name accumulate as candidates in catalog
    /// order; duplicate stop ids within one name are dropped.
    pub fn from_csv(data: &str) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_reader(data.trim_start_matches('\u{feff}').as_bytes());
        let headers = reader.headers()?.clone();
        let name_idx = column_index(&headers, COL_NAME)?;
        let id_idx = column_index(&headers, COL_STOP_ID)?;
        let lat_idx = column_index(&headers, COL_LAT)?;
        let lon_idx = column_index(&headers, COL_LON)?;

        let mut by_name: HashMap<String, Vec<Stop>> = HashMap::new();
        let mut total = 0;

        for (row, record) in reader.records().enumerate() {
            let record = record?;
            // Header is row 1, so data rows start at 2.
            let row = row + 2;

            let name = record.get(name_idx).unwrap_or("").trim();
            if name.is_empty() {
                continue;
            }

            let id = StopId::parse(record.get(id_idx).unwrap_or("").trim()).map_err(|e| {
                CatalogError::BadRow {
                    row,
                    message: e.to_string(),
                }
            })?;
            let latitude = parse_coord(&record, lat_idx, row)?;
            let longitude = parse_coord(&record, lon_idx, row)?;

            let candidates = by_name.entry(name.to_string()).or_default();
            if candidates.iter().any(|s| s.id == id) {
                continue;
            }
            candidates.push(Stop {
                id,
                name: name.to_string(),
                latitude,
                longitude,
            });
            total += 1;
        }

        Ok(Self { by_name, total })
    }

    /// All candidate stop poles sharing a display name, in catalog order.
    ///
    /// The name is whitespace-trimmed before matching. An empty result
    /// is reported as [`LookupError::UnknownStopName`]; no fetch should
    /// be attempted for such a name.
    pub fn candidates(&self, name: &str) -> Result<&[Stop], LookupError> {
        let name = name.trim();
        self.by_name
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::UnknownStopName(name.to_string()))
    }

    /// Second step of the disambiguation contract: pick one candidate
    /// by its 1-based position in the [`StopCatalog::candidates`] list.
    pub fn select(&self, name: &str, choice: usize) -> Result<&Stop, LookupError> {
        let candidates = self.candidates(name)?;
        if choice == 0 || choice > candidates.len() {
            return Err(LookupError::ChoiceOutOfRange {
                choice,
                count: candidates.len(),
            });
        }
        Ok(&candidates[choice - 1])
    }

    /// Total number of stop poles in the catalog.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct display names.
    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }
}

fn parse_coord(
    record: &csv::StringRecord,
    idx: usize,
    row: usize,
) -> Result<f64, CatalogError> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse().map_err(|_| CatalogError::BadRow {
        row,
        message: format!("bad coordinate {raw:?}"),
    })
}
