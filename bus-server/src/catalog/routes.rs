//! Route-code table: route display name → canonical code.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::RouteCode;

use super::column_index;
use super::error::CatalogError;

const COL_ROUTE_NAME: &str = "路線名稱";
const COL_ROUTE_CODE: &str = "公車代碼";

/// Preloaded name→code mapping for route display names.
///
/// Display names are the join key between membership sets and this
/// table. A name that is absent, or whose stored code is not a usable
/// route code, resolves to `None` — an expected outcome the matcher
/// branches on, never an error.
#[derive(Debug)]
pub struct RouteCodeTable {
    map: HashMap<String, String>,
}

impl RouteCodeTable {
    /// Load the table from a CSV file with columns `路線名稱,公車代碼`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_csv(&data)
    }

    /// Build the table from CSV text. A leading UTF-8 BOM is tolerated.
    pub fn from_csv(data: &str) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_reader(data.trim_start_matches('\u{feff}').as_bytes());
        let headers = reader.headers()?.clone();
        let name_idx = column_index(&headers, COL_ROUTE_NAME)?;
        let code_idx = column_index(&headers, COL_ROUTE_CODE)?;

        let mut map = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let name = record.get(name_idx).unwrap_or("").trim();
            if name.is_empty() {
                continue;
            }
            let code = record.get(code_idx).unwrap_or("").trim();
            map.insert(name.to_string(), code.to_string());
        }

        Ok(Self { map })
    }

    /// Build the table directly from (name, code) pairs.
    pub fn from_pairs<I, N, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        Self {
            map: pairs
                .into_iter()
                .map(|(n, c)| (n.into(), c.into()))
                .collect(),
        }
    }

    /// Resolve a route display name to its canonical code.
    ///
    /// Returns `None` when the name is not in the table or the stored
    /// code fails validation (placeholder or malformed values).
    pub fn resolve(&self, name: &str) -> Option<RouteCode> {
        self.map
            .get(name.trim())
            .and_then(|code| RouteCode::parse(code).ok())
    }

    /// Number of entries in the table (including unresolvable ones).
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
路線名稱,公車代碼
信義幹線,2
忠孝幹線,10181
敦化幹線,n/a
";

    #[test]
    fn resolves_known_names() {
        let table = RouteCodeTable::from_csv(SAMPLE).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.resolve("信義幹線").unwrap().as_str(), "2");
        assert_eq!(table.resolve("忠孝幹線").unwrap().as_str(), "10181");
    }

    #[test]
    fn absent_name_resolves_to_none() {
        let table = RouteCodeTable::from_csv(SAMPLE).unwrap();
        assert!(table.resolve("不存在的路線").is_none());
    }

    #[test]
    fn malformed_code_resolves_to_none() {
        // The name is present but its code is a placeholder; it must be
        // reported as "code unavailable", not as an unknown route.
        let table = RouteCodeTable::from_csv(SAMPLE).unwrap();
        assert!(table.resolve("敦化幹線").is_none());
    }

    #[test]
    fn tolerates_bom_and_trims_lookup() {
        let data = format!("\u{feff}{SAMPLE}");
        let table = RouteCodeTable::from_csv(&data).unwrap();
        assert_eq!(table.resolve(" 信義幹線 ").unwrap().as_str(), "2");
    }

    #[test]
    fn from_pairs_builds_table() {
        let table = RouteCodeTable::from_pairs([("信義幹線", "2")]);
        assert_eq!(table.resolve("信義幹線").unwrap().as_str(), "2");
        assert!(table.resolve("其他").is_none());
    }

    #[test]
    fn missing_column_is_reported() {
        let err = RouteCodeTable::from_csv("路線名稱\n信義幹線\n").unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn("公車代碼")));
    }
}
