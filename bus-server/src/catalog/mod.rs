//! Preloaded lookup tables.
//!
//! Two CSV tables are loaded once, before any query: the stop catalog
//! (display name → candidate stop poles) and the route-code table
//! (route display name → canonical code). Neither is refreshed at
//! runtime; queries only read them.

mod error;
mod routes;
mod stops;

pub use error::{CatalogError, LookupError};
pub use routes::RouteCodeTable;
pub use stops::StopCatalog;

/// Index of a named column in a CSV header row.
pub(crate) fn column_index(
    headers: &csv::StringRecord,
    name: &'static str,
) -> Result<usize, CatalogError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(CatalogError::MissingColumn(name))
}
