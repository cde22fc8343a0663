//! Source seam for live transit data.

use std::collections::BTreeSet;
use std::future::Future;

use crate::domain::{DirectedSequences, RouteCode, StopId};

/// Error from a transit-data fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The fetch failed outright: network error, error status, or a
    /// payload that could not be parsed into the expected structure.
    #[error("{0}")]
    Fetch(String),

    /// The stop-list data did not materialise within the readiness
    /// window. The route could not be verified.
    #[error("stop list did not load within {0}s")]
    Timeout(u64),
}

/// Provider of live membership and stop-sequence data.
///
/// This abstraction allows the matcher to be tested with mock data.
/// Futures are `Send` so the matcher can run inside the web handlers.
pub trait TransitSource {
    /// The set of route display names serving a stop. One fetch per
    /// stop id; on failure the whole set is withheld, never a partial
    /// one.
    fn routes_for_stop(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<BTreeSet<String>, SourceError>> + Send;

    /// Both directed stop sequences for a route code.
    fn directed_sequences(
        &self,
        route: &RouteCode,
    ) -> impl Future<Output = Result<DirectedSequences, SourceError>> + Send;
}
