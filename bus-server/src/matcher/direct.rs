//! Direct-route resolution.
//!
//! Finds every route that serves both the origin and the destination
//! stop in a single consistent traversal, with a live arrival
//! annotation for the origin and a renderable segment per match.

use futures::future::join_all;
use tracing::debug;

use crate::catalog::RouteCodeTable;
use crate::domain::{Direction, DirectedStopEntry, StopId};

use super::report::{DirectRouteReport, MatchResult, PathPoint, RouteOutcome};
use super::source::TransitSource;

/// Error from direct-route matching.
///
/// Only membership failures are fatal: both stops' membership sets are
/// required before anything can be intersected. Everything scoped to a
/// single candidate route is reported as a tagged outcome instead.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MatchError {
    /// The membership page for one of the stops could not be fetched.
    #[error("failed to fetch routes for stop {stop}: {message}")]
    MembershipFetch { stop: StopId, message: String },
}

/// A resolved point-to-point query.
///
/// Stop ids drive the membership fetches; display names drive the
/// positional lookups within stop sequences.
#[derive(Debug, Clone)]
pub struct DirectQuery {
    pub origin_id: StopId,
    pub destination_id: StopId,
    pub origin_name: String,
    pub destination_name: String,
}

/// The orchestration core: intersects membership sets, resolves codes,
/// fetches directed sequences and picks the valid direction per
/// candidate route.
///
/// Single-shot query semantics: no retries, no caching across queries.
pub struct DirectRouteMatcher<'a, S: TransitSource> {
    source: &'a S,
    codes: &'a RouteCodeTable,
}

impl<'a, S: TransitSource> DirectRouteMatcher<'a, S> {
    pub fn new(source: &'a S, codes: &'a RouteCodeTable) -> Self {
        Self { source, codes }
    }

    /// Run one direct-route query.
    ///
    /// Returns `NoDirectRoute` when the membership sets are disjoint
    /// (without issuing any code resolution or sequence fetch), or one
    /// tagged outcome per candidate route in enumeration order.
    pub async fn find_direct_routes(
        &self,
        query: &DirectQuery,
    ) -> Result<DirectRouteReport, MatchError> {
        let (origin_routes, destination_routes) = tokio::join!(
            self.source.routes_for_stop(&query.origin_id),
            self.source.routes_for_stop(&query.destination_id),
        );
        let origin_routes = origin_routes.map_err(|e| MatchError::MembershipFetch {
            stop: query.origin_id.clone(),
            message: e.to_string(),
        })?;
        let destination_routes = destination_routes.map_err(|e| MatchError::MembershipFetch {
            stop: query.destination_id.clone(),
            message: e.to_string(),
        })?;

        // BTreeSet intersection enumerates in sorted name order, which
        // fixes the emission order of the final report.
        let common: Vec<&String> = origin_routes.intersection(&destination_routes).collect();
        if common.is_empty() {
            debug!(
                origin = %query.origin_id,
                destination = %query.destination_id,
                "membership sets are disjoint"
            );
            return Ok(DirectRouteReport::NoDirectRoute);
        }

        debug!(candidates = common.len(), "evaluating candidate routes");

        // Candidates are independent of one another; evaluate them
        // concurrently. join_all hands results back in input order, so
        // the enumeration order survives.
        let outcomes = join_all(
            common
                .iter()
                .map(|route| self.evaluate_candidate(route.as_str(), query)),
        )
        .await;

        Ok(DirectRouteReport::Candidates(outcomes))
    }

    /// Evaluate one candidate route from the intersection.
    ///
    /// Never fails: every failure mode scoped to this candidate maps
    /// to a tagged outcome so the other candidates keep going.
    async fn evaluate_candidate(&self, route: &str, query: &DirectQuery) -> RouteOutcome {
        let Some(code) = self.codes.resolve(route) else {
            return RouteOutcome::CodeUnavailable {
                route: route.to_string(),
            };
        };

        let sequences = match self.source.directed_sequences(&code).await {
            Ok(sequences) => sequences,
            Err(e) => {
                debug!(route, %code, error = %e, "sequence fetch failed");
                return RouteOutcome::VerificationFailed {
                    route: route.to_string(),
                    code,
                    reason: e.to_string(),
                };
            }
        };

        // Outbound has priority; the first valid direction wins and
        // the other one is not consulted.
        for direction in Direction::PRIORITY {
            let entries = sequences.direction(direction);
            let Some(origin_idx) = position_of(entries, &query.origin_name) else {
                continue;
            };
            let Some(destination_idx) = position_of(entries, &query.destination_name) else {
                continue;
            };
            if origin_idx <= destination_idx {
                let origin_arrival = entries[origin_idx].arrival.clone();
                let path = entries[origin_idx..=destination_idx]
                    .iter()
                    .map(PathPoint::from)
                    .collect();
                return RouteOutcome::Match(MatchResult {
                    route: route.to_string(),
                    code,
                    direction,
                    origin_arrival,
                    path,
                });
            }
        }

        RouteOutcome::NoMatchingDirection {
            route: route.to_string(),
            code,
        }
    }
}

/// First index of a stop with the given display name, if any.
fn position_of(entries: &[DirectedStopEntry], name: &str) -> Option<usize> {
    entries.iter().position(|entry| entry.stop.name == name)
}
