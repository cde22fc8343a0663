//! Per-candidate outcomes of a direct-route query.

use crate::domain::{Direction, DirectedStopEntry, RouteCode};

/// One point on a renderable segment path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPoint {
    /// 1-based rank within the chosen direction's sequence.
    pub seq: u32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&DirectedStopEntry> for PathPoint {
    fn from(entry: &DirectedStopEntry) -> Self {
        Self {
            seq: entry.seq,
            name: entry.stop.name.clone(),
            latitude: entry.stop.latitude,
            longitude: entry.stop.longitude,
        }
    }
}

/// A route that serves origin and destination in one consistent
/// traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Route display name.
    pub route: String,

    /// Canonical route code.
    pub code: RouteCode,

    /// The chosen traversal direction.
    pub direction: Direction,

    /// Raw live arrival annotation at the origin stop, propagated
    /// unchanged from the sequence fetch; `None` when unavailable.
    pub origin_arrival: Option<String>,

    /// Ordered origin→destination path, endpoints inclusive. The first
    /// and last points are exactly the origin and destination stops.
    pub path: Vec<PathPoint>,
}

/// Outcome for one candidate route from the membership intersection.
///
/// Every candidate appears in the final report exactly once: either as
/// a match, or with an explicit, distinguishable reason it was not
/// renderable.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Match(MatchResult),

    /// The route is known to serve both stops but has no usable code
    /// in the preloaded table, so it cannot be queried further.
    CodeUnavailable { route: String },

    /// The stop sequences could not be fetched or did not load in
    /// time; the route could not be verified (which is not the same as
    /// "no direct route").
    VerificationFailed {
        route: String,
        code: RouteCode,
        reason: String,
    },

    /// Both stops are served individually, but in no direction does
    /// the origin precede the destination.
    NoMatchingDirection { route: String, code: RouteCode },
}

impl RouteOutcome {
    /// The candidate's route display name.
    pub fn route_name(&self) -> &str {
        match self {
            RouteOutcome::Match(m) => &m.route,
            RouteOutcome::CodeUnavailable { route }
            | RouteOutcome::VerificationFailed { route, .. }
            | RouteOutcome::NoMatchingDirection { route, .. } => route,
        }
    }

    /// The match, if this candidate produced one.
    pub fn as_match(&self) -> Option<&MatchResult> {
        match self {
            RouteOutcome::Match(m) => Some(m),
            _ => None,
        }
    }
}

/// Result of a direct-route query.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectRouteReport {
    /// The membership sets do not intersect. A valid terminal outcome,
    /// not an error.
    NoDirectRoute,

    /// One outcome per candidate route, in enumeration order.
    Candidates(Vec<RouteOutcome>),
}

impl DirectRouteReport {
    /// The per-candidate outcomes (empty for `NoDirectRoute`).
    pub fn outcomes(&self) -> &[RouteOutcome] {
        match self {
            DirectRouteReport::NoDirectRoute => &[],
            DirectRouteReport::Candidates(outcomes) => outcomes,
        }
    }

    /// Only the renderable matches, in enumeration order.
    pub fn matches(&self) -> impl Iterator<Item = &MatchResult> {
        self.outcomes().iter().filter_map(RouteOutcome::as_match)
    }
}
