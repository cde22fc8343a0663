//! Direct-route matcher.
//!
//! The orchestration core: given a rider's origin and destination, it
//! intersects the route-membership sets of both stops, resolves codes,
//! fetches directed stop sequences, picks the valid traversal
//! direction per candidate route, and assembles one renderable
//! segment per match. Per-candidate failures are tagged and reported,
//! never allowed to abort the other candidates.

mod direct;
mod report;
mod source;

pub use direct::{DirectQuery, DirectRouteMatcher, MatchError};
pub use report::{DirectRouteReport, MatchResult, PathPoint, RouteOutcome};
pub use source::{SourceError, TransitSource};
