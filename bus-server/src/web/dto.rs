//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Stop;
use crate::matcher::{MatchResult, PathPoint, RouteOutcome};

/// Request to list candidate stop poles for a display name.
#[derive(Debug, Deserialize)]
pub struct StopCandidatesRequest {
    pub name: String,
}

/// A numbered candidate stop pole.
#[derive(Debug, Serialize)]
pub struct CandidateResult {
    /// 1-based number to pass back as the selection.
    pub choice: usize,

    pub stop_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CandidateResult {
    pub fn from_stop(choice: usize, stop: &Stop) -> Self {
        Self {
            choice,
            stop_id: stop.id.to_string(),
            latitude: stop.latitude,
            longitude: stop.longitude,
        }
    }
}

/// Response listing candidate stop poles for a name.
#[derive(Debug, Serialize)]
pub struct StopCandidatesResponse {
    pub name: String,
    pub candidates: Vec<CandidateResult>,
}

/// Request to find direct routes between two named stops.
#[derive(Debug, Deserialize)]
pub struct DirectRouteRequest {
    pub origin: String,
    pub destination: String,

    /// 1-based candidate pick, required when the origin name maps to
    /// more than one stop pole.
    pub origin_choice: Option<usize>,

    /// 1-based candidate pick for the destination name.
    pub destination_choice: Option<usize>,
}

/// One point on a matched segment path.
#[derive(Debug, Serialize)]
pub struct PathPointResult {
    pub seq: u32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl PathPointResult {
    fn from_point(point: &PathPoint) -> Self {
        Self {
            seq: point.seq,
            name: point.name.clone(),
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

/// Outcome for one candidate route.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcomeResult {
    /// Renderable match.
    Match {
        route: String,
        code: String,
        direction: String,
        /// Raw arrival annotation at the origin stop, if available.
        origin_arrival: Option<String>,
        path: Vec<PathPointResult>,
        /// URL of the rendered map artifact, if rendering succeeded.
        map_url: Option<String>,
    },

    /// Route serves both stops but has no usable code.
    CodeUnavailable { route: String },

    /// Stop sequences could not be fetched; route unverified.
    VerificationFailed {
        route: String,
        code: String,
        reason: String,
    },

    /// No direction has the origin before the destination.
    NoMatchingDirection { route: String, code: String },
}

impl RouteOutcomeResult {
    /// Create from a matcher outcome, attaching the artifact URL for
    /// matches that were rendered.
    pub fn from_outcome(outcome: &RouteOutcome, map_url: Option<String>) -> Self {
        match outcome {
            RouteOutcome::Match(m) => Self::from_match(m, map_url),
            RouteOutcome::CodeUnavailable { route } => RouteOutcomeResult::CodeUnavailable {
                route: route.clone(),
            },
            RouteOutcome::VerificationFailed {
                route,
                code,
                reason,
            } => RouteOutcomeResult::VerificationFailed {
                route: route.clone(),
                code: code.to_string(),
                reason: reason.clone(),
            },
            RouteOutcome::NoMatchingDirection { route, code } => {
                RouteOutcomeResult::NoMatchingDirection {
                    route: route.clone(),
                    code: code.to_string(),
                }
            }
        }
    }

    fn from_match(m: &MatchResult, map_url: Option<String>) -> Self {
        RouteOutcomeResult::Match {
            route: m.route.clone(),
            code: m.code.to_string(),
            direction: m.direction.to_string(),
            origin_arrival: m.origin_arrival.clone(),
            path: m.path.iter().map(PathPointResult::from_point).collect(),
            map_url,
        }
    }
}

/// Response for a direct-route query.
#[derive(Debug, Serialize)]
pub struct DirectRouteResponse {
    pub origin: String,
    pub origin_stop_id: String,
    pub destination: String,
    pub destination_stop_id: String,

    /// False when the membership sets were disjoint (`NoDirectRoute`).
    pub direct: bool,

    /// One entry per candidate route, in enumeration order.
    pub routes: Vec<RouteOutcomeResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, RouteCode, StopId};

    fn sample_match() -> MatchResult {
        MatchResult {
            route: "信義幹線".to_string(),
            code: RouteCode::parse("2").unwrap(),
            direction: Direction::Outbound,
            origin_arrival: Some("將到站".to_string()),
            path: vec![PathPoint {
                seq: 5,
                name: "忠孝新生".to_string(),
                latitude: 25.042356,
                longitude: 121.532905,
            }],
        }
    }

    #[test]
    fn match_outcome_serializes_with_tag() {
        let outcome = RouteOutcome::Match(sample_match());
        let result =
            RouteOutcomeResult::from_outcome(&outcome, Some("/maps/direct.html".to_string()));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "match");
        assert_eq!(value["route"], "信義幹線");
        assert_eq!(value["code"], "2");
        assert_eq!(value["direction"], "outbound");
        assert_eq!(value["origin_arrival"], "將到站");
        assert_eq!(value["map_url"], "/maps/direct.html");
        assert_eq!(value["path"][0]["seq"], 5);
    }

    #[test]
    fn tagged_failures_serialize_distinctly() {
        let code_unavailable = RouteOutcomeResult::from_outcome(
            &RouteOutcome::CodeUnavailable {
                route: "敦化幹線".to_string(),
            },
            None,
        );
        let value = serde_json::to_value(&code_unavailable).unwrap();
        assert_eq!(value["status"], "code_unavailable");

        let unverified = RouteOutcomeResult::from_outcome(
            &RouteOutcome::VerificationFailed {
                route: "敦化幹線".to_string(),
                code: RouteCode::parse("3").unwrap(),
                reason: "stop list did not load within 10s".to_string(),
            },
            None,
        );
        let value = serde_json::to_value(&unverified).unwrap();
        assert_eq!(value["status"], "verification_failed");
        assert!(value["reason"].as_str().unwrap().contains("10s"));

        let wrong_way = RouteOutcomeResult::from_outcome(
            &RouteOutcome::NoMatchingDirection {
                route: "敦化幹線".to_string(),
                code: RouteCode::parse("3").unwrap(),
            },
            None,
        );
        let value = serde_json::to_value(&wrong_way).unwrap();
        assert_eq!(value["status"], "no_matching_direction");
    }

    #[test]
    fn candidate_result_is_one_based() {
        let stop = Stop {
            id: StopId::parse("1813341900").unwrap(),
            name: "忠孝新生".to_string(),
            latitude: 25.042356,
            longitude: 121.532905,
        };
        let result = CandidateResult::from_stop(1, &stop);
        assert_eq!(result.choice, 1);
        assert_eq!(result.stop_id, "1813341900");
    }
}
