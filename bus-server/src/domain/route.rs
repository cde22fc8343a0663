//! Route codes, directions and directed stop sequences.

use std::fmt;

use super::stop::Stop;

/// Error returned when parsing an invalid route code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route code: {reason}")]
pub struct InvalidRouteCode {
    reason: &'static str,
}

/// A canonical eBus route code, the key used for stop-sequence lookups.
///
/// Route codes are non-empty strings of ASCII digits. The preloaded
/// name→code table may carry placeholder values that fail this parse;
/// the resolver treats those names as having no usable code.
///
/// # Examples
///
/// ```
/// use bus_server::domain::RouteCode;
///
/// let code = RouteCode::parse("10181").unwrap();
/// assert_eq!(code.as_str(), "10181");
///
/// assert!(RouteCode::parse("").is_err());
/// assert!(RouteCode::parse("n/a").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RouteCode(String);

impl RouteCode {
    /// Parse a route code from a string.
    ///
    /// The input must be non-empty and consist of ASCII digits only.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteCode> {
        if s.is_empty() {
            return Err(InvalidRouteCode {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidRouteCode {
                reason: "must be ASCII digits only",
            });
        }

        Ok(RouteCode(s.to_string()))
    }

    /// Returns the route code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteCode({})", self.0)
    }
}

impl fmt::Display for RouteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the two fixed traversal orders of a route's stop sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Outbound,
    Inbound,
}

impl Direction {
    /// Evaluation order used by the matcher: outbound is tried first,
    /// and the first valid direction wins.
    pub const PRIORITY: [Direction; 2] = [Direction::Outbound, Direction::Inbound];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Outbound => f.write_str("outbound"),
            Direction::Inbound => f.write_str("inbound"),
        }
    }
}

/// A stop's place within one route-direction sequence.
///
/// Belongs to exactly one (route, direction) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectedStopEntry {
    /// 1-based rank in document order. Within one sequence these are
    /// strictly increasing and contiguous, starting at 1.
    pub seq: u32,

    pub stop: Stop,

    /// Raw live arrival annotation for this stop: a countdown, an
    /// arrived marker, or `None` when the status field was empty.
    pub arrival: Option<String>,
}

/// The two directed stop sequences of one route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectedSequences {
    pub outbound: Vec<DirectedStopEntry>,
    pub inbound: Vec<DirectedStopEntry>,
}

impl DirectedSequences {
    /// The entry list for one direction.
    pub fn direction(&self, direction: Direction) -> &[DirectedStopEntry] {
        match direction {
            Direction::Outbound => &self.outbound,
            Direction::Inbound => &self.inbound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;

    fn entry(seq: u32, name: &str) -> DirectedStopEntry {
        DirectedStopEntry {
            seq,
            stop: Stop {
                id: StopId::parse(&format!("{}", 1000 + seq)).unwrap(),
                name: name.to_string(),
                latitude: 25.0,
                longitude: 121.5,
            },
            arrival: None,
        }
    }

    #[test]
    fn parse_valid_codes() {
        assert!(RouteCode::parse("2").is_ok());
        assert!(RouteCode::parse("10181").is_ok());
    }

    #[test]
    fn reject_invalid_codes() {
        assert!(RouteCode::parse("").is_err());
        assert!(RouteCode::parse("n/a").is_err());
        assert!(RouteCode::parse("10-181").is_err());
        assert!(RouteCode::parse("信義").is_err());
    }

    #[test]
    fn display_and_debug() {
        let code = RouteCode::parse("2").unwrap();
        assert_eq!(format!("{}", code), "2");
        assert_eq!(format!("{:?}", code), "RouteCode(2)");
    }

    #[test]
    fn direction_priority_is_outbound_first() {
        assert_eq!(
            Direction::PRIORITY,
            [Direction::Outbound, Direction::Inbound]
        );
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Outbound.to_string(), "outbound");
        assert_eq!(Direction::Inbound.to_string(), "inbound");
    }

    #[test]
    fn sequences_keyed_by_direction() {
        let sequences = DirectedSequences {
            outbound: vec![entry(1, "甲"), entry(2, "乙")],
            inbound: vec![entry(1, "乙")],
        };

        assert_eq!(sequences.direction(Direction::Outbound).len(), 2);
        assert_eq!(sequences.direction(Direction::Inbound).len(), 1);
        assert_eq!(sequences.direction(Direction::Inbound)[0].stop.name, "乙");
    }
}
