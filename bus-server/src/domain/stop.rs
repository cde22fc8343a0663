//! Stop identifier and stop types.

use std::fmt;

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A validated eBus stop identifier.
///
/// Stop ids on the eBus site are non-empty strings of ASCII digits.
/// This type guarantees that any `StopId` value is valid by
/// construction. Stop ids are globally unique; stop display names are
/// not, so name resolution is a separate, one-to-many step.
///
/// # Examples
///
/// ```
/// use bus_server::domain::StopId;
///
/// let id = StopId::parse("1813341900").unwrap();
/// assert_eq!(id.as_str(), "1813341900");
///
/// // Empty and non-numeric ids are rejected
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("18a341900").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id from a string.
    ///
    /// The input must be non-empty and consist of ASCII digits only.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStopId {
                reason: "must be ASCII digits only",
            });
        }

        Ok(StopId(s.to_string()))
    }

    /// Returns the stop id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A physical boarding location.
///
/// Several stop poles can share one display name, which is why a
/// name lookup yields a candidate list rather than a single stop.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Unique identifier within the transit system.
    pub id: StopId,

    /// Display name (not unique).
    pub name: String,

    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(StopId::parse("1").is_ok());
        assert!(StopId::parse("1813341900").is_ok());
        assert!(StopId::parse("0001").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StopId::parse("").is_err());
    }

    #[test]
    fn reject_non_digits() {
        assert!(StopId::parse("18a3").is_err());
        assert!(StopId::parse("-123").is_err());
        assert!(StopId::parse("12 3").is_err());
        assert!(StopId::parse("站牌").is_err());
    }

    #[test]
    fn as_str_roundtrip() {
        let id = StopId::parse("1813341900").unwrap();
        assert_eq!(id.as_str(), "1813341900");
    }

    #[test]
    fn display_and_debug() {
        let id = StopId::parse("42").unwrap();
        assert_eq!(format!("{}", id), "42");
        assert_eq!(format!("{:?}", id), "StopId(42)");
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(StopId::parse("100").unwrap());
        assert!(set.contains(&StopId::parse("100").unwrap()));
        assert!(!set.contains(&StopId::parse("200").unwrap()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[0-9]{1,12}") {
            let id = StopId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        /// Strings containing a non-digit are always rejected
        #[test]
        fn non_digit_rejected(s in "[0-9]{0,4}[a-zA-Z][0-9]{0,4}") {
            prop_assert!(StopId::parse(&s).is_err());
        }
    }
}
