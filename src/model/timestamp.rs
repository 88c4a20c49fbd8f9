use chrono::{NaiveDateTime, SubsecRound, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("Timestamp is missing the trailing 'Z': {0}")]
    MissingZoneMarker(String),

    #[error("Invalid timestamp: {0}")]
    Invalid(#[from] chrono::ParseError),
}

/// Wall-clock instant rendered the way the dashboard expects it.
///
/// Wire format is an ISO-8601 local date-time, with microseconds only when
/// they are nonzero, followed by a literal `Z` (e.g. `2024-03-01T09:15:00Z`,
/// `2024-03-01T09:15:00.250000Z`). The `Z` is appended to a naive local time,
/// so it does not actually mean UTC. Consumers treat the string as opaque and
/// the format is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Wrap a naive date-time, dropping anything finer than a microsecond.
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime.trunc_subsecs(6))
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.nanosecond() / 1_000 == 0 {
            write!(f, "{}Z", self.0.format("%Y-%m-%dT%H:%M:%S"))
        } else {
            write!(f, "{}Z", self.0.format("%Y-%m-%dT%H:%M:%S%.6f"))
        }
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let naive = s
            .strip_suffix('Z')
            .ok_or_else(|| TimestampError::MissingZoneMarker(s.to_string()))?;
        Ok(Self::new(naive.parse::<NaiveDateTime>()?))
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_string()
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TimestampError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap()
    }

    #[test]
    fn test_display_whole_seconds() {
        let ts = Timestamp::new(at(9, 15, 0, 0));
        assert_eq!(ts.to_string(), "2024-03-01T09:15:00Z");
    }

    #[test]
    fn test_display_with_microseconds() {
        let ts = Timestamp::new(at(9, 15, 0, 250_000));
        assert_eq!(ts.to_string(), "2024-03-01T09:15:00.250000Z");
    }

    #[test]
    fn test_new_truncates_nanoseconds() {
        let precise = at(9, 15, 0, 0).with_nanosecond(123_456_789).unwrap();
        let ts = Timestamp::new(precise);
        assert_eq!(ts.to_string(), "2024-03-01T09:15:00.123456Z");
    }

    #[test]
    fn test_parse_both_forms() {
        let whole: Timestamp = "2024-03-01T09:15:00Z".parse().unwrap();
        assert_eq!(whole.naive(), at(9, 15, 0, 0));
        let fractional: Timestamp = "2024-03-01T09:15:00.250000Z".parse().unwrap();
        assert_eq!(fractional.naive(), at(9, 15, 0, 250_000));
    }

    #[test]
    fn test_parse_requires_zone_marker() {
        assert!(matches!(
            "2024-03-01T09:15:00".parse::<Timestamp>(),
            Err(TimestampError::MissingZoneMarker(_))
        ));
        assert!(matches!(
            "yesterday Z".parse::<Timestamp>(),
            Err(TimestampError::Invalid(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let ts = Timestamp::new(at(23, 59, 1, 42));
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-03-01T23:59:01.000042Z\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
