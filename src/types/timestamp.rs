use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Timelike, Utc};

/// A UTC instant as the API exchanges it: an ISO-8601 string on the wire.
///
/// Equality is instant equality, so `2024-01-01T00:00:00.120Z` and
/// `2024-01-01T00:00:00.1200000+00:00` are the same timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// The current instant truncated to milliseconds.
    pub fn now() -> Self {
        let now = Utc::now();
        let millis = now.timestamp_subsec_millis();
        Self(now.with_nanosecond(millis * 1_000_000).unwrap_or(now))
    }

    /// Accepts RFC 3339 with any offset and any number of fractional digits.
    /// A missing offset is read as UTC.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(s) {
            Ok(ts) => Ok(Self(ts.with_timezone(&Utc))),
            Err(e) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| Self(DateTime::from_naive_utc_and_offset(naive, Utc)))
                .map_err(|_| e),
        }
    }

    /// Millisecond precision with a `Z` suffix.
    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_iso_string())
    }
}
