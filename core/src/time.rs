//! Time related utils.
//!
//! SigV4 needs two renderings of the same instant: a date stamp for the
//! credential scope and a basic ISO 8601 timestamp for `x-amz-date`. Both
//! must come from one clock reading, see [`SigningContext`].

use crate::Error;
use chrono::Utc;
use std::time::{SystemTime, UNIX_EPOCH};

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Read the system clock, failing instead of panicking when it's unusable.
///
/// The clock is considered unusable when it reports an instant before the
/// UNIX epoch or one that can't be represented.
pub fn try_now() -> crate::Result<DateTime> {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::clock("system clock is before the unix epoch").with_source(e))?;
    let secs = i64::try_from(since_epoch.as_secs())
        .map_err(|e| Error::clock("system clock is out of range").with_source(e))?;

    DateTime::from_timestamp(secs, since_epoch.subsec_nanos())
        .ok_or_else(|| Error::clock("system clock is out of range"))
}

/// Format time into date: `20220301`
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format time into ISO8601: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parse time from RFC3339.
///
/// All input time SHOULD follow [RFC3339](https://datatracker.ietf.org/doc/html/rfc3339).
pub fn parse_rfc3339(s: &str) -> crate::Result<DateTime> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|v| v.with_timezone(&Utc))
        .map_err(|e| Error::unexpected(format!("failed to parse time {s:?}")).with_source(e))
}

/// The time basis for one signature.
///
/// Holds a single captured instant. The date stamp and the amz date are both
/// derived from it so they can never straddle a day boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigningContext {
    now: DateTime,
}

impl SigningContext {
    /// Capture the given instant.
    pub fn new(now: DateTime) -> Self {
        Self { now }
    }

    /// Capture the current instant from the system clock.
    pub fn capture() -> crate::Result<Self> {
        try_now().map(Self::new)
    }

    /// The captured instant.
    pub fn now(&self) -> DateTime {
        self.now
    }

    /// `YYYYMMDD` of the captured instant in UTC.
    pub fn date_stamp(&self) -> String {
        format_date(self.now)
    }

    /// `YYYYMMDDTHHMMSSZ` of the captured instant in UTC.
    pub fn amz_date(&self) -> String {
        format_iso8601(self.now)
    }
}
