// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Timestamp normalization into pump-local time.
//!
//! The cloud API reports times three ways:
//! - integer epoch seconds (CIQ graph data)
//! - `/Date(<millis>-0000)/` strings (therapy timeline events)
//! - naive ISO-8601 strings already in pump-local time (CSV exports)
//!
//! All three resolve their UTC offset through the same `chrono-tz` rule
//! table so records on either side of a DST transition get the offset the
//! pump's zone actually had.

use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{ParseError, Result};

/// Output format for every normalized timestamp.
const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Naive ISO format used by the CSV-style endpoints.
const ISO_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const DOTNET_PREFIX: &str = "/Date(";
const DOTNET_SUFFIX: &str = ")/";

/// A pump-local civil time with the UTC offset in force at that instant.
///
/// Displays and serializes as `YYYY-MM-DD HH:MM:SS±HH:MM`.
#[derive(Debug, Clone, Copy)]
pub struct LocalTimestamp(DateTime<FixedOffset>);

impl LocalTimestamp {
    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// UTC offset in seconds east of UTC.
    pub fn offset_seconds(&self) -> i32 {
        self.0.offset().local_minus_utc()
    }
}

// Two timestamps are equal only when both the instant and the rendered
// offset match.
impl PartialEq for LocalTimestamp {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.offset_seconds() == other.offset_seconds()
    }
}

impl Eq for LocalTimestamp {}

impl Ord for LocalTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .cmp(&other.0)
            .then_with(|| self.offset_seconds().cmp(&other.offset_seconds()))
    }
}

impl PartialOrd for LocalTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for LocalTimestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
        self.offset_seconds().hash(state);
    }
}

impl fmt::Display for LocalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LOCAL_FORMAT))
    }
}

impl FromStr for LocalTimestamp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        DateTime::parse_from_str(s, LOCAL_FORMAT)
            .map(Self)
            .map_err(|e| ParseError::malformed(s, e.to_string()))
    }
}

impl Serialize for LocalTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LocalTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Converts raw API timestamps into [`LocalTimestamp`]s.
///
/// `source_zone` is the zone whose wall clock the API's epoch values are
/// rendered in; `pump_zone` is the zone whose DST rule supplies the offset.
/// Both are read-only rule tables, so one normalizer can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeNormalizer {
    pump_zone: Tz,
    source_zone: Tz,
}

impl Default for TimeNormalizer {
    fn default() -> Self {
        Self::new(chrono_tz::America::New_York, chrono_tz::America::Los_Angeles)
    }
}

impl TimeNormalizer {
    pub fn new(pump_zone: Tz, source_zone: Tz) -> Self {
        Self {
            pump_zone,
            source_zone,
        }
    }

    /// Normalizer for epoch values that are true UTC instants.
    pub fn for_zone(zone: Tz) -> Self {
        Self::new(zone, zone)
    }

    /// Normalize integer epoch seconds.
    ///
    /// The second pass through a repeated source-zone hour resolves to the
    /// later pump-zone offset, so consecutive epochs never collapse onto the
    /// same timestamp. A wall clock that falls in a pump-zone gap is read
    /// with the offset in force before the gap.
    pub fn parse_epoch(&self, seconds: i64) -> Result<LocalTimestamp> {
        let instant = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| ParseError::malformed(&seconds.to_string(), "epoch out of range"))?;
        let source_time = instant.with_timezone(&self.source_zone);
        let wall_clock = source_time.naive_local();

        let repeated = match self.source_zone.from_local_datetime(&wall_clock) {
            LocalResult::Ambiguous(_, later) => later == source_time,
            _ => false,
        };

        let resolved = match self.pump_zone.from_local_datetime(&wall_clock) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earlier, later) => {
                if repeated {
                    later
                } else {
                    earlier
                }
            }
            LocalResult::None => self.skip_gap(wall_clock),
        };
        Ok(LocalTimestamp(resolved.fixed_offset()))
    }

    /// Read a gap wall clock with the pre-transition offset.
    fn skip_gap(&self, wall_clock: NaiveDateTime) -> DateTime<Tz> {
        let before = self
            .pump_zone
            .offset_from_utc_datetime(&(wall_clock - Duration::days(1)))
            .fix();
        let utc = wall_clock - Duration::seconds(i64::from(before.local_minus_utc()));
        self.pump_zone.from_utc_datetime(&utc)
    }

    /// Normalize a `/Date(<millis>-0000)/` string.
    pub fn parse_dotnet_date(&self, raw: &str) -> Result<LocalTimestamp> {
        let inner = raw
            .trim()
            .strip_prefix(DOTNET_PREFIX)
            .and_then(|s| s.strip_suffix(DOTNET_SUFFIX))
            .ok_or_else(|| ParseError::malformed(raw, "expected /Date(<millis>)/ envelope"))?;

        let digits_end = inner
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(inner.len());
        let (millis, offset) = inner.split_at(digits_end);

        if millis.is_empty() {
            return Err(ParseError::malformed(raw, "missing milliseconds"));
        }
        if !offset.is_empty() && !is_offset_suffix(offset) {
            return Err(ParseError::malformed(raw, "invalid offset suffix"));
        }

        let millis: i64 = millis
            .parse()
            .map_err(|e: std::num::ParseIntError| ParseError::malformed(raw, e.to_string()))?;
        self.parse_epoch(millis / 1000)
    }

    /// Normalize a naive ISO-8601 string that is already pump-local.
    pub fn parse_local_iso(&self, raw: &str) -> Result<LocalTimestamp> {
        let naive = NaiveDateTime::parse_from_str(raw.trim(), ISO_LOCAL_FORMAT)
            .map_err(|e| ParseError::malformed(raw, e.to_string()))?;
        self.localize(naive)
    }

    /// Attach the pump-zone offset to a wall-clock time.
    ///
    /// Ambiguous fall-back times resolve to the earlier offset. Times inside
    /// a spring-forward gap never happened and are rejected.
    fn localize(&self, wall_clock: NaiveDateTime) -> Result<LocalTimestamp> {
        self.pump_zone
            .from_local_datetime(&wall_clock)
            .earliest()
            .map(|dt| LocalTimestamp(dt.fixed_offset()))
            .ok_or_else(|| ParseError::NonexistentLocalTime {
                value: wall_clock.to_string(),
                zone: self.pump_zone.name().to_string(),
            })
    }
}

/// `-0000`, `+0100` and friends.
fn is_offset_suffix(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 5
        && (bytes[0] == b'+' || bytes[0] == b'-')
        && bytes[1..].iter().all(u8::is_ascii_digit)
}
