//! Temporal parsing and rendering.
//!
//! Durations use the familiar `1h30m` notation extended with days (`d`) and
//! weeks (`w`). Timestamps are RFC 3339, with date-only and zone-less forms
//! accepted as UTC.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use serde::{Serialize, Serializer};

use crate::error::DecodeError;

const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

/// Seconds since the unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnixTime(pub DateTime<Utc>);

impl UnixTime {
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(UnixTime)
    }

    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }
}

impl fmt::Display for UnixTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.timestamp())
    }
}

impl Serialize for UnixTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.timestamp())
    }
}

fn unit_nanos(unit: &str) -> Option<i128> {
    let nanos: u64 = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SECOND,
        "m" => NANOS_PER_MINUTE,
        "h" => NANOS_PER_HOUR,
        "d" => 24 * NANOS_PER_HOUR,
        "w" => 7 * 24 * NANOS_PER_HOUR,
        _ => return None,
    };
    Some(i128::from(nanos))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parse a duration such as `"1d2h30m"`, `"1.5h"`, `"-90s"` or `"2w"`.
pub fn parse_duration(text: &str) -> Result<TimeDelta, DecodeError> {
    let invalid = || DecodeError::InvalidDuration(text.to_string());

    let mut s = text.trim();
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }
    if s == "0" {
        return Ok(TimeDelta::zero());
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: i128 = 0;
    while !s.is_empty() {
        let (whole, rest) = split_digits(s);
        let (fraction, rest) = match rest.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", rest),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let (unit, rest) = rest.split_at(unit_end);
        let scale = unit_nanos(unit).ok_or_else(invalid)?;

        if !whole.is_empty() {
            let value: i128 = whole.parse().map_err(|_| invalid())?;
            total = value
                .checked_mul(scale)
                .and_then(|v| total.checked_add(v))
                .ok_or_else(invalid)?;
        }
        if !fraction.is_empty() {
            // nanosecond precision is all a TimeDelta can hold
            let digits = &fraction[..fraction.len().min(18)];
            let value: i128 = digits.parse().map_err(|_| invalid())?;
            total += value * scale / 10_i128.pow(digits.len() as u32);
        }
        if total > i128::from(i64::MAX) {
            return Err(invalid());
        }
        s = rest;
    }

    let nanos = i64::try_from(total).map_err(|_| invalid())?;
    let delta = TimeDelta::nanoseconds(nanos);
    Ok(if negative { -delta } else { delta })
}

fn format_fraction(value: u64, scale: u64) -> String {
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{fraction:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Render a duration as `26h30m0s`, `1.5s` or `250ms`.
pub fn format_duration(delta: TimeDelta) -> String {
    let Some(nanos) = delta.num_nanoseconds() else {
        return format!("{}s", delta.num_seconds());
    };
    if nanos == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }
    let u = nanos.unsigned_abs();

    if u < NANOS_PER_SECOND {
        let (unit, scale) = if u < 1_000 {
            ("ns", 1)
        } else if u < 1_000_000 {
            ("µs", 1_000)
        } else {
            ("ms", 1_000_000)
        };
        out.push_str(&format_fraction(u, scale));
        out.push_str(unit);
        return out;
    }

    let hours = u / NANOS_PER_HOUR;
    let minutes = (u % NANOS_PER_HOUR) / NANOS_PER_MINUTE;
    let seconds = u % NANOS_PER_MINUTE;
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&format_fraction(seconds, NANOS_PER_SECOND));
    out.push('s');
    out
}

/// Parse an RFC 3339 timestamp, a zone-less `YYYY-MM-DDTHH:MM:SS` (UTC) or a
/// bare date (midnight UTC).
pub fn parse_date_time(text: &str) -> Result<DateTime<Utc>, DecodeError> {
    let text = text.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&t));
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        && let Some(t) = d.and_hms_opt(0, 0, 0)
    {
        return Ok(Utc.from_utc_datetime(&t));
    }
    Err(DecodeError::InvalidTime(text.to_string()))
}

/// Parse `YYYY-MM-DD`, or take the date part of an RFC 3339 timestamp.
pub fn parse_date(text: &str) -> Result<NaiveDate, DecodeError> {
    let text = text.trim();
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc).date_naive())
        .map_err(|_| DecodeError::InvalidTime(text.to_string()))
}

/// Parse seconds since the epoch, or an RFC 3339 timestamp.
pub fn parse_unix_time(text: &str) -> Result<DateTime<Utc>, DecodeError> {
    let text = text.trim();
    if let Ok(secs) = text.parse::<i64>() {
        return UnixTime::from_secs(secs)
            .map(|t| t.0)
            .ok_or_else(|| DecodeError::InvalidTime(text.to_string()));
    }
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| DecodeError::InvalidTime(text.to_string()))
}

pub fn format_date_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
