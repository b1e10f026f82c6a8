//! Video timestamps.
//!
//! Study recordings are annotated with `MM:SS.mmm` offsets into the screen
//! capture. A [`TimePoint`] wraps a `NaiveTime` so that offsets from any of the
//! three export files compare and subtract directly.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// Defaults to `00:00.000`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimePoint(NaiveTime);

impl TimePoint {
    /// Builds a point from minutes, seconds and milliseconds. Minutes past 59
    /// roll over into hours.
    pub fn from_parts(minutes: u32, seconds: u32, millis: u32) -> Option<Self> {
        NaiveTime::from_hms_milli_opt(minutes / 60, minutes % 60, seconds, millis).map(TimePoint)
    }

    pub fn from_secs_f64(secs: f64) -> Option<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        let total_ms = (secs * 1000.0).round() as u64;
        let minutes = u32::try_from(total_ms / 60_000).ok()?;
        let seconds = ((total_ms / 1000) % 60) as u32;
        Self::from_parts(minutes, seconds, (total_ms % 1000) as u32)
    }

    pub fn total_minutes(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    pub fn seconds(&self) -> u32 {
        self.0.second()
    }

    pub fn millis(&self) -> u32 {
        self.0.nanosecond() / 1_000_000
    }

    /// `MM:SS`, the label printed under the time axis.
    pub fn video_label(&self) -> String {
        format!("{:02}:{:02}", self.total_minutes(), self.seconds())
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}.{:03}",
            self.total_minutes(),
            self.seconds(),
            self.millis()
        )
    }
}

/// Parses `MM:SS` or `MM:SS.mmm`.
pub fn parse_timestamp(text: &str) -> Result<TimePoint> {
    let malformed = || TimelineError::MalformedTimestamp {
        text: text.to_string(),
    };

    let trimmed = text.trim();
    let (minute, rest) = trimmed.split_once(':').ok_or_else(malformed)?;
    if rest.contains(':') {
        return Err(malformed());
    }

    let (second, fraction) = match rest.split_once('.') {
        Some((second, fraction)) => (second, Some(fraction)),
        None => (rest, None),
    };

    let minutes: u32 = parse_digits(minute).ok_or_else(malformed)?;
    let seconds: u32 = parse_digits(second).ok_or_else(malformed)?;
    let millis = match fraction {
        Some(fraction) => parse_fraction_millis(fraction).ok_or_else(malformed)?,
        None => 0,
    };

    if seconds >= 60 {
        return Err(malformed());
    }

    TimePoint::from_parts(minutes, seconds, millis).ok_or_else(malformed)
}

/// `b - a` in fractional seconds. Negative when `b` precedes `a`.
pub fn duration(a: TimePoint, b: TimePoint) -> f64 {
    (b.0 - a.0).num_milliseconds() as f64 / 1000.0
}

fn parse_digits(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

// ".5" and ".500" are both half a second; digits past the third are dropped.
fn parse_fraction_millis(fraction: &str) -> Option<u32> {
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut padded: String = fraction.chars().take(3).collect();
    while padded.len() < 3 {
        padded.push('0');
    }
    padded.parse().ok()
}
