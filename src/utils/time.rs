//! Time parsing and formatting utilities

use std::fmt;
use std::str::FromStr;

use crate::error::{Mp4TrimError, Mp4TrimResult};

/// A timestamp in seconds, parsed from user input
///
/// Accepted forms: plain seconds (`12.5`, `-1`), `MM:SS(.ms)` and
/// `HH:MM:SS(.ms)`. Plain seconds may be negative so that range validation,
/// not parsing, decides whether the value is usable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Parse time string in various formats
    pub fn parse(time_str: &str) -> Mp4TrimResult<Self> {
        let trimmed = time_str.trim();
        let invalid = || Mp4TrimError::InvalidTimeFormat {
            time: time_str.to_string(),
        };

        if !trimmed.contains(':') {
            let seconds: f64 = trimmed.parse().map_err(|_| invalid())?;
            // "inf" and "nan" parse as f64
            if !seconds.is_finite() {
                return Err(invalid());
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        let (hours, minutes, seconds) = match parts.as_slice() {
            [minutes, seconds] => (Some(0), parse_unit(minutes, None), *seconds),
            [hours, minutes, seconds] => {
                (parse_unit(hours, None), parse_unit(minutes, Some(60)), *seconds)
            }
            _ => return Err(invalid()),
        };
        let (Some(hours), Some(minutes)) = (hours, minutes) else {
            return Err(invalid());
        };

        let seconds: f64 = seconds.parse().map_err(|_| invalid())?;
        if !seconds.is_finite() || !(0.0..60.0).contains(&seconds) {
            return Err(invalid());
        }

        Ok(Self::from_seconds(
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
        ))
    }

    /// Format as HH:MM:SS.mmm, rounded to the millisecond
    pub fn format_hms(&self) -> String {
        let sign = if self.seconds < 0.0 { "-" } else { "" };
        let total_ms = (self.seconds.abs() * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let seconds = (total_ms % 60_000) / 1000;
        let milliseconds = total_ms % 1000;
        format!(
            "{}{:02}:{:02}:{:02}.{:03}",
            sign, hours, minutes, seconds, milliseconds
        )
    }
}

/// Whole hours or minutes, optionally required to stay below `below`
fn parse_unit(text: &str, below: Option<u32>) -> Option<u32> {
    let value: u32 = text.trim().parse().ok()?;
    match below {
        Some(limit) if value >= limit => None,
        _ => Some(value),
    }
}

impl FromStr for TimeSpec {
    type Err = Mp4TrimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}
