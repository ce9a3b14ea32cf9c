// Domain rules - Cut range validation

use serde::Serialize;
use thiserror::Error;

/// Default slack allowed for `end` above the probed duration, in seconds
///
/// Probe durations are printed with microsecond precision and parsed back into
/// `f64`, so an end time copied from the probe can land a hair above it.
pub const DEFAULT_END_TOLERANCE_SECS: f64 = 0.001;

/// The bound a requested cut range violated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Error)]
#[serde(tag = "bound", rename_all = "snake_case")]
pub enum RangeViolation {
    #[error("start is negative: requested {start:?}")]
    NegativeStart { start: f64 },

    #[error("end exceeds duration: requested {end:?}, available {duration:.2}")]
    EndExceedsDuration { end: f64, duration: f64 },

    #[error("start is not before end: start {start:?}, end {end:?}")]
    StartNotBeforeEnd { start: f64, end: f64 },
}

/// Checks `0 <= start < end <= duration` with a configurable end tolerance
///
/// Bounds are checked in that order and the first violation is reported.
/// Nothing is clamped: invalid input is always rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeValidator {
    end_tolerance: f64,
}

impl RangeValidator {
    /// Create a validator; negative or NaN tolerances are treated as zero
    pub fn new(end_tolerance: f64) -> Self {
        Self {
            end_tolerance: end_tolerance.max(0.0),
        }
    }

    /// Validator with exact `end <= duration` semantics
    pub fn exact() -> Self {
        Self { end_tolerance: 0.0 }
    }

    pub fn end_tolerance(&self) -> f64 {
        self.end_tolerance
    }

    pub fn validate(&self, start: f64, end: f64, duration: f64) -> Result<(), RangeViolation> {
        // NaN fails every comparison, so each check is written to reject it
        if start.is_nan() || start < 0.0 {
            return Err(RangeViolation::NegativeStart { start });
        }

        if end.is_nan() || end > duration + self.end_tolerance || duration.is_nan() {
            return Err(RangeViolation::EndExceedsDuration { end, duration });
        }

        if start >= end {
            return Err(RangeViolation::StartNotBeforeEnd { start, end });
        }

        Ok(())
    }
}

impl Default for RangeValidator {
    fn default() -> Self {
        Self::new(DEFAULT_END_TOLERANCE_SECS)
    }
}

/// Succeeds iff `start >= 0`, `end <= duration` and `start < end`
pub fn validate_range(start: f64, end: f64, duration: f64) -> Result<(), RangeViolation> {
    RangeValidator::exact().validate(start, end, duration)
}
