//! mp4trim library
//!
//! Lossless MP4 trimming: probe a video's duration with ffprobe, validate the
//! requested range against it, and copy the range out with an ffmpeg stream
//! copy. Failures are reported as [`TrimOutcome`] values.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{MediaProbeResult, TrimOutcome, TrimRequest};
pub use domain::rules::{validate_range, RangeValidator, RangeViolation};
pub use error::{Mp4TrimError, Mp4TrimResult};
