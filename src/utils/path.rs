//! Output path helpers

use std::path::{Path, PathBuf};

/// File name used when the input has no usable stem (stdin input)
pub const FALLBACK_OUTPUT_NAME: &str = "trimmed_video.mp4";

/// Default output path: `<stem>_trim_<start>_<end>.mp4` in the working directory
pub fn default_output_path(input: Option<&Path>, start: f64, end: f64) -> PathBuf {
    let stem = input
        .and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty());

    match stem {
        Some(stem) => PathBuf::from(format!(
            "{}_trim_{}_{}.mp4",
            stem,
            format_time_short(start),
            format_time_short(end)
        )),
        None => PathBuf::from(FALLBACK_OUTPUT_NAME),
    }
}

/// Format time as a short, filename-safe string
fn format_time_short(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let total_seconds = total_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    let ms = total_ms % 1000;

    if hours > 0 {
        format!("{:02}h{:02}m{:02}s{:03}ms", hours, minutes, secs, ms)
    } else if minutes > 0 {
        format!("{:02}m{:02}s{:03}ms", minutes, secs, ms)
    } else {
        format!("{:02}s{:03}ms", secs, ms)
    }
}
