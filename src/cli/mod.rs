//! CLI module for mp4trim
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::logging::LogFormat;

pub mod args;
pub mod commands;

/// mp4trim - lossless MP4 trimming
///
/// Copies a time range out of an MP4 file with ffmpeg stream copy. Nothing is
/// re-encoded, so the cut starts on the keyframe at or before the requested
/// start time.
#[derive(Parser, Debug)]
#[command(name = "mp4trim")]
#[command(about = "Trim MP4 videos without re-encoding")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML, or YAML with a .yaml/.yml extension)
    #[arg(long, global = true, env = "MP4TRIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `info` or `mp4trim=debug`
    #[arg(long, global = true, env = "MP4TRIM_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, env = "MP4TRIM_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// ffmpeg executable used for trimming
    #[arg(long, global = true, env = "MP4TRIM_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// ffprobe executable used for reading durations
    #[arg(long, global = true, env = "MP4TRIM_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Probe time limit in seconds (0 disables)
    #[arg(long, global = true, env = "MP4TRIM_PROBE_TIMEOUT", value_parser = timeout_secs)]
    pub probe_timeout: Option<u64>,

    /// Trim time limit in seconds (0 disables)
    #[arg(long, global = true, env = "MP4TRIM_TRIM_TIMEOUT", value_parser = timeout_secs)]
    pub trim_timeout: Option<u64>,

    /// How far the end time may exceed the probed duration, in seconds
    #[arg(long, global = true, env = "MP4TRIM_END_TOLERANCE")]
    pub end_tolerance: Option<f64>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the duration of a video
    Probe(args::ProbeArgs),
    /// Copy a time range of a video into a new file
    Trim(args::TrimArgs),
}

fn timeout_secs(s: &str) -> Result<u64, String> {
    clap_num::number_range(s, 0, 86_400)
}
