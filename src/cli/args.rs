//! Command-line argument definitions

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;

use crate::utils::time::TimeSpec;

/// Where the video comes from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Read the whole video from stdin into the staging area
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// File path, when the input is a file
    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSource::Stdin => None,
            InputSource::File(path) => Some(path),
        }
    }
}

impl FromStr for InputSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(s))
        })
    }
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input video file path, or `-` for stdin
    #[arg(short, long)]
    pub input: InputSource,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the trim command
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Input video file path, or `-` for stdin
    #[arg(short, long)]
    pub input: InputSource,

    /// Start time (seconds, MM:SS.ms, or HH:MM:SS.ms) [default: 0]
    #[arg(short, long, allow_hyphen_values = true)]
    pub start: Option<TimeSpec>,

    /// End time (seconds, MM:SS.ms, or HH:MM:SS.ms) [default: full duration]
    #[arg(short, long, allow_hyphen_values = true)]
    pub end: Option<TimeSpec>,

    /// Output file path [default: <input>_trim_<start>_<end>.mp4]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output the outcome in JSON format
    #[arg(long)]
    pub json: bool,

    /// Probe the trimmed file and log its duration
    #[arg(long)]
    pub verify: bool,
}
