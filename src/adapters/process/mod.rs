//! External tool process runner
//!
//! Spawns a media tool with captured stdout/stderr, no stdin, and an optional
//! wall-clock limit. A run that exceeds its limit is killed.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished tool run
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Reasons a tool run produced no [`ToolOutput`]
#[derive(Debug, Error)]
pub enum RunError {
    /// Executable missing from the search path, or not executable
    #[error("`{}` could not be started: {source}", program.display())]
    NotFound {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Process exceeded its time limit and was killed
    #[error("`{}` timed out after {:.1}s and was killed", program.display(), limit.as_secs_f64())]
    TimedOut { program: PathBuf, limit: Duration },

    #[error("`{}` failed: {source}", program.display())]
    Io {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A single external tool invocation
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Option<Duration>,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Bound the run; `None` waits forever
    pub fn timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Space-joined command line, for logs only
    pub fn display_command(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    /// Run to completion and capture both output streams
    pub async fn run(&self) -> Result<ToolOutput, RunError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(command = %self.display_command(), timeout = ?self.timeout, "Spawning external tool");

        let child = command.spawn().map_err(|source| match source.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => RunError::NotFound {
                program: self.program.clone(),
                source,
            },
            _ => RunError::Io {
                program: self.program.clone(),
                source,
            },
        })?;

        // Dropping the wait future on timeout drops the child, which kills it
        let wait = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, wait)
                .await
                .map_err(|_| RunError::TimedOut {
                    program: self.program.clone(),
                    limit,
                })?,
            None => wait.await,
        }
        .map_err(|source| RunError::Io {
            program: self.program.clone(),
            source,
        })?;

        let result = ToolOutput {
            exit_code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            program = %self.program.display(),
            exit_code = ?result.exit_code,
            stderr_bytes = output.stderr.len(),
            "External tool finished"
        );
        Ok(result)
    }
}

/// Path argument for ffmpeg and ffprobe as a `file:` URL
///
/// Bare paths containing `:` are read as protocol URLs, and paths starting
/// with `-` as options.
pub fn file_url(path: &Path) -> OsString {
    let mut url = OsString::from("file:");
    url.push(path);
    url
}

/// Convert an optional seconds setting into a timeout, `0` meaning unbounded
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_not_found() {
        let err = ToolCommand::new("/definitely/not/here/ffmpeg")
            .arg("-version")
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::NotFound { .. }));
    }

    #[test]
    fn test_display_command_joins_arguments() {
        let command = ToolCommand::new("ffmpeg").args(["-ss", "5", "-i", "in.mp4"]);
        assert_eq!(command.display_command(), "ffmpeg -ss 5 -i in.mp4");
        assert_eq!(command.get_args().len(), 4);
    }

    #[test]
    fn test_file_url_prefixes_path() {
        assert_eq!(file_url(Path::new("take:2.mp4")), OsString::from("file:take:2.mp4"));
        assert_eq!(file_url(Path::new("/videos/-clip.mp4")), OsString::from("file:/videos/-clip.mp4"));
    }

    #[test]
    fn test_zero_seconds_disables_timeout() {
        assert_eq!(timeout_from_secs(0), None);
        assert_eq!(timeout_from_secs(30), Some(Duration::from_secs(30)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_exit_code_and_streams() {
        let output = ToolCommand::new("sh")
            .args(["-c", "echo out; echo err >&2; exit 3"])
            .run()
            .await
            .unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success);
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_process_times_out() {
        let started = std::time::Instant::now();
        let err = ToolCommand::new("sleep")
            .arg("5")
            .timeout(Some(Duration::from_millis(200)))
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::TimedOut { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
