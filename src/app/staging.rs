//! Per-invocation scratch directory
//!
//! The staging area holds the staged input (when the video arrives on stdin)
//! and the trim output until it is delivered. The whole directory is removed
//! when the area is dropped, on every exit path.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::{debug, info};

use crate::domain::model::TrimOutcome;
use crate::error::{Mp4TrimError, Mp4TrimResult};

const STAGED_INPUT_NAME: &str = "input.mp4";
const STAGED_OUTPUT_NAME: &str = "output.mp4";

/// Scoped scratch directory for one trim
pub struct StagingArea {
    dir: TempDir,
}

impl StagingArea {
    /// Create a staging area under the system temp directory
    pub fn new() -> Mp4TrimResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix("mp4trim-")
            .tempdir()
            .map_err(|source| Mp4TrimError::Staging {
                message: "could not create scratch directory".to_string(),
                source,
            })?;
        debug!(dir = %dir.path().display(), "Created staging area");
        Ok(Self { dir })
    }

    /// Create a staging area under `parent`
    pub fn new_in(parent: &Path) -> Mp4TrimResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix("mp4trim-")
            .tempdir_in(parent)
            .map_err(|source| Mp4TrimError::Staging {
                message: format!("could not create scratch directory in {}", parent.display()),
                source,
            })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_path(&self) -> PathBuf {
        self.dir.path().join(STAGED_INPUT_NAME)
    }

    /// Where the trim tool writes before delivery
    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join(STAGED_OUTPUT_NAME)
    }

    /// Copy a video stream (e.g. stdin) into the staged input file
    pub async fn stage_reader<R>(&self, reader: &mut R) -> Mp4TrimResult<PathBuf>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let path = self.input_path();
        let staging_error = |source: std::io::Error| Mp4TrimError::Staging {
            message: format!("could not stage input into {}", path.display()),
            source,
        };

        let mut file = tokio::fs::File::create(&path).await.map_err(staging_error)?;
        let bytes = tokio::io::copy(reader, &mut file).await.map_err(staging_error)?;
        file.flush().await.map_err(staging_error)?;

        info!(bytes, path = %path.display(), "Staged input");
        Ok(path)
    }

    /// Hand the staged output over to `destination`, only for a successful trim
    ///
    /// Returns the outcome to report: `Success` pointing at `destination`, the
    /// original failure unchanged, or `UnexpectedFailure` when the copy fails.
    /// A failed outcome never produces or modifies a file at `destination`.
    pub async fn deliver(&self, outcome: TrimOutcome, destination: &Path) -> TrimOutcome {
        let Some(staged) = outcome.output_path() else {
            return outcome;
        };

        match persist_copy(staged, destination).await {
            Ok(bytes) => {
                info!(bytes, destination = %destination.display(), "Delivered trimmed video");
                TrimOutcome::Success {
                    output_path: destination.to_path_buf(),
                }
            }
            Err(err) => TrimOutcome::UnexpectedFailure {
                message: err.to_string(),
            },
        }
    }

    /// Remove the directory now, reporting failures instead of ignoring them
    pub fn close(self) -> Mp4TrimResult<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|source| Mp4TrimError::Staging {
            message: format!("could not remove {}", path.display()),
            source,
        })
    }
}

/// Copy `staged` next to `destination`, then rename it into place
///
/// The destination is replaced atomically; a failed copy leaves it as it was.
async fn persist_copy(staged: &Path, destination: &Path) -> Mp4TrimResult<u64> {
    let output_error = |source: std::io::Error| Mp4TrimError::OutputError {
        path: destination.to_path_buf(),
        source,
    };

    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let partial = tempfile::Builder::new()
        .prefix(".mp4trim-")
        .suffix(".part")
        .tempfile_in(parent)
        .map_err(output_error)?;

    // Dropping `partial` on any error below removes the temporary file
    let bytes = tokio::fs::copy(staged, partial.path())
        .await
        .map_err(output_error)?;
    partial
        .persist(destination)
        .map_err(|err| output_error(err.error))?;
    Ok(bytes)
}
