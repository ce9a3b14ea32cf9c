// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::model::{MediaProbeResult, TrimRequest};

/// Port for media metadata inspection
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Read the container-level duration of a media file
    ///
    /// Expected errors: `ProbeFailed` when the tool ran but produced no usable
    /// duration, `ToolMissing` when the tool could not be started.
    async fn probe_duration(&self, file_path: &Path) -> Result<MediaProbeResult, DomainError>;
}

/// Port for the stream-copy trim invocation
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Copy `[start, end)` of the request's input into its output path without re-encoding
    ///
    /// The range must already be validated. Overwrites the output path.
    async fn stream_copy(&self, request: &TrimRequest) -> Result<(), DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if a regular file exists at the path
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Remove a file, returning whether anything was removed
    async fn remove_file(&self, file_path: &Path) -> Result<bool, DomainError>;
}
