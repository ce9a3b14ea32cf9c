// Local filesystem adapter - File system operations through tokio::fs

use std::io;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::ports::FsPort;

/// Local filesystem adapter
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        match tokio::fs::metadata(file_path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::Unexpected(format!(
                "Failed to inspect {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn remove_file(&self, file_path: &Path) -> Result<bool, DomainError> {
        match tokio::fs::remove_file(file_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::Unexpected(format!(
                "Failed to delete {}: {}",
                file_path.display(),
                e
            ))),
        }
    }
}
