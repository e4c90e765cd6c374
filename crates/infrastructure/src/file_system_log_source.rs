use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use portal_application::SystemLogSource;
use portal_core::{AppError, AppResult};

/// Reads the plain-text system log from disk.
#[derive(Debug, Clone)]
pub struct FileSystemLogSource {
    path: PathBuf,
}

impl FileSystemLogSource {
    /// Creates a source for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SystemLogSource for FileSystemLogSource {
    async fn read_lines(&self) -> AppResult<Vec<String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_owned)
                .collect()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(AppError::Internal(format!(
                "failed to read system log '{}': {error}",
                self.path.display()
            ))),
        }
    }
}
