//! File System Server Status Repository
//!
//! ServerStatusRepositoryの実装（version.ini をテキストとして読む）

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::Path;

use super::run_blocking;
use crate::domain::repositories::server_status_repository::ServerStatusRepository;

pub struct FsServerStatusRepository;

impl FsServerStatusRepository {
    pub fn new() -> Self {
        Self
    }

    fn read_version_line_sync(path: &Path, marker: &str) -> Result<Option<String>> {
        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let content = String::from_utf8_lossy(&bytes);
        Ok(content
            .lines()
            .find(|line| line.contains(marker))
            .map(|line| line.trim().to_string()))
    }
}

#[async_trait]
impl ServerStatusRepository for FsServerStatusRepository {
    async fn read_version_line(&self, path: &Path, marker: &str) -> Result<Option<String>> {
        let (path, marker) = (path.to_path_buf(), marker.to_string());
        run_blocking(move || Self::read_version_line_sync(&path, &marker)).await
    }
}

impl Default for FsServerStatusRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_first_matching_line_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("version.ini");
        fs::write(
            &path,
            "[info]\n  pythonsv_version = 25ww31.2  \r\npythonsv_version = older\n",
        )
        .unwrap();

        let line = FsServerStatusRepository::new()
            .read_version_line(&path, "pythonsv_version")
            .await
            .unwrap();

        assert_eq!(line.as_deref(), Some("pythonsv_version = 25ww31.2"));
    }

    #[tokio::test]
    async fn test_no_matching_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("version.ini");
        fs::write(&path, "[info]\nother = 1\n").unwrap();

        let line = FsServerStatusRepository::new()
            .read_version_line(&path, "pythonsv_version")
            .await
            .unwrap();
        assert!(line.is_none());
    }
}
