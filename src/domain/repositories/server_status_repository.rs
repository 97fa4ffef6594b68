//! # Server Status Repository Traits
//!
//! BKC ステータスの読み取りと書き出し

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::server_status::ServerStatus;

/// バージョンファイルの読み取り
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ServerStatusRepository: Send + Sync {
    /// `marker` を含む最初の行（前後の空白を除く）
    async fn read_version_line(&self, path: &Path, marker: &str) -> Result<Option<String>>;
}

/// ステータス表の書き出し
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusExportRepository: Send + Sync {
    async fn save(&self, path: &Path, statuses: &[ServerStatus]) -> Result<()>;
}
