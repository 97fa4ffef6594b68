//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod fs_result_tree_repository;
pub mod fs_server_status_repository;
pub mod xlsx_status_export_repository;
pub mod xlsx_workbook_repository;

use anyhow::Result;

/// 同期処理を tokio::task::spawn_blocking で実行する
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
}
