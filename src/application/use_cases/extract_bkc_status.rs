//! # Extract BKC Status Use Case
//!
//! テストホストの BKC ステータス抽出ユースケース

use anyhow::Result;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::server_status::{ServerStatus, TRIPLET_PREFIX, VERSION_MARKER};
use crate::domain::repositories::result_tree_repository::ResultTreeRepository;
use crate::domain::repositories::server_status_repository::{
    ServerStatusRepository, StatusExportRepository,
};
use crate::domain::services::retention::RetentionService;

/// サーバー名を埋め込むプレースホルダ
pub const SERVER_PLACEHOLDER: &str = "{server}";

/// 抽出対象
#[derive(Debug, Clone)]
pub struct BkcTargets {
    pub servers: Vec<String>,
    /// 例: `//{server}/c$/pythonsv/version.ini`
    pub version_file: String,
    /// 例: `//{server}/c$/Intel/Triplet_Logs`
    pub triplet_dir: String,
}

impl BkcTargets {
    pub fn version_path(&self, server: &str) -> PathBuf {
        PathBuf::from(self.version_file.replace(SERVER_PLACEHOLDER, server))
    }

    pub fn triplet_path(&self, server: &str) -> PathBuf {
        PathBuf::from(self.triplet_dir.replace(SERVER_PLACEHOLDER, server))
    }

    /// 設定順のまま重複を除いたサーバー
    fn unique_servers(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for server in &self.servers {
            if !seen.contains(&server.as_str()) {
                seen.push(server.as_str());
            }
        }
        seen
    }
}

/// BKC ステータス抽出ユースケース
pub struct ExtractBkcStatusUseCase<T, S, E>
where
    T: ResultTreeRepository,
    S: ServerStatusRepository,
    E: StatusExportRepository,
{
    tree: Arc<T>,
    versions: Arc<S>,
    export: Arc<E>,
}

impl<T, S, E> ExtractBkcStatusUseCase<T, S, E>
where
    T: ResultTreeRepository,
    S: ServerStatusRepository,
    E: StatusExportRepository,
{
    pub fn new(tree: Arc<T>, versions: Arc<S>, export: Arc<E>) -> Self {
        Self {
            tree,
            versions,
            export,
        }
    }

    /// 全サーバーのステータスを集める
    ///
    /// サーバー単位の失敗はログに出して続行する。どちらの情報もないサーバーは含めない
    pub async fn collect(&self, targets: &BkcTargets) -> Vec<ServerStatus> {
        let mut statuses = Vec::new();

        for server in targets.unique_servers() {
            let mut status = ServerStatus::new(server);
            status.version_info = self.version_info(&targets.version_path(server)).await;
            status.triplet_info = self.latest_triplet(&targets.triplet_path(server)).await;

            if status.is_empty() {
                continue;
            }
            statuses.push(status);
        }

        statuses
    }

    /// ステータスを書き出す
    pub async fn save(&self, output: &Path, statuses: &[ServerStatus]) -> Result<()> {
        self.export.save(output, statuses).await?;
        info!("Data saved to {}", output.display());
        Ok(())
    }

    async fn version_info(&self, path: &Path) -> Option<String> {
        if !self.tree.exists(path).await {
            warn!("File does not exist: {}", path.display());
            return None;
        }
        match self.versions.read_version_line(path, VERSION_MARKER).await {
            Ok(line) => line,
            Err(e) => {
                warn!("Error reading {}: {:#}", path.display(), e);
                None
            }
        }
    }

    async fn latest_triplet(&self, dir: &Path) -> Option<String> {
        if !self.tree.exists(dir).await {
            warn!("Path does not exist: {}", dir.display());
            return None;
        }
        // Triplet_* はファイルでもフォルダでもよい
        match self.tree.list_entries(dir).await {
            Ok(entries) => RetentionService::newest_file(
                entries.iter().filter(|e| e.name.starts_with(TRIPLET_PREFIX)),
            )
            .map(|e| e.name.clone()),
            Err(e) => {
                warn!("Error accessing {}: {:#}", dir.display(), e);
                None
            }
        }
    }
}
