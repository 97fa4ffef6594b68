//! # Collect Thermal Data Use Case
//!
//! 温度プロファイルの測定データ収集ユースケース

use anyhow::{bail, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::measurement::{SheetOutcome, ThermalDataset};
use crate::domain::entities::run_folder::{in_filter_scope, is_versioned};
use crate::domain::repositories::result_tree_repository::ResultTreeRepository;
use crate::domain::repositories::workbook_repository::WorkbookRepository;
use crate::domain::services::retention::RetentionService;

/// 最新の実行フォルダだけを読むサブフォルダ名
pub const LATEST_ONLY_SUBFOLDER: &str = "HotVmin";

/// 一時ロックファイルの接頭辞（Excel が開いている間に作る `~$xxx.xlsx`）
const LOCK_FILE_PREFIX: &str = "~$";

/// `D3` / `D4` を名前に含むメインフォルダ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainFolder {
    pub name: String,
    pub path: PathBuf,
}

/// 測定データ収集ユースケース
pub struct CollectThermalDataUseCase<T: ResultTreeRepository, W: WorkbookRepository> {
    tree: Arc<T>,
    workbooks: Arc<W>,
}

impl<T: ResultTreeRepository, W: WorkbookRepository> CollectThermalDataUseCase<T, W> {
    pub fn new(tree: Arc<T>, workbooks: Arc<W>) -> Self {
        Self { tree, workbooks }
    }

    /// ルート直下のメインフォルダ（名前順）
    ///
    /// # Errors
    ///
    /// 1つも見つからない場合、またはルートを一覧できない場合にエラーを返す
    pub async fn main_folders(&self, root: &Path) -> Result<Vec<MainFolder>> {
        let listing = self.tree.list_dir(root).await?;
        let folders: Vec<MainFolder> = listing
            .dirs
            .into_iter()
            .filter(|name| in_filter_scope(name))
            .map(|name| MainFolder {
                path: root.join(&name),
                name,
            })
            .collect();

        if folders.is_empty() {
            bail!("No D3/D4 folders found under {}", root.display());
        }
        Ok(folders)
    }

    /// メインフォルダ1つ分の測定データを集める
    ///
    /// ブック単位の失敗はログに出してスキップする
    pub async fn execute(&self, main: &MainFolder) -> Result<ThermalDataset> {
        info!("=== PROCESSING MAIN FOLDER: {} ===", main.name);
        let mut dataset = ThermalDataset::default();

        let subfolders = self.tree.list_dir(&main.path).await?.dirs;
        info!("Sub-folders found: {:?}", subfolders);

        for subfolder in &subfolders {
            let subfolder_path = main.path.join(subfolder);
            info!("Handling sub-folder: {}", subfolder);

            if subfolder == LATEST_ONLY_SUBFOLDER {
                let listing = self.tree.list_dir(&subfolder_path).await?;
                match RetentionService::latest_run_folder(&subfolder_path, &listing.dirs) {
                    Some(latest) => {
                        info!("Latest HotVmin timestamp → {} ({})", latest.name, latest.stamp.as_datetime());
                        self.collect_workbooks(&latest.path, &latest.name, &mut dataset)
                            .await?;
                    }
                    None => {
                        info!("No timestamped sub-folders inside {}", subfolder_path.display());
                        info!("No HotVmin data processed");
                    }
                }
            } else {
                self.collect_workbooks(&subfolder_path, subfolder, &mut dataset)
                    .await?;
            }
        }

        info!("Collected sub-folders with data: {:?}", dataset.category_names());
        Ok(dataset)
    }

    async fn collect_workbooks(
        &self,
        dir: &Path,
        category: &str,
        dataset: &mut ThermalDataset,
    ) -> Result<()> {
        let files = self.tree.list_files_recursive(dir).await?;
        for file in files.iter().filter(|f| is_candidate_workbook(&f.name)) {
            if file.name.starts_with(LOCK_FILE_PREFIX) {
                info!("Skipped temporary Excel file: {}", file.path.display());
                continue;
            }

            match self.workbooks.read_measurements(&file.path).await {
                Ok(SheetOutcome::MissingColumns(missing)) => {
                    info!("Missing columns {:?} in {} – SKIPPED", missing, file.path.display());
                }
                Ok(SheetOutcome::Rows(rows)) if rows.is_empty() => {
                    info!("No rows with all required columns in {} – SKIPPED", file.path.display());
                }
                Ok(SheetOutcome::Rows(rows)) => {
                    let total = dataset.append(category, &rows);
                    info!(
                        "Added {} rows from {} → total now {}",
                        rows.len(),
                        file.path.display(),
                        total
                    );
                }
                Err(e) => {
                    warn!("Failed to read {}: {:#}", file.path.display(), e);
                }
            }
        }
        Ok(())
    }
}

/// `.xlsx` で、名前に `HotVmin` / `HotGNG` を含むもの
fn is_candidate_workbook(name: &str) -> bool {
    name.ends_with(".xlsx") && is_versioned(name)
}
