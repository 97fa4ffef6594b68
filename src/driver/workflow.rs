//! Workflow Orchestration
//!
//! パイプラインのオーケストレーション

use anyhow::Result;
use chrono::Local;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapter::config::{expand, Config};
use crate::adapter::report::pptx_report_repository::PptxReportRepository;
use crate::adapter::repositories::fs_result_tree_repository::FsResultTreeRepository;
use crate::adapter::repositories::fs_server_status_repository::FsServerStatusRepository;
use crate::adapter::repositories::xlsx_status_export_repository::XlsxStatusExportRepository;
use crate::adapter::repositories::xlsx_workbook_repository::XlsxWorkbookRepository;
use crate::application::dto::mirror_options::{MirrorMode, MirrorOptions};
use crate::application::use_cases::build_thermal_report::BuildThermalReportUseCase;
use crate::application::use_cases::collect_thermal_data::CollectThermalDataUseCase;
use crate::application::use_cases::extract_bkc_status::{BkcTargets, ExtractBkcStatusUseCase};
use crate::application::use_cases::mirror_results::MirrorResultsUseCase;
use crate::domain::entities::server_status::status_table;

use super::cli::Command;

/// エラー分類で使う、失敗した処理の説明
pub fn failed_action(command: &Command) -> &'static str {
    match command {
        Command::Mirror { .. } => "copy folder",
        Command::Thermal => "build thermal report",
        Command::Bkc => "extract BKC status",
    }
}

/// `Copy completed at 18:18:05 +08:00, 2025-09-02`
pub fn completion_line<Tz: chrono::TimeZone>(at: chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("Copy completed at {}", at.format("%H:%M:%S %:z, %Y-%m-%d"))
}

/// 実行ホスト名（取得できなければ "unknown"）
fn host_name() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Result Filter Workflow
pub struct ResultFilterWorkflow {
    config: Config,
    tree: Arc<FsResultTreeRepository>,
    mirror_use_case: MirrorResultsUseCase<FsResultTreeRepository>,
    collect_use_case: CollectThermalDataUseCase<FsResultTreeRepository, XlsxWorkbookRepository>,
    report_use_case: BuildThermalReportUseCase<PptxReportRepository>,
}

impl ResultFilterWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        // Repository implementations
        let tree = Arc::new(FsResultTreeRepository::new());
        let workbooks = Arc::new(XlsxWorkbookRepository::new());
        let reports = Arc::new(PptxReportRepository::new());

        // Use Cases construction
        let mirror_use_case = MirrorResultsUseCase::new(tree.clone());
        let collect_use_case = CollectThermalDataUseCase::new(tree.clone(), workbooks);
        let report_use_case = BuildThermalReportUseCase::new(reports);

        Self {
            config,
            tree,
            mirror_use_case,
            collect_use_case,
            report_use_case,
        }
    }

    /// 権限エラー時に表示する対象
    pub fn error_target(&self, command: &Command) -> String {
        match command {
            Command::Mirror { .. } => self.config.mirror.destination.clone(),
            Command::Thermal => self.config.thermal.summary_dir.clone(),
            Command::Bkc => self.config.bkc.output.clone(),
        }
    }

    /// Execute the selected pipeline
    pub async fn execute(&self, command: &Command) -> Result<()> {
        match command {
            Command::Mirror { mode, dry_run } => self.mirror((*mode).into(), *dry_run).await,
            Command::Thermal => self.thermal().await,
            Command::Bkc => self.bkc().await,
        }
    }

    async fn mirror(&self, mode: MirrorMode, dry_run: bool) -> Result<()> {
        let config = &self.config.mirror;
        info!("Starting result mirror on {}", host_name());
        info!("Mode: {:?}, dry run: {}", mode, dry_run);

        let sources: Vec<PathBuf> = config.sources.iter().map(|s| expand(s)).collect();
        let options = MirrorOptions::new(sources, expand(&config.destination))
            .with_required_keywords(config.required_keywords.clone())
            .with_mode(mode)
            .with_dry_run(dry_run);

        println!("✓ Using configuration:");
        for source in &options.sources {
            println!("  Source: {}", source.display());
        }
        println!("  Destination: {}", options.destination.display());

        let summary = self.mirror_use_case.execute(&options).await?;

        info!("All desired folders and files from all sources are copied");
        info!("{}", completion_line(Local::now()));

        if dry_run {
            println!("✓ Dry-run mode (nothing was copied or removed)");
        }
        println!(
            "✓ Copied {} files, {} run folders ({} older files and {} folders skipped)",
            summary.copied_files,
            summary.copied_run_folders,
            summary.skipped_files,
            summary.skipped_folders
        );
        if summary.removed_folders > 0 {
            println!("✓ Removed {} stale run folders", summary.removed_folders);
        }
        if summary.skipped_sources > 0 {
            println!("⚠ {} sources were not reachable", summary.skipped_sources);
        }
        println!("✓ Mirror complete!");

        Ok(())
    }

    async fn thermal(&self) -> Result<()> {
        let config = &self.config.thermal;
        let root = expand(&config.root);
        let summary_dir = expand(&config.summary_dir);
        info!("Starting thermal profiling report for {}", root.display());

        let mains = self.collect_use_case.main_folders(&root).await?;
        println!("✓ Found {} D3/D4 folders in {}", mains.len(), root.display());

        let mut written = 0;
        for main in &mains {
            let dataset = self.collect_use_case.execute(main).await?;
            let generated_at = Local::now().naive_local();
            if let Some(path) = self
                .report_use_case
                .execute(&main.name, &dataset, &summary_dir, generated_at)
                .await?
            {
                println!("✓ PowerPoint saved: {}", path.display());
                written += 1;
            }
        }

        println!("✓ Thermal report complete! ({} presentations)", written);
        Ok(())
    }

    async fn bkc(&self) -> Result<()> {
        let config = &self.config.bkc;
        let targets = BkcTargets {
            servers: config.servers.clone(),
            version_file: config.version_file.clone(),
            triplet_dir: config.triplet_dir.clone(),
        };
        let use_case = ExtractBkcStatusUseCase::new(
            self.tree.clone(),
            Arc::new(FsServerStatusRepository::new()),
            Arc::new(XlsxStatusExportRepository::new()),
        );

        let statuses = use_case.collect(&targets).await;
        print!("{}", status_table(&statuses));

        let output = expand(&config.output);
        use_case.save(&output, &statuses).await?;
        println!("✓ Data saved to {}", output.display());

        Ok(())
    }
}
