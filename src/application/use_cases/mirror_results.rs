//! # Mirror Results Use Case
//!
//! 結果フォルダのミラーユースケース
//!
//! コピー元ツリーを上から辿り、`D3` / `D4` 配下では保持ルールに合うフォルダだけに
//! 降りていく。途中で失敗した場合、コピー先は更新途中のまま残る

use anyhow::Result;
use chrono::{DateTime, Local};
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::application::dto::mirror_options::{MirrorMode, MirrorOptions};
use crate::application::dto::mirror_summary::MirrorSummary;
use crate::domain::entities::run_folder::{
    in_filter_scope, is_excluded, is_versioned, RunFolder, RunStamp, EXCLUDED_FOLDER_NAME,
    LEGACY_MARKER,
};
use crate::domain::entities::tree_entry::FileEntry;
use crate::domain::repositories::result_tree_repository::ResultTreeRepository;
use crate::domain::services::retention::RetentionService;

/// バージョン管理フォルダの判定結果
enum RunFolderCheck {
    /// タイムスタンプ名のサブフォルダがない
    NoRunFolder,
    /// 最新の実行フォルダに必須ファイルがない
    MissingKeyword,
    Qualified { run: RunFolder, file: FileEntry },
}

/// コピー先のバージョン管理フォルダ → 全ソース中で最新の実行フォルダ
type ReplacementPlan = HashMap<PathBuf, RunFolder>;

/// 結果フォルダのミラーユースケース
pub struct MirrorResultsUseCase<R: ResultTreeRepository> {
    tree: Arc<R>,
}

impl<R: ResultTreeRepository> MirrorResultsUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `tree` - 結果ツリーリポジトリ
    pub fn new(tree: Arc<R>) -> Self {
        Self { tree }
    }

    /// 全コピー元をコピー先へミラーする
    ///
    /// # Errors
    ///
    /// コピー先の親フォルダがない場合、または一覧・コピーに失敗した場合にエラーを返す
    pub async fn execute(&self, options: &MirrorOptions) -> Result<MirrorSummary> {
        self.prepare_destination(options).await?;

        let mut summary = MirrorSummary::default();
        let plan = match options.mode {
            MirrorMode::Replace => self.plan_replacements(options).await?,
            _ => ReplacementPlan::new(),
        };
        let mut applied = HashSet::new();

        for source in &options.sources {
            if !self.tree.is_dir(source).await {
                warn!(
                    "Source folder '{}' does not exist. Skipping...",
                    source.display()
                );
                summary.skipped_sources += 1;
                continue;
            }

            info!("Processing source folder: {}", source.display());
            self.mirror_source(source, options, &plan, &mut applied, &mut summary)
                .await?;
        }

        Ok(summary)
    }

    async fn prepare_destination(&self, options: &MirrorOptions) -> Result<()> {
        let parent = match options.destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !self.tree.exists(&parent).await {
            return Err(io::Error::other(format!(
                "Parent directory '{}' does not exist. Please create it first.",
                parent.display()
            ))
            .into());
        }

        if !options.dry_run {
            self.tree.create_dir_all(&options.destination).await?;
        }
        Ok(())
    }

    /// 1つのコピー元を上から辿ってコピーする
    async fn mirror_source(
        &self,
        source: &Path,
        options: &MirrorOptions,
        plan: &ReplacementPlan,
        applied: &mut HashSet<PathBuf>,
        summary: &mut MirrorSummary,
    ) -> Result<()> {
        let mut stack = vec![PathBuf::new()];

        while let Some(relative) = stack.pop() {
            let dir = join_relative(source, &relative);
            let dest_dir = join_relative(&options.destination, &relative);
            let dir_name = name_of(&dir);
            let listing = self.tree.list_dir(&dir).await?;

            let mut children = listing.dirs.clone();
            if in_filter_scope(&relative.to_string_lossy()) {
                children = match options.mode {
                    MirrorMode::Contains => self.children_with_marker(&dir, &children, summary).await?,
                    _ => {
                        self.retained_children(&dir, &children, &options.required_keywords, summary)
                            .await?
                    }
                };

                if options.mode != MirrorMode::Contains && is_versioned(&dir_name) {
                    if let Some(latest) = RetentionService::latest_run_folder(&dir, &listing.dirs) {
                        children.retain(|name| {
                            let keep = *name == latest.name;
                            if !keep {
                                info!(
                                    "Ignoring timestamp folder '{}' as it is not the latest.",
                                    dir.join(name).display()
                                );
                                summary.skipped_folders += 1;
                            }
                            keep
                        });
                    }
                }

                if options.mode == MirrorMode::Replace {
                    let mut descend = Vec::with_capacity(children.len());
                    for name in children {
                        if is_versioned(&name) {
                            self.replace_run_folder(
                                &dir.join(&name),
                                &dest_dir.join(&name),
                                plan,
                                applied,
                                options,
                                summary,
                            )
                            .await?;
                        } else {
                            descend.push(name);
                        }
                    }
                    children = descend;
                }
            }

            self.copy_files(&dir, &dir_name, &dest_dir, &listing.files, options, summary)
                .await?;

            for name in children.iter().rev() {
                stack.push(relative.join(name));
            }
        }

        Ok(())
    }

    /// 対象範囲内のフォルダで、降りていくサブフォルダを決める
    async fn retained_children(
        &self,
        dir: &Path,
        dirs: &[String],
        keywords: &[String],
        summary: &mut MirrorSummary,
    ) -> Result<Vec<String>> {
        let mut kept = Vec::with_capacity(dirs.len());

        for name in dirs {
            let child = dir.join(name);
            if is_excluded(name) {
                info!(
                    "Ignoring folder '{}' as it matches the excluded name '{}'.",
                    child.display(),
                    EXCLUDED_FOLDER_NAME
                );
                summary.skipped_folders += 1;
                continue;
            }

            if is_versioned(name) {
                match self.check_run_folder(&child, keywords).await? {
                    RunFolderCheck::NoRunFolder => {
                        info!(
                            "Ignoring folder '{}' as it lacks valid timestamp folders.",
                            child.display()
                        );
                        summary.skipped_folders += 1;
                        continue;
                    }
                    RunFolderCheck::MissingKeyword => {
                        info!(
                            "Ignoring folder '{}' as the latest timestamp folder lacks a '{}' file.",
                            child.display(),
                            keywords.join("' or '")
                        );
                        summary.skipped_folders += 1;
                        continue;
                    }
                    RunFolderCheck::Qualified { run, file } => {
                        info!(
                            "Keeping folder '{}' with latest timestamp folder '{}' and '{}' (modified: {})",
                            child.display(),
                            run.name,
                            file.name,
                            ctime(file.modified)
                        );
                    }
                }
            }

            kept.push(name.clone());
        }

        Ok(kept)
    }

    /// 初期版の判定: 配下に `HotVmin` を名前に含むファイルがあるフォルダだけ残す
    async fn children_with_marker(
        &self,
        dir: &Path,
        dirs: &[String],
        summary: &mut MirrorSummary,
    ) -> Result<Vec<String>> {
        let mut kept = Vec::with_capacity(dirs.len());
        for name in dirs {
            let child = dir.join(name);
            let files = self.tree.list_files_recursive(&child).await?;
            if files.iter().any(|f| f.name.contains(LEGACY_MARKER)) {
                kept.push(name.clone());
            } else {
                info!(
                    "Ignoring folder '{}' as it does not contain a '{}' file.",
                    child.display(),
                    LEGACY_MARKER
                );
                summary.skipped_folders += 1;
            }
        }
        Ok(kept)
    }

    async fn check_run_folder(&self, versioned: &Path, keywords: &[String]) -> Result<RunFolderCheck> {
        let listing = self.tree.list_dir(versioned).await?;
        let Some(run) = RetentionService::latest_run_folder(versioned, &listing.dirs) else {
            return Ok(RunFolderCheck::NoRunFolder);
        };

        let files = self.tree.list_files_recursive(&run.path).await?;
        Ok(match RetentionService::first_keyword_match(&files, keywords) {
            Some((_, file)) => RunFolderCheck::Qualified {
                file: file.clone(),
                run,
            },
            None => RunFolderCheck::MissingKeyword,
        })
    }

    /// 1つのフォルダ直下のファイルをコピーする
    async fn copy_files(
        &self,
        dir: &Path,
        dir_name: &str,
        dest_dir: &Path,
        files: &[FileEntry],
        options: &MirrorOptions,
        summary: &mut MirrorSummary,
    ) -> Result<()> {
        if options.mode == MirrorMode::Contains {
            for file in files {
                self.copy_one(file, &dest_dir.join(&file.name), options, summary)
                    .await?;
            }
            return Ok(());
        }

        // バージョン管理フォルダ直下のファイルはコピーしない
        if is_versioned(dir_name) {
            return Ok(());
        }

        let in_run_folder = RunStamp::parse(dir_name).is_some()
            && dir.parent().map(|p| is_versioned(&name_of(p))).unwrap_or(false);
        let run_files = if in_run_folder && !files.is_empty() {
            Some(self.tree.list_files_recursive(dir).await?)
        } else {
            None
        };

        for file in files {
            if let Some(run_files) = &run_files {
                if let Some(keyword) = RetentionService::keyword_in_name(&file.name, &options.required_keywords) {
                    let newest = RetentionService::newest_matching(run_files, keyword);
                    if newest.is_some_and(|newest| newest.path != file.path) {
                        info!("Ignoring older '{}' in '{}'.", file.name, dir.display());
                        summary.skipped_files += 1;
                        continue;
                    }
                }
            }

            self.copy_one(file, &dest_dir.join(&file.name), options, summary)
                .await?;
        }

        Ok(())
    }

    async fn copy_one(
        &self,
        file: &FileEntry,
        destination: &Path,
        options: &MirrorOptions,
        summary: &mut MirrorSummary,
    ) -> Result<()> {
        if options.dry_run {
            info!("[dry-run] Would copy: {} to {}", file.name, destination.display());
        } else {
            self.tree.copy_file(&file.path, destination).await?;
            info!("Copied: {} to {}", file.name, destination.display());
        }
        summary.copied_files += 1;
        Ok(())
    }

    /// 1パス目: 全コピー元を見て、コピー先フォルダごとに最新の実行フォルダを決める
    async fn plan_replacements(&self, options: &MirrorOptions) -> Result<ReplacementPlan> {
        let mut plan = ReplacementPlan::new();

        for source in &options.sources {
            if !self.tree.is_dir(source).await {
                continue;
            }

            let mut stack = vec![PathBuf::new()];
            while let Some(relative) = stack.pop() {
                let dir = join_relative(source, &relative);
                let listing = self.tree.list_dir(&dir).await?;
                let in_scope = in_filter_scope(&relative.to_string_lossy());

                for name in listing.dirs.iter().rev() {
                    if in_scope && is_excluded(name) {
                        continue;
                    }
                    if in_scope && is_versioned(name) {
                        let RunFolderCheck::Qualified { run, .. } =
                            self.check_run_folder(&dir.join(name), &options.required_keywords).await?
                        else {
                            continue;
                        };

                        let dest = join_relative(&options.destination, &relative).join(name);
                        let newer = plan.get(&dest).map_or(true, |current| run.stamp > current.stamp);
                        if newer {
                            info!(
                                "Updated latest timestamp folder for '{}' to '{}' ({})",
                                dest.display(),
                                run.name,
                                run.path.display()
                            );
                            plan.insert(dest, run);
                        }
                        continue;
                    }
                    stack.push(relative.join(name));
                }
            }
        }

        Ok(plan)
    }

    /// 2パス目: コピー先の古い実行フォルダを削除し、最新の実行フォルダを丸ごとコピーする
    ///
    /// 最新の実行フォルダを持つコピー元でだけ、コピー先ごとに1回だけ行う
    async fn replace_run_folder(
        &self,
        versioned: &Path,
        dest_versioned: &Path,
        plan: &ReplacementPlan,
        applied: &mut HashSet<PathBuf>,
        options: &MirrorOptions,
        summary: &mut MirrorSummary,
    ) -> Result<()> {
        let Some(winner) = plan.get(dest_versioned) else {
            return Ok(());
        };
        if applied.contains(dest_versioned) || winner.path.parent() != Some(versioned) {
            return Ok(());
        }

        if self.tree.is_dir(dest_versioned).await {
            let existing = self.tree.list_dir(dest_versioned).await?;
            for name in existing.dirs.iter().filter(|n| RunStamp::parse(n).is_some()) {
                let stale = dest_versioned.join(name);
                if options.dry_run {
                    info!("[dry-run] Would remove timestamp folder '{}'.", stale.display());
                } else {
                    self.tree.remove_tree(&stale).await?;
                    info!("Removed timestamp folder '{}'.", stale.display());
                }
                summary.removed_folders += 1;
            }
        }

        let target = dest_versioned.join(&winner.name);
        if options.dry_run {
            let files = self.tree.list_files_recursive(&winner.path).await?;
            summary.copied_files += files.len();
            info!(
                "[dry-run] Would copy timestamp folder '{}' to '{}' ({} files)",
                winner.name,
                target.display(),
                files.len()
            );
        } else {
            let copied = self.tree.copy_tree(&winner.path, &target).await?;
            summary.copied_files += copied;
            info!(
                "Copied timestamp folder '{}' to '{}'",
                winner.name,
                target.display()
            );
        }
        summary.copied_run_folders += 1;
        applied.insert(dest_versioned.to_path_buf());

        Ok(())
    }
}

fn join_relative(base: &Path, relative: &Path) -> PathBuf {
    if relative.as_os_str().is_empty() {
        base.to_path_buf()
    } else {
        base.join(relative)
    }
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// `Fri Jul 25 19:28:10 2025` 形式
fn ctime(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%a %b %e %H:%M:%S %Y")
        .to_string()
}
