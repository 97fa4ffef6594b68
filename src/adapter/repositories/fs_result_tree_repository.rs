//! File System Result Tree Repository
//!
//! ResultTreeRepositoryのファイルシステム実装（ローカルドライブ・UNC 共有）

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::run_blocking;
use crate::domain::entities::tree_entry::{DirListing, FileEntry};
use crate::domain::repositories::result_tree_repository::ResultTreeRepository;

/// ファイルシステムベースの結果ツリーリポジトリ
pub struct FsResultTreeRepository;

impl FsResultTreeRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    fn list_dir_sync(dir: &Path) -> Result<DirListing> {
        let mut listing = DirListing::default();

        for entry in fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
            let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
            let path = entry.path();
            if path.is_dir() {
                listing.dirs.push(entry.file_name().to_string_lossy().to_string());
            } else if path.is_file() {
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .with_context(|| format!("Failed to read metadata of {}", path.display()))?;
                listing.files.push(FileEntry::new(path, modified));
            }
        }

        listing.dirs.sort();
        listing.files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listing)
    }

    fn list_entries_sync(dir: &Path) -> Result<Vec<FileEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
            let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
            let path = entry.path();
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .with_context(|| format!("Failed to read metadata of {}", path.display()))?;
            entries.push(FileEntry::new(path, modified));
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn list_files_recursive_sync(dir: &Path) -> Result<Vec<FileEntry>> {
        let mut files: Vec<FileEntry> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let modified = e.metadata().ok()?.modified().ok()?;
                Some(FileEntry::new(e.into_path(), modified))
            })
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    /// shutil.copy2 と同じく更新日時も保持する
    fn copy_file_sync(from: &Path, to: &Path) -> Result<()> {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(from, to)
            .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;

        let modified = fs::metadata(from).and_then(|m| m.modified())?;
        File::options()
            .write(true)
            .open(to)
            .and_then(|f| f.set_modified(modified))
            .with_context(|| format!("Failed to set modification time of {}", to.display()))?;
        Ok(())
    }

    fn copy_tree_sync(from: &Path, to: &Path) -> Result<usize> {
        let mut copied = 0;
        for entry in WalkDir::new(from).follow_links(true) {
            let entry = entry.with_context(|| format!("Failed to walk {}", from.display()))?;
            let relative = entry.path().strip_prefix(from)?;
            let target = to.join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)
                    .with_context(|| format!("Failed to create {}", target.display()))?;
            } else {
                Self::copy_file_sync(entry.path(), &target)?;
                copied += 1;
            }
        }
        Ok(copied)
    }
}

#[async_trait]
impl ResultTreeRepository for FsResultTreeRepository {
    async fn exists(&self, path: &Path) -> bool {
        let path = path.to_path_buf();
        run_blocking(move || Ok(path.exists())).await.unwrap_or(false)
    }

    async fn is_dir(&self, path: &Path) -> bool {
        let path = path.to_path_buf();
        run_blocking(move || Ok(path.is_dir())).await.unwrap_or(false)
    }

    async fn list_dir(&self, dir: &Path) -> Result<DirListing> {
        let dir = dir.to_path_buf();
        run_blocking(move || Self::list_dir_sync(&dir)).await
    }

    async fn list_entries(&self, dir: &Path) -> Result<Vec<FileEntry>> {
        let dir = dir.to_path_buf();
        run_blocking(move || Self::list_entries_sync(&dir)).await
    }

    async fn list_files_recursive(&self, dir: &Path) -> Result<Vec<FileEntry>> {
        let dir = dir.to_path_buf();
        run_blocking(move || Self::list_files_recursive_sync(&dir)).await
    }

    async fn create_dir_all(&self, dir: &Path) -> Result<()> {
        let dir = dir.to_path_buf();
        run_blocking(move || {
            fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))
        })
        .await
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        let (from, to) = (from.to_path_buf(), to.to_path_buf());
        run_blocking(move || Self::copy_file_sync(&from, &to)).await
    }

    async fn copy_tree(&self, from: &Path, to: &Path) -> Result<usize> {
        let (from, to): (PathBuf, PathBuf) = (from.to_path_buf(), to.to_path_buf());
        run_blocking(move || Self::copy_tree_sync(&from, &to)).await
    }

    async fn remove_tree(&self, dir: &Path) -> Result<()> {
        let dir = dir.to_path_buf();
        run_blocking(move || {
            fs::remove_dir_all(&dir).with_context(|| format!("Failed to remove {}", dir.display()))
        })
        .await
    }
}

impl Default for FsResultTreeRepository {
    fn default() -> Self {
        Self::new()
    }
}
