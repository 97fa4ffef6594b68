//! # Result Tree Repository Trait
//!
//! 結果ツリー（ローカル/ネットワーク共有）の参照とコピーを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::tree_entry::{DirListing, FileEntry};

/// 結果ツリーリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResultTreeRepository: Send + Sync {
    /// パスが存在するか（UNC 共有では数秒かかることがある）
    async fn exists(&self, path: &Path) -> bool;

    /// パスがフォルダか
    async fn is_dir(&self, path: &Path) -> bool;

    /// 1階層分の一覧（名前順）
    async fn list_dir(&self, dir: &Path) -> Result<DirListing>;

    /// 1階層分のファイルとフォルダを更新日時つきで返す（名前順）
    async fn list_entries(&self, dir: &Path) -> Result<Vec<FileEntry>>;

    /// 配下の全ファイル（再帰、パス順）
    async fn list_files_recursive(&self, dir: &Path) -> Result<Vec<FileEntry>>;

    /// フォルダを作成する（既存なら何もしない）
    async fn create_dir_all(&self, dir: &Path) -> Result<()>;

    /// ファイルをコピーする
    ///
    /// コピー先の親フォルダを作成し、更新日時を保持する
    async fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;

    /// フォルダを丸ごとコピーし、コピーしたファイル数を返す
    async fn copy_tree(&self, from: &Path, to: &Path) -> Result<usize>;

    /// フォルダを丸ごと削除する
    async fn remove_tree(&self, dir: &Path) -> Result<()>;
}
