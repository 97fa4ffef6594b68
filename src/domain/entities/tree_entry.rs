//! # Tree Entry
//!
//! 結果ツリーの一覧結果

use std::path::PathBuf;
use std::time::SystemTime;

/// ファイル（またはフォルダ）と更新日時
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub modified: SystemTime,
}

impl FileEntry {
    pub fn new(path: PathBuf, modified: SystemTime) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            path,
            name,
            modified,
        }
    }
}

/// 1階層分のフォルダ一覧
///
/// `dirs` はサブフォルダ名、`files` は直下のファイル。どちらも名前順
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    pub dirs: Vec<String>,
    pub files: Vec<FileEntry>,
}
