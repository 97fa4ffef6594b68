//! # RunFolder Entity
//!
//! タイムスタンプ名（`YYYY.MM.DD_HH.MM.SS`）の実行フォルダと、
//! 結果ツリーのフォルダ名に関する命名規則

use chrono::NaiveDateTime;
use std::fmt;
use std::path::PathBuf;

/// 実行フォルダ名のフォーマット（例: `2025.07.25_19.28.10`）
pub const RUN_STAMP_FORMAT: &str = "%Y.%m.%d_%H.%M.%S";

/// バージョン管理される結果フォルダの目印
pub const VERSIONED_MARKERS: [&str; 2] = ["HotVmin", "HotGNG"];

/// 最新のみ保持ルールの対象となるカテゴリの目印
pub const SCOPE_MARKERS: [&str; 2] = ["D3", "D4"];

/// 対象範囲内で常に無視するプレースホルダフォルダ
pub const EXCLUDED_FOLDER_NAME: &str = "99999999_999_+99_+99";

/// 実行フォルダに必須のファイルキーワード（この順に確認）
pub const DEFAULT_REQUIRED_KEYWORDS: [&str; 2] = ["HotVmin.xlsx", "HotGNG.xlsx"];

/// 初期版のフィルタが探していたファイル名の目印
pub const LEGACY_MARKER: &str = "HotVmin";

/// 実行フォルダ名から読み取った日時
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunStamp(NaiveDateTime);

impl RunStamp {
    /// フォルダ名を厳密にパースする
    ///
    /// フォーマットに一致しない名前は `None`
    pub fn parse(name: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(name, RUN_STAMP_FORMAT)
            .ok()
            .map(Self)
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RUN_STAMP_FORMAT))
    }
}

/// バージョン管理フォルダ配下の実行フォルダ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFolder {
    pub path: PathBuf,
    pub name: String,
    pub stamp: RunStamp,
}

/// 名前に `HotVmin` または `HotGNG` を含むか
pub fn is_versioned(name: &str) -> bool {
    VERSIONED_MARKERS.iter().any(|marker| name.contains(marker))
}

/// 相対パスが `D3` / `D4` の保持ルール対象範囲か
pub fn in_filter_scope(relative_path: &str) -> bool {
    SCOPE_MARKERS
        .iter()
        .any(|marker| relative_path.contains(marker))
}

/// 無視すべきプレースホルダフォルダか
pub fn is_excluded(name: &str) -> bool {
    name == EXCLUDED_FOLDER_NAME
}
