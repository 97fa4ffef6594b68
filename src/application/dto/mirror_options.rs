//! # Mirror Options DTO
//!
//! ミラー実行設定のData Transfer Object

use std::path::PathBuf;

use crate::domain::entities::run_folder::DEFAULT_REQUIRED_KEYWORDS;

/// ミラーの動作モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorMode {
    /// ソースごとに最新の実行フォルダをコピーする
    #[default]
    Latest,
    /// 全ソースで最新の実行フォルダを決め、コピー先の古い実行フォルダを削除して置き換える
    Replace,
    /// `HotVmin` ファイルを含むフォルダだけを残す（初期版の動作）
    Contains,
}

/// ミラー設定
#[derive(Debug, Clone)]
pub struct MirrorOptions {
    /// コピー元（順に処理）
    pub sources: Vec<PathBuf>,
    /// コピー先
    pub destination: PathBuf,
    /// 実行フォルダに必須のファイルキーワード（この順に確認）
    pub required_keywords: Vec<String>,
    pub mode: MirrorMode,
    /// ログ出力のみで何も書き込まない
    pub dry_run: bool,
}

impl MirrorOptions {
    /// 新しいミラー設定を作成します。
    ///
    /// 必須キーワードは `HotVmin.xlsx`, `HotGNG.xlsx`
    ///
    /// ```
    /// use resultfilter::application::dto::mirror_options::{MirrorMode, MirrorOptions};
    ///
    /// let options = MirrorOptions::new(
    ///     vec!["C:/Results/ARL/S681/A0".into()],
    ///     "U:/NVL/HX/A0/results_production".into(),
    /// )
    /// .with_mode(MirrorMode::Replace);
    ///
    /// assert_eq!(options.required_keywords, vec!["HotVmin.xlsx", "HotGNG.xlsx"]);
    /// assert_eq!(options.mode, MirrorMode::Replace);
    /// assert!(!options.dry_run);
    /// ```
    pub fn new(sources: Vec<PathBuf>, destination: PathBuf) -> Self {
        Self {
            sources,
            destination,
            required_keywords: DEFAULT_REQUIRED_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            mode: MirrorMode::default(),
            dry_run: false,
        }
    }

    pub fn with_mode(mut self, mode: MirrorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_required_keywords(mut self, keywords: Vec<String>) -> Self {
        self.required_keywords = keywords;
        self
    }
}
