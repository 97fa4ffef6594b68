//! # Mirror Summary DTO

/// ミラー結果のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    /// コピーしたファイル数（dry-run では対象数）
    pub copied_files: usize,
    /// 古い重複としてスキップしたファイル数
    pub skipped_files: usize,
    /// スキップしたフォルダ数
    pub skipped_folders: usize,
    /// コピー先から削除した古い実行フォルダ数
    pub removed_folders: usize,
    /// 丸ごとコピーした実行フォルダ数
    pub copied_run_folders: usize,
    /// 存在しなかったコピー元の数
    pub skipped_sources: usize,
}
