//! # Report Repository Trait
//!
//! 温度プロファイルのプレゼンテーション出力を抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::thermal_slide::SlideContent;

/// レポートリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// スライド（カテゴリごとに1枚）をファイルに書き出す
    ///
    /// # Arguments
    ///
    /// * `path` - 出力ファイルのパス（親フォルダは作成される）
    /// * `title` - 文書タイトル
    /// * `slides` - スライドの内容
    async fn write_report(&self, path: &Path, title: &str, slides: &[SlideContent]) -> Result<()>;
}
