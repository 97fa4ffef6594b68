//! # Workbook Repository Trait
//!
//! 測定結果ブック（.xlsx）の読み込みを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::measurement::SheetOutcome;

/// 測定ブックリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WorkbookRepository: Send + Sync {
    /// 結果シートから測定行を読み込む
    ///
    /// # Returns
    ///
    /// 必須列が揃っていれば有効な行、足りなければ不足列
    ///
    /// # Errors
    ///
    /// ブックやシートを開けない場合にエラーを返す
    async fn read_measurements(&self, path: &Path) -> Result<SheetOutcome>;
}
