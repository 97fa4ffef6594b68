//! Xlsx Status Export Repository
//!
//! StatusExportRepositoryの rust_xlsxwriter 実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_xlsxwriter::Workbook;
use std::path::Path;

use super::run_blocking;
use crate::domain::entities::server_status::{ServerStatus, STATUS_HEADERS};
use crate::domain::repositories::server_status_repository::StatusExportRepository;

/// 出力シート名
pub const STATUS_SHEET: &str = "Server Info";

pub struct XlsxStatusExportRepository;

impl XlsxStatusExportRepository {
    pub fn new() -> Self {
        Self
    }

    fn save_sync(path: &Path, statuses: &[ServerStatus]) -> Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(STATUS_SHEET)?;

        for (col, header) in STATUS_HEADERS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header)?;
        }
        for (i, status) in statuses.iter().enumerate() {
            let row = i as u32 + 1;
            for (col, cell) in status.cells().iter().enumerate() {
                sheet.write_string(row, col as u16, *cell)?;
            }
        }

        workbook
            .save(path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl StatusExportRepository for XlsxStatusExportRepository {
    async fn save(&self, path: &Path, statuses: &[ServerStatus]) -> Result<()> {
        let (path, statuses) = (path.to_path_buf(), statuses.to_vec());
        run_blocking(move || Self::save_sync(&path, &statuses)).await
    }
}

impl Default for XlsxStatusExportRepository {
    fn default() -> Self {
        Self::new()
    }
}
