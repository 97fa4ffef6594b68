//! Xlsx Workbook Repository
//!
//! WorkbookRepositoryの calamine 実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

use super::run_blocking;
use crate::domain::entities::measurement::{
    MeasurementRow, SheetOutcome, REQUIRED_COLUMNS, RESULTS_SHEET,
};
use crate::domain::repositories::workbook_repository::WorkbookRepository;

pub struct XlsxWorkbookRepository;

impl XlsxWorkbookRepository {
    pub fn new() -> Self {
        Self
    }

    fn read_measurements_sync(path: &Path) -> Result<SheetOutcome> {
        let mut workbook: Xlsx<_> =
            open_workbook(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let range = workbook
            .worksheet_range(RESULTS_SHEET)
            .with_context(|| format!("Failed to read sheet '{}' in {}", RESULTS_SHEET, path.display()))?;

        let mut rows = range.rows();
        let header: Vec<String> = match rows.next() {
            Some(header) => header.iter().map(|c| c.to_string().trim().to_string()).collect(),
            None => Vec::new(),
        };

        let mut indices = [0usize; 4];
        let mut missing = Vec::new();
        for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            match header.iter().position(|h| h == column) {
                Some(index) => *slot = index,
                None => missing.push(column.to_string()),
            }
        }
        if !missing.is_empty() {
            return Ok(SheetOutcome::MissingColumns(missing));
        }

        let measurements = rows
            .filter_map(|row| {
                let cells = indices.map(|i| row.get(i).and_then(numeric));
                MeasurementRow::from_cells(cells)
            })
            .collect();
        Ok(SheetOutcome::Rows(measurements))
    }
}

/// 数値に変換できないセルは `None`
fn numeric(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(v) => Some(*v as f64),
        Data::Float(v) => Some(*v),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl WorkbookRepository for XlsxWorkbookRepository {
    async fn read_measurements(&self, path: &Path) -> Result<SheetOutcome> {
        let path = path.to_path_buf();
        run_blocking(move || Self::read_measurements_sync(&path)).await
    }
}

impl Default for XlsxWorkbookRepository {
    fn default() -> Self {
        Self::new()
    }
}
