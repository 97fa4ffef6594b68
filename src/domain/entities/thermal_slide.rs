//! # Thermal Slide
//!
//! レポートのスライド1枚分（散布図の系列と温度表）

use crate::domain::entities::measurement::CategorySeries;
use crate::domain::entities::temperature_bucket::BucketRow;

/// 表のヘッダ行
pub const TABLE_HEADERS: [&str; 5] = ["Temperature Range", "Max_DTS", "TCase", "FB", "Max_DTS %"];

/// 凡例ラベル（散布図の系列順）
pub const SERIES_LABELS: [&str; 3] = ["Max_DTS", "TCase", "FB"];

/// 軸名（x, y）
pub const AXIS_LABELS: [&str; 2] = ["run_order", "Temperature"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideContent {
    pub series: CategorySeries,
    pub table: Vec<BucketRow>,
}

impl SlideContent {
    pub fn category(&self) -> &str {
        &self.series.name
    }

    pub fn title(&self) -> String {
        format!("Thermal Profiling – {}", self.series.name)
    }

    /// 凡例の後ろに出す軸名
    pub fn axes_caption(&self) -> String {
        format!("x: {} / y: {}", AXIS_LABELS[0], AXIS_LABELS[1])
    }

    /// ヘッダ行を含む表のセル文字列
    pub fn table_cells(&self) -> Vec<Vec<String>> {
        let mut cells = vec![TABLE_HEADERS.iter().map(|h| h.to_string()).collect()];
        for row in &self.table {
            cells.push(vec![
                row.range.label(),
                row.max_dts.to_string(),
                row.tcase.to_string(),
                row.fb.to_string(),
                row.max_dts_percent.clone(),
            ]);
        }
        cells
    }
}
