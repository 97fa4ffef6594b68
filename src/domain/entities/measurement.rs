//! # Measurement Entity
//!
//! 温度プロファイル用の測定行とカテゴリ別の系列

/// 測定結果が入っているシート名
pub const RESULTS_SHEET: &str = "SearchVoltage Results";

pub const RUN_ORDER_COLUMN: &str = "run_order";
pub const MAX_DTS_COLUMN: &str = "cmvprofiling.Max_DTS_Profile_max";
pub const TCASE_COLUMN: &str = "cmvprofiling.Intec_TC_Profile_max";
pub const FB_COLUMN: &str = "cmvprofiling.Intec_FB_Profile_max";

/// 必須列（この順でセルを読む）
pub const REQUIRED_COLUMNS: [&str; 4] = [RUN_ORDER_COLUMN, MAX_DTS_COLUMN, TCASE_COLUMN, FB_COLUMN];

/// 測定行
///
/// 実行順と3つの温度（Max_DTS, TCase, FB）。値は整数に切り捨て
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementRow {
    pub run_order: i64,
    pub max_dts: i64,
    pub tcase: i64,
    pub fb: i64,
}

impl MeasurementRow {
    /// セル値から行を作成
    ///
    /// どれか1つでも欠損・非数値なら `None`（行ごと破棄）
    pub fn from_cells(cells: [Option<f64>; 4]) -> Option<Self> {
        let [run_order, max_dts, tcase, fb] = cells;
        Some(Self {
            run_order: truncate(run_order?)?,
            max_dts: truncate(max_dts?)?,
            tcase: truncate(tcase?)?,
            fb: truncate(fb?)?,
        })
    }
}

fn truncate(value: f64) -> Option<i64> {
    if value.is_finite() {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

/// シート読み込み結果
#[derive(Debug, Clone, PartialEq)]
pub enum SheetOutcome {
    /// 有効な行（空の場合もある）
    Rows(Vec<MeasurementRow>),
    /// 見つからなかった必須列
    MissingColumns(Vec<String>),
}

/// 1カテゴリ分の測定系列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySeries {
    pub name: String,
    pub run_order: Vec<i64>,
    pub max_dts: Vec<i64>,
    pub tcase: Vec<i64>,
    pub fb: Vec<i64>,
}

impl CategorySeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn extend(&mut self, rows: &[MeasurementRow]) {
        for row in rows {
            self.run_order.push(row.run_order);
            self.max_dts.push(row.max_dts);
            self.tcase.push(row.tcase);
            self.fb.push(row.fb);
        }
    }

    pub fn len(&self) -> usize {
        self.run_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.run_order.is_empty()
    }
}

/// メインフォルダ1つ分のデータ（カテゴリは初出順）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThermalDataset {
    pub categories: Vec<CategorySeries>,
}

impl ThermalDataset {
    /// カテゴリに行を追加し、追加後の総行数を返す
    pub fn append(&mut self, category: &str, rows: &[MeasurementRow]) -> usize {
        let index = match self.categories.iter().position(|c| c.name == category) {
            Some(index) => index,
            None => {
                self.categories.push(CategorySeries::new(category));
                self.categories.len() - 1
            }
        };
        let series = &mut self.categories[index];
        series.extend(rows);
        series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.is_empty())
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}
