//! # Temperature Bucket
//!
//! 固定の温度レンジ（上限・下限とも含む）

/// 温度レンジ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureRange {
    pub high: i64,
    pub low: i64,
}

impl TemperatureRange {
    pub const fn new(high: i64, low: i64) -> Self {
        Self { high, low }
    }

    pub fn contains(&self, temperature: i64) -> bool {
        self.low <= temperature && temperature <= self.high
    }

    /// 表に表示するラベル（例: `130-120`）
    pub fn label(&self) -> String {
        format!("{}-{}", self.high, self.low)
    }
}

/// レポートで使う温度レンジ（高い順）。71-79 は意図的に含まない
pub const DEFAULT_TEMPERATURE_RANGES: [TemperatureRange; 9] = [
    TemperatureRange::new(130, 120),
    TemperatureRange::new(119, 110),
    TemperatureRange::new(109, 105),
    TemperatureRange::new(104, 100),
    TemperatureRange::new(99, 95),
    TemperatureRange::new(94, 90),
    TemperatureRange::new(89, 85),
    TemperatureRange::new(84, 80),
    TemperatureRange::new(70, 60),
];

/// 温度表の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketRow {
    pub range: TemperatureRange,
    pub max_dts: usize,
    pub tcase: usize,
    pub fb: usize,
    /// Max_DTS の割合（例: `42.9%`）
    pub max_dts_percent: String,
}
