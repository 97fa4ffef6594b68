//! # Thermal Statistics Service
//!
//! 温度系列のバケット集計

use crate::domain::entities::measurement::CategorySeries;
use crate::domain::entities::temperature_bucket::{BucketRow, TemperatureRange};

pub struct ThermalStatisticsService;

impl ThermalStatisticsService {
    /// レンジごとの件数
    ///
    /// 各温度は最初に含まれたレンジだけに数える。どのレンジにも入らない値は数えない
    pub fn bucket_counts(series: &[i64], ranges: &[TemperatureRange]) -> Vec<usize> {
        let mut counts = vec![0; ranges.len()];
        for &temperature in series {
            if let Some(index) = ranges.iter().position(|r| r.contains(temperature)) {
                counts[index] += 1;
            }
        }
        counts
    }

    /// `count / total * 100` を小数1桁で。total が 0 の場合は 1 として扱う
    pub fn format_percent(count: usize, total: usize) -> String {
        let total = total.max(1);
        format!("{:.1}%", count as f64 / total as f64 * 100.0)
    }

    /// カテゴリ1つ分の温度表
    pub fn summarize(series: &CategorySeries, ranges: &[TemperatureRange]) -> Vec<BucketRow> {
        let dts = Self::bucket_counts(&series.max_dts, ranges);
        let tcase = Self::bucket_counts(&series.tcase, ranges);
        let fb = Self::bucket_counts(&series.fb, ranges);
        let dts_total: usize = dts.iter().sum();

        ranges
            .iter()
            .enumerate()
            .map(|(i, range)| BucketRow {
                range: *range,
                max_dts: dts[i],
                tcase: tcase[i],
                fb: fb[i],
                max_dts_percent: Self::format_percent(dts[i], dts_total),
            })
            .collect()
    }
}
