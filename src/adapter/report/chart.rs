//! Scatter chart
//!
//! 3系列（Max_DTS / TCase / FB）の散布図を PNG にする。
//! フォントに依存しないよう文字は描かない（タイトル・凡例はスライド側のテキスト）

use anyhow::{anyhow, Result};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;

use crate::domain::entities::measurement::CategorySeries;

/// 画像サイズ（9in × 4in 相当）
pub const CHART_WIDTH: u32 = 1800;
pub const CHART_HEIGHT: u32 = 800;

const GRID_LINES: usize = 10;
const MARKER_SIZE: u32 = 5;

/// 系列色（凡例と同じ順）
pub const SERIES_COLORS: [RGBColor; 3] = [BLUE, GREEN, RED];

/// 散布図を描画し PNG のバイト列を返す
pub fn render_scatter(series: &CategorySeries) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let (x_range, y_range) = axis_ranges(series);
        let mut chart = ChartBuilder::on(&root)
            .margin(30)
            .build_cartesian_2d(x_range.clone(), y_range.clone())?;

        let grid = BLACK.mix(0.15);
        for i in 0..=GRID_LINES {
            let t = i as f64 / GRID_LINES as f64;
            let x = x_range.start + (x_range.end - x_range.start) * t;
            let y = y_range.start + (y_range.end - y_range.start) * t;
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(x, y_range.start), (x, y_range.end)],
                grid,
            )))?;
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(x_range.start, y), (x_range.end, y)],
                grid,
            )))?;
        }

        let values = [&series.max_dts, &series.tcase, &series.fb];
        for (ys, color) in values.into_iter().zip(SERIES_COLORS) {
            chart.draw_series(series.run_order.iter().zip(ys.iter()).map(|(x, y)| {
                Circle::new((*x as f64, *y as f64), MARKER_SIZE, color.filled())
            }))?;
        }

        root.present()?;
    }

    let image = RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, buffer)
        .ok_or_else(|| anyhow!("Chart buffer size mismatch"))?;
    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

/// 全系列を含む軸範囲（少し余白を取る）
fn axis_ranges(series: &CategorySeries) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let x = padded(series.run_order.iter().copied());
    let y = padded(
        series
            .max_dts
            .iter()
            .chain(&series.tcase)
            .chain(&series.fb)
            .copied(),
    );
    (x, y)
}

fn padded(values: impl Iterator<Item = i64>) -> std::ops::Range<f64> {
    let (min, max) = values.fold((i64::MAX, i64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        return 0.0..1.0;
    }
    let (min, max) = (min as f64, max as f64);
    let pad = ((max - min) * 0.05).max(1.0);
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::measurement::MeasurementRow;

    #[test]
    fn test_render_produces_png() {
        let mut series = CategorySeries::new("HotGNG");
        series.extend(&[
            MeasurementRow {
                run_order: 1,
                max_dts: 101,
                tcase: 90,
                fb: 85,
            },
            MeasurementRow {
                run_order: 2,
                max_dts: 97,
                tcase: 88,
                fb: 83,
            },
        ]);

        let png = render_scatter(&series).unwrap();

        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), CHART_WIDTH);
        assert_eq!(decoded.height(), CHART_HEIGHT);
    }

    #[test]
    fn test_padded_ranges() {
        assert_eq!(padded([5, 5].into_iter()), 4.0..6.0);
        assert_eq!(padded(std::iter::empty()), 0.0..1.0);
        assert_eq!(padded([0, 100].into_iter()), -5.0..105.0);
    }
}
