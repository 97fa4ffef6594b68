//! Pptx Report Repository
//!
//! ReportRepositoryの実装（カテゴリごとに散布図と温度表のスライド）

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::{self, File};
use std::path::Path;

use super::chart::{render_scatter, SERIES_COLORS};
use super::pptx::{PresentationPackage, SlidePart};
use crate::adapter::repositories::run_blocking;
use crate::domain::entities::thermal_slide::{SlideContent, SERIES_LABELS};
use crate::domain::repositories::report_repository::ReportRepository;

pub struct PptxReportRepository;

impl PptxReportRepository {
    pub fn new() -> Self {
        Self
    }

    /// 凡例（ラベルとグラフの色）
    fn legend() -> Vec<(String, String)> {
        SERIES_LABELS
            .iter()
            .zip(SERIES_COLORS)
            .map(|(label, c)| (label.to_string(), format!("{:02X}{:02X}{:02X}", c.0, c.1, c.2)))
            .collect()
    }

    fn write_report_sync(path: &Path, title: &str, slides: &[SlideContent]) -> Result<()> {
        let mut package = PresentationPackage::new(title);
        for slide in slides {
            let chart_png = render_scatter(&slide.series)
                .with_context(|| format!("Failed to render chart for {}", slide.category()))?;
            package.add_slide(SlidePart {
                title: slide.title(),
                legend: Self::legend(),
                axes: slide.axes_caption(),
                chart_png,
                table: slide.table_cells(),
            });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        package.write_to(file)
    }
}

#[async_trait]
impl ReportRepository for PptxReportRepository {
    async fn write_report(&self, path: &Path, title: &str, slides: &[SlideContent]) -> Result<()> {
        let (path, title, slides) = (path.to_path_buf(), title.to_string(), slides.to_vec());
        run_blocking(move || Self::write_report_sync(&path, &title, &slides)).await
    }
}

impl Default for PptxReportRepository {
    fn default() -> Self {
        Self::new()
    }
}
