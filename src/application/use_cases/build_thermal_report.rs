//! # Build Thermal Report Use Case
//!
//! 温度プロファイルのレポート作成ユースケース

use anyhow::Result;
use chrono::NaiveDateTime;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::measurement::ThermalDataset;
use crate::domain::entities::temperature_bucket::DEFAULT_TEMPERATURE_RANGES;
use crate::domain::entities::thermal_slide::SlideContent;
use crate::domain::repositories::report_repository::ReportRepository;
use crate::domain::services::thermal_statistics::ThermalStatisticsService;

/// レポート作成ユースケース
pub struct BuildThermalReportUseCase<P: ReportRepository> {
    reports: Arc<P>,
}

impl<P: ReportRepository> BuildThermalReportUseCase<P> {
    pub fn new(reports: Arc<P>) -> Self {
        Self { reports }
    }

    /// メインフォルダ1つ分のレポートを書き出す
    ///
    /// # Arguments
    ///
    /// * `main_name` - メインフォルダ名（ファイル名に使う）
    /// * `dataset` - 収集済みの測定データ
    /// * `summary_dir` - 出力フォルダ
    /// * `generated_at` - ファイル名に付ける日時
    ///
    /// # Returns
    ///
    /// 書き出したファイルのパス。データがなければ `None`
    pub async fn execute(
        &self,
        main_name: &str,
        dataset: &ThermalDataset,
        summary_dir: &Path,
        generated_at: NaiveDateTime,
    ) -> Result<Option<PathBuf>> {
        let slides = Self::slides(dataset);
        if slides.is_empty() {
            info!("No data for {} → no presentation written", main_name);
            return Ok(None);
        }

        let path = report_path(summary_dir, main_name, generated_at);
        let title = format!("Thermal Profiling Results – {}", main_name);
        self.reports.write_report(&path, &title, &slides).await?;
        info!("PowerPoint saved: {}", path.display());

        Ok(Some(path))
    }

    /// データのあるカテゴリごとに1枚
    pub fn slides(dataset: &ThermalDataset) -> Vec<SlideContent> {
        dataset
            .categories
            .iter()
            .filter(|series| {
                if series.is_empty() {
                    info!("Skipping empty slide for {}", series.name);
                }
                !series.is_empty()
            })
            .map(|series| SlideContent {
                table: ThermalStatisticsService::summarize(series, &DEFAULT_TEMPERATURE_RANGES),
                series: series.clone(),
            })
            .collect()
    }
}

/// `Thermal_Profiling_Results_{main}_{YYYYmmdd_HHMMSS}.pptx`
pub fn report_path(summary_dir: &Path, main_name: &str, generated_at: NaiveDateTime) -> PathBuf {
    summary_dir.join(format!(
        "Thermal_Profiling_Results_{}_{}.pptx",
        main_name,
        generated_at.format("%Y%m%d_%H%M%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::measurement::MeasurementRow;
    use crate::domain::repositories::report_repository::MockReportRepository;
    use chrono::NaiveDate;

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 2)
            .unwrap()
            .and_hms_opt(18, 18, 5)
            .unwrap()
    }

    #[test]
    fn test_report_path() {
        let path = report_path(Path::new("/summary"), "D3_unitA", generated_at());
        assert_eq!(
            path,
            PathBuf::from("/summary/Thermal_Profiling_Results_D3_unitA_20250902_181805.pptx")
        );
    }

    #[tokio::test]
    async fn test_execute_writes_one_slide_per_category() {
        let mut dataset = ThermalDataset::default();
        let row = MeasurementRow {
            run_order: 1,
            max_dts: 101,
            tcase: 92,
            fb: 86,
        };
        dataset.append("HotGNG", &[row, row]);
        dataset.append("empty", &[]);
        dataset.append("2025.07.30_21.48.51", &[row]);

        let mut reports = MockReportRepository::new();
        reports
            .expect_write_report()
            .withf(|path: &Path, title: &str, slides: &[SlideContent]| {
                path == Path::new("/summary/Thermal_Profiling_Results_D3_20250902_181805.pptx")
                    && title == "Thermal Profiling Results – D3"
                    && slides.len() == 2
                    && slides[0].category() == "HotGNG"
                    && slides[0].table[3].max_dts == 2
                    && slides[1].category() == "2025.07.30_21.48.51"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let use_case = BuildThermalReportUseCase::new(Arc::new(reports));
        let written = use_case
            .execute("D3", &dataset, Path::new("/summary"), generated_at())
            .await
            .unwrap();

        assert!(written.is_some());
    }

    #[tokio::test]
    async fn test_execute_without_data_writes_nothing() {
        let mut reports = MockReportRepository::new();
        reports.expect_write_report().never();

        let use_case = BuildThermalReportUseCase::new(Arc::new(reports));
        let written = use_case
            .execute("D4", &ThermalDataset::default(), Path::new("/summary"), generated_at())
            .await
            .unwrap();

        assert!(written.is_none());
    }
}
