//! # Use Cases
//!
//! パイプラインのフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **MirrorResultsUseCase**: 結果フォルダのミラー
//! - **CollectThermalDataUseCase**: 温度プロファイルの測定データ収集
//! - **BuildThermalReportUseCase**: 温度プロファイルのレポート作成
//! - **ExtractBkcStatusUseCase**: BKC ステータスの抽出

pub mod build_thermal_report;
pub mod collect_thermal_data;
pub mod extract_bkc_status;
pub mod mirror_results;
