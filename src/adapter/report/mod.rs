//! Report Output
//!
//! 温度プロファイルレポート（.pptx）の生成

pub mod chart;
pub mod pptx;
pub mod pptx_report_repository;
