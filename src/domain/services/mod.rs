//! # Domain Services
//!
//! 複数のエンティティにまたがるビジネスルール
//!
//! - **RetentionService**: 最新タイムスタンプフォルダ・最新ファイルの選択
//! - **ThermalStatisticsService**: 温度バケット集計

pub mod retention;
pub mod thermal_statistics;
