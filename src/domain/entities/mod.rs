//! # Domain Entities
//!
//! ドメインエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **RunFolder / RunStamp**: タイムスタンプ名の実行フォルダ
//! - **FileEntry / DirListing**: 結果ツリーのノード
//! - **MeasurementRow / CategorySeries**: 温度プロファイルの測定データ
//! - **TemperatureRange / BucketRow**: 温度バケット
//! - **SlideContent**: レポートのスライド1枚分
//! - **ServerStatus**: BKC ステータス

pub mod measurement;
pub mod run_folder;
pub mod server_status;
pub mod temperature_bucket;
pub mod thermal_slide;
pub mod tree_entry;
