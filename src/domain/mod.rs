//! # Domain Layer
//!
//! このモジュールは結果フォルダの選別ルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - ファイルシステムや Excel/PowerPoint について何も知らない
//! - 純粋なビジネスロジック（タイムスタンプ判定、温度バケット集計など）
//!
//! ## 構成要素
//!
//! - **entities**: ドメインエンティティ（RunFolder, MeasurementRow, ServerStatusなど）
//! - **error**: パイプライン全体のエラー分類
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（保持ルール、温度統計）

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
