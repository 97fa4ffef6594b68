//! # resultfilter
//!
//! ラボのテスト結果を本番共有へミラーし、結果からレポートを作るツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: 保持ルール、温度バケット、エンティティ（外部依存なし）
//! - **Application層**: パイプライン固有のフロー（ユースケース）
//! - **Adapter層**: 外部システムとの統合（ファイル共有, Excel, PowerPoint 等）
//! - **Driver層**: CLI、依存性注入
//!
//! ## パイプライン
//!
//! - `mirror`: 最新の実行フォルダだけを残してコピー元をコピー先へミラー
//! - `thermal`: `D3` / `D4` フォルダごとに温度プロファイルの .pptx を作成
//! - `bkc`: サーバーごとの PythonSV バージョンと最新 Triplet ログを .xlsx に出力

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
