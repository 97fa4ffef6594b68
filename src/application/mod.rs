//! # Application Layer
//!
//! パイプライン固有のフロー（ユースケース）
//!
//! ## 特徴
//!
//! - Domain層のエンティティとサービスを組み合わせてフローを実現
//! - Repository traitに依存（実装には依存しない）
//! - ファイル共有や Excel/PowerPoint の詳細は知らない
//!
//! ## 構成要素
//!
//! - **dto**: Data Transfer Object
//! - **use_cases**: ユースケース

pub mod dto;
pub mod use_cases;
