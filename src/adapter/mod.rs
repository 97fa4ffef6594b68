//! Adapter Layer
//!
//! 外部システム（ファイル共有, Excel, PowerPoint）との統合

pub mod config;
pub mod logging;
pub mod report;
pub mod repositories;
