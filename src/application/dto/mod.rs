//! # Data Transfer Objects
//!
//! ユースケースの入出力

pub mod mirror_options;
pub mod mirror_summary;
