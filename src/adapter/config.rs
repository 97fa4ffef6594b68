//! Configuration
//!
//! 設定ファイル（JSON）の読み込み。ファイルがなければ既定のパスを使う

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::domain::entities::run_folder::DEFAULT_REQUIRED_KEYWORDS;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub mirror: MirrorConfig,
    pub thermal: ThermalConfig,
    pub bkc: BkcConfig,
}

/// 結果フォルダのミラー設定
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MirrorConfig {
    pub sources: Vec<String>,
    pub destination: String,
    pub log_dir: String,
    pub required_keywords: Vec<String>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                "C:/Results/ARL/S681/A0".to_string(),
                "//PG07TCMV0084/c$/Results/ARL/S681/A0".to_string(),
                "//PG07TCMV0088/c$/Results/ARL/S681/A0".to_string(),
            ],
            destination: "U:/NVL/HX/A0/results_production".to_string(),
            log_dir: "U:/users/Hs/script/Process-Improvement/runResultFilter/debuglog".to_string(),
            required_keywords: DEFAULT_REQUIRED_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// 温度プロファイルレポート設定
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThermalConfig {
    pub root: String,
    pub summary_dir: String,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            root: "U:/NVL/HX/A0/results_experimental/ThermalProfile".to_string(),
            summary_dir: "U:/NVL/HX/A0/results_experimental/ThermalProfileSummary".to_string(),
        }
    }
}

/// BKC ステータス抽出設定
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BkcConfig {
    pub servers: Vec<String>,
    /// `{server}` がサーバー名に置き換わる
    pub version_file: String,
    /// `{server}` がサーバー名に置き換わる
    pub triplet_dir: String,
    pub output: String,
}

impl Default for BkcConfig {
    fn default() -> Self {
        let servers = [
            "0036", "0037", "0039", "0043", "0046", "0048", "0050", "0080", "0081", "0082",
            "0083", "0084", "0085", "0086", "0087", "0088", "0089",
        ];
        Self {
            servers: servers.iter().map(|n| format!("pg07tcmv{}", n)).collect(),
            version_file: "//{server}/c$/pythonsv/version.ini".to_string(),
            triplet_dir: "//{server}/c$/Intel/Triplet_Logs".to_string(),
            output: "I:/mtl/users/ctio/script/Playground/Server_Info.xlsx".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        Ok(config)
    }

    /// ファイルがあれば読み込み、なければ既定値
    pub fn load_or_default(path: &str) -> Result<Self> {
        let expanded = expand(path);
        if expanded.exists() {
            Self::load(&expanded.to_string_lossy())
        } else {
            info!("Config file {} not found, using built-in paths", path);
            Ok(Self::default())
        }
    }
}

/// 先頭の `~` を展開する
pub fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_production_layout() {
        let config = Config::default();
        assert_eq!(config.mirror.sources.len(), 3);
        assert_eq!(config.mirror.destination, "U:/NVL/HX/A0/results_production");
        assert_eq!(config.mirror.required_keywords, vec!["HotVmin.xlsx", "HotGNG.xlsx"]);
        assert_eq!(config.bkc.servers.len(), 17);
        assert_eq!(config.bkc.servers[0], "pg07tcmv0036");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resultfilter.json");
        fs::write(
            &path,
            r#"{ "mirror": { "sources": ["/lab/A0"], "destination": "/prod/results" } }"#,
        )
        .unwrap();

        let config = Config::load_or_default(&path.to_string_lossy()).unwrap();

        assert_eq!(config.mirror.sources, vec!["/lab/A0"]);
        assert_eq!(config.mirror.destination, "/prod/results");
        assert_eq!(config.mirror.required_keywords.len(), 2);
        assert_eq!(config.thermal.root, ThermalConfig::default().root);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        let config = Config::load_or_default(&path.to_string_lossy()).unwrap();
        assert_eq!(config.thermal.summary_dir, ThermalConfig::default().summary_dir);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(Config::load_or_default(&path.to_string_lossy()).is_err());
    }

    #[test]
    fn test_expand_tilde() {
        assert!(expand("~/results").ends_with("results"));
        assert_eq!(expand("/abs/path"), PathBuf::from("/abs/path"));
    }
}
