//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, Subcommand, ValueEnum};

use crate::application::dto::mirror_options::MirrorMode;

/// テスト結果フォルダのミラー・温度プロファイルレポート・BKC ステータス抽出
#[derive(Parser, Debug, Clone)]
#[command(name = "resultfilter")]
#[command(about = "Mirror lab test results and build reports from them", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, global = true, default_value = "./resultfilter.json")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Mirror the latest qualifying run folders to the production share
    Mirror {
        /// Retention mode
        #[arg(long, value_enum, default_value_t = ModeArg::Latest)]
        mode: ModeArg,

        /// Dry run mode - log what would be copied or removed
        #[arg(long)]
        dry_run: bool,
    },
    /// Build thermal profiling presentations per D3/D4 folder
    Thermal,
    /// Extract PythonSV version and latest Triplet log per server
    Bkc,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Newest run folder per source
    Latest,
    /// Newest run folder across sources, replacing stale destination folders
    Replace,
    /// Keep folders holding a HotVmin file (legacy behaviour)
    Contains,
}

impl From<ModeArg> for MirrorMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Latest => MirrorMode::Latest,
            ModeArg::Replace => MirrorMode::Replace,
            ModeArg::Contains => MirrorMode::Contains,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_config() {
        let args = Args::parse_from(["resultfilter", "thermal"]);
        assert_eq!(args.config, "./resultfilter.json");
        assert_eq!(args.command, Command::Thermal);
    }

    #[test]
    fn test_mirror_defaults() {
        let args = Args::parse_from(["resultfilter", "mirror"]);
        assert_eq!(
            args.command,
            Command::Mirror {
                mode: ModeArg::Latest,
                dry_run: false
            }
        );
    }

    #[test]
    fn test_mirror_mode_and_dry_run() {
        let args = Args::parse_from(["resultfilter", "mirror", "--mode", "replace", "--dry-run"]);
        assert_eq!(
            args.command,
            Command::Mirror {
                mode: ModeArg::Replace,
                dry_run: true
            }
        );
    }

    #[test]
    fn test_custom_config_after_subcommand() {
        let args = Args::parse_from(["resultfilter", "bkc", "-c", "/custom/config.json"]);
        assert_eq!(args.config, "/custom/config.json");
        assert_eq!(args.command, Command::Bkc);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["resultfilter"]).is_err());
        assert!(Args::try_parse_from(["resultfilter", "mirror", "--mode", "newest"]).is_err());
    }

    #[test]
    fn test_mode_conversion() {
        assert_eq!(MirrorMode::from(ModeArg::Contains), MirrorMode::Contains);
        assert_eq!(MirrorMode::from(ModeArg::Latest), MirrorMode::Latest);
    }
}
