//! resultfilter - Lab Result Mirror and Reports
//!
//! テスト結果フォルダのミラー、温度プロファイルレポート、BKC ステータス抽出

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use chrono::Local;
use clap::Parser;
use log::error;
use std::process::ExitCode;

use resultfilter::adapter::config::{expand, Config};
use resultfilter::adapter::logging;
use resultfilter::domain::error::PipelineError;
use resultfilter::driver::workflow::failed_action;
use resultfilter::driver::{Args, Command, ResultFilterWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration (built-in paths when the file is absent)
    let config = match Config::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // ミラーはログファイルにも出力する
    let log_file = match args.command {
        Command::Mirror { .. } => Some(logging::log_file_path(
            &expand(&config.mirror.log_dir),
            Local::now().naive_local(),
        )),
        _ => None,
    };
    if let Err(e) = logging::init(log_file.as_deref()) {
        eprintln!("⚠ {:#}", e);
    }

    // Create workflow with injected dependencies
    let workflow = ResultFilterWorkflow::new(config);

    match workflow.execute(&args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let classified = PipelineError::classify(
                &e,
                failed_action(&args.command),
                &workflow.error_target(&args.command),
            );
            error!("{}", classified);
            ExitCode::FAILURE
        }
    }
}
