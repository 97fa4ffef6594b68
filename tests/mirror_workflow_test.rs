//! Mirror Integration Tests
//!
//! 実ファイルツリーに対するミラーの統合テスト

use resultfilter::adapter::config::Config;
use resultfilter::adapter::repositories::fs_result_tree_repository::FsResultTreeRepository;
use resultfilter::application::dto::mirror_options::{MirrorMode, MirrorOptions};
use resultfilter::application::use_cases::mirror_results::MirrorResultsUseCase;
use resultfilter::domain::error::PipelineError;
use resultfilter::driver::cli::{Command, ModeArg};
use resultfilter::driver::workflow::ResultFilterWorkflow;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// 内容と更新日時を指定してファイルを作成
fn touch(path: &Path, secs: u64) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, path.file_name().unwrap().to_string_lossy().as_bytes()).unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

/// テスト用のコピー元ツリーを作成
///
/// ```text
/// A0_D3/
///   Unit1_HotVmin/2025.07.01_10.00.00/run_HotVmin.xlsx      (古い実行フォルダ)
///   Unit1_HotVmin/2025.07.02_10.00.00/run_HotVmin.xlsx      (古い重複)
///   Unit1_HotVmin/2025.07.02_10.00.00/run2_HotVmin.xlsx
///   Unit1_HotVmin/2025.07.02_10.00.00/notes.txt
///   Unit1_HotVmin/stray.txt
///   Unit2_HotGNG/2025.07.03_10.00.00/readme.txt             (必須ファイルなし)
///   Unit3_HotVmin/setup.txt                                 (実行フォルダなし)
///   99999999_999_+99_+99/placeholder.txt
///   Plain/data.csv
/// Other/x.txt
/// ```
fn create_source_tree(root: &Path) {
    let d3 = root.join("A0_D3");
    touch(&d3.join("Unit1_HotVmin/2025.07.01_10.00.00/run_HotVmin.xlsx"), 300);
    touch(&d3.join("Unit1_HotVmin/2025.07.02_10.00.00/run_HotVmin.xlsx"), 100);
    touch(&d3.join("Unit1_HotVmin/2025.07.02_10.00.00/run2_HotVmin.xlsx"), 200);
    touch(&d3.join("Unit1_HotVmin/2025.07.02_10.00.00/notes.txt"), 200);
    touch(&d3.join("Unit1_HotVmin/stray.txt"), 100);
    touch(&d3.join("Unit2_HotGNG/2025.07.03_10.00.00/readme.txt"), 100);
    touch(&d3.join("Unit3_HotVmin/setup.txt"), 100);
    touch(&d3.join("99999999_999_+99_+99/placeholder.txt"), 100);
    touch(&d3.join("Plain/data.csv"), 100);
    touch(&root.join("Other/x.txt"), 100);
}

fn use_case() -> MirrorResultsUseCase<FsResultTreeRepository> {
    MirrorResultsUseCase::new(Arc::new(FsResultTreeRepository::new()))
}

/// テスト用のConfigファイルを作成
fn create_test_config(dir: &Path, sources: &[PathBuf], destination: &Path) -> Config {
    let config_path = dir.join("resultfilter.json");
    let config = serde_json::json!({
        "mirror": {
            "sources": sources.iter().map(|s| s.to_string_lossy()).collect::<Vec<_>>(),
            "destination": destination.to_string_lossy(),
            "log_dir": dir.join("logs").to_string_lossy(),
        }
    });
    fs::write(&config_path, config.to_string()).unwrap();
    Config::load(&config_path.to_string_lossy()).unwrap()
}

#[tokio::test]
async fn test_latest_mode_keeps_newest_run_folder_only() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("lab");
    let dest = temp_dir.path().join("prod").join("results");
    fs::create_dir_all(dest.parent().unwrap()).unwrap();
    create_source_tree(&source);

    let config = create_test_config(temp_dir.path(), &[source.clone()], &dest);
    let workflow = ResultFilterWorkflow::new(config);
    workflow
        .execute(&Command::Mirror {
            mode: ModeArg::Latest,
            dry_run: false,
        })
        .await
        .unwrap();

    let run = dest.join("A0_D3/Unit1_HotVmin/2025.07.02_10.00.00");
    assert!(run.join("run2_HotVmin.xlsx").is_file());
    assert!(run.join("notes.txt").is_file());
    assert!(!run.join("run_HotVmin.xlsx").exists());
    assert!(!dest.join("A0_D3/Unit1_HotVmin/2025.07.01_10.00.00").exists());
    assert!(!dest.join("A0_D3/Unit1_HotVmin/stray.txt").exists());
    assert!(!dest.join("A0_D3/Unit2_HotGNG").exists());
    assert!(!dest.join("A0_D3/Unit3_HotVmin").exists());
    assert!(!dest.join("A0_D3/99999999_999_+99_+99").exists());
    assert!(dest.join("A0_D3/Plain/data.csv").is_file());
    assert!(dest.join("Other/x.txt").is_file());

    // 更新日時が保持される
    assert_eq!(
        fs::metadata(run.join("run2_HotVmin.xlsx")).unwrap().modified().unwrap(),
        SystemTime::UNIX_EPOCH + Duration::from_secs(200)
    );
}

#[tokio::test]
async fn test_latest_mode_summary_counts() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("lab");
    let missing = temp_dir.path().join("offline");
    let dest = temp_dir.path().join("results");
    create_source_tree(&source);

    let options = MirrorOptions::new(vec![missing, source], dest);
    let summary = use_case().execute(&options).await.unwrap();

    assert_eq!(summary.skipped_sources, 1);
    // run2_HotVmin.xlsx, notes.txt, data.csv, x.txt
    assert_eq!(summary.copied_files, 4);
    assert_eq!(summary.skipped_files, 1);
    // 除外フォルダ, Unit2, Unit3, 古い実行フォルダ
    assert_eq!(summary.skipped_folders, 4);
}

#[tokio::test]
async fn test_replace_mode_copies_cross_source_winner_once() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("host84");
    let second = temp_dir.path().join("host88");
    let dest = temp_dir.path().join("results");

    touch(&first.join("A0_D3/Unit1_HotVmin/2025.07.02_10.00.00/a_HotVmin.xlsx"), 100);
    touch(&second.join("A0_D3/Unit1_HotVmin/2025.07.05_10.00.00/b_HotVmin.xlsx"), 100);
    touch(&second.join("A0_D3/Unit1_HotVmin/2025.07.05_10.00.00/log/trace.txt"), 100);
    touch(&dest.join("A0_D3/Unit1_HotVmin/2025.06.30_00.00.00/old_HotVmin.xlsx"), 50);

    let options = MirrorOptions::new(vec![first, second], dest.clone()).with_mode(MirrorMode::Replace);
    let summary = use_case().execute(&options).await.unwrap();

    let versioned = dest.join("A0_D3/Unit1_HotVmin");
    let mut runs: Vec<String> = fs::read_dir(&versioned)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    runs.sort();
    assert_eq!(runs, vec!["2025.07.05_10.00.00"]);
    assert!(versioned.join("2025.07.05_10.00.00/log/trace.txt").is_file());

    assert_eq!(summary.removed_folders, 1);
    assert_eq!(summary.copied_run_folders, 1);
    assert_eq!(summary.copied_files, 2);
}

#[tokio::test]
async fn test_replace_mode_same_stamp_first_source_wins() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("host84");
    let second = temp_dir.path().join("host88");
    let dest = temp_dir.path().join("results");

    touch(&first.join("A0_D3/Unit1_HotVmin/2025.07.05_10.00.00/first_HotVmin.xlsx"), 100);
    touch(&second.join("A0_D3/Unit1_HotVmin/2025.07.05_10.00.00/second_HotVmin.xlsx"), 100);

    let options = MirrorOptions::new(vec![first, second], dest.clone()).with_mode(MirrorMode::Replace);
    let summary = use_case().execute(&options).await.unwrap();

    let run = dest.join("A0_D3/Unit1_HotVmin/2025.07.05_10.00.00");
    assert!(run.join("first_HotVmin.xlsx").is_file());
    assert!(!run.join("second_HotVmin.xlsx").exists());
    assert_eq!(summary.copied_run_folders, 1);
    assert_eq!(summary.copied_files, 1);
    assert_eq!(summary.removed_folders, 0);
}

#[tokio::test]
async fn test_replace_mode_dry_run_counts_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("host84");
    let second = temp_dir.path().join("host88");
    let dest = temp_dir.path().join("results");

    touch(&first.join("A0_D3/Unit1_HotVmin/2025.07.02_10.00.00/a_HotVmin.xlsx"), 100);
    touch(&second.join("A0_D3/Unit1_HotVmin/2025.07.05_10.00.00/b_HotVmin.xlsx"), 100);
    touch(&second.join("A0_D3/Unit1_HotVmin/2025.07.05_10.00.00/log/trace.txt"), 100);
    let stale = dest.join("A0_D3/Unit1_HotVmin/2025.06.30_00.00.00/old_HotVmin.xlsx");
    touch(&stale, 50);

    let options = MirrorOptions::new(vec![first, second], dest.clone())
        .with_mode(MirrorMode::Replace)
        .with_dry_run(true);
    let summary = use_case().execute(&options).await.unwrap();

    assert_eq!(summary.removed_folders, 1);
    assert_eq!(summary.copied_run_folders, 1);
    assert_eq!(summary.copied_files, 2);
    assert!(stale.is_file());
    assert!(!dest.join("A0_D3/Unit1_HotVmin/2025.07.05_10.00.00").exists());
}

#[tokio::test]
async fn test_contains_mode_keeps_folders_with_hotvmin_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("lab");
    let dest = temp_dir.path().join("results");
    touch(&source.join("A0_D4/Keep/sub/x_HotVmin_1.xlsx"), 100);
    touch(&source.join("A0_D4/Keep/sub/summary.txt"), 100);
    touch(&source.join("A0_D4/Drop/y.txt"), 100);
    touch(&source.join("Other/z.txt"), 100);

    let options = MirrorOptions::new(vec![source], dest.clone()).with_mode(MirrorMode::Contains);
    use_case().execute(&options).await.unwrap();

    assert!(dest.join("A0_D4/Keep/sub/x_HotVmin_1.xlsx").is_file());
    assert!(dest.join("A0_D4/Keep/sub/summary.txt").is_file());
    assert!(!dest.join("A0_D4/Drop").exists());
    assert!(dest.join("Other/z.txt").is_file());
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("lab");
    let dest = temp_dir.path().join("results");
    create_source_tree(&source);

    let options = MirrorOptions::new(vec![source], dest.clone()).with_dry_run(true);
    let summary = use_case().execute(&options).await.unwrap();

    assert_eq!(summary.copied_files, 4);
    assert!(!dest.exists());
}

#[tokio::test]
async fn test_missing_destination_parent_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("lab");
    create_source_tree(&source);
    let dest = temp_dir.path().join("absent").join("results");

    let config = create_test_config(temp_dir.path(), &[source], &dest);
    let workflow = ResultFilterWorkflow::new(config);
    let command = Command::Mirror {
        mode: ModeArg::Latest,
        dry_run: false,
    };
    let err = workflow.execute(&command).await.unwrap_err();

    let classified = PipelineError::classify(&err, "copy folder", &workflow.error_target(&command));
    let message = classified.to_string();
    assert!(message.starts_with("Error: Failed to copy folder. Parent directory"));
    assert!(message.ends_with("does not exist. Please create it first."));
    assert!(!dest.exists());
}
