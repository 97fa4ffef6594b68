//! Logging
//!
//! env_logger の初期化。ミラー実行時はコンソールとログファイルの両方に出力する

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use env_logger::{Builder, Env, Target};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// `copy_log_{YYYYmmdd_HHMMSS}.log`
pub fn log_file_path(log_dir: &Path, started_at: NaiveDateTime) -> PathBuf {
    log_dir.join(format!("copy_log_{}.log", started_at.format("%Y%m%d_%H%M%S")))
}

/// `YYYY-mm-dd HH:MM:SS,mmm - LEVEL - message`
fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            record.level(),
            record.args()
        )
    });
    builder
}

/// ロガーを初期化する
///
/// `log_file` を作成できなかった場合はコンソールのみで続行し、`None` を返す
pub fn init(log_file: Option<&Path>) -> Result<Option<PathBuf>> {
    let mut builder = builder();

    let opened = match log_file {
        Some(path) => match open_log_file(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(TeeWriter {
                    file,
                    console: io::stderr(),
                })));
                Some(path.to_path_buf())
            }
            Err(e) => {
                eprintln!("⚠ Could not open log file, logging to console only: {:#}", e);
                None
            }
        },
        None => None,
    };

    builder.try_init().context("Failed to initialize logger")?;
    Ok(opened)
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("Failed to create log file: {}", path.display()))
}

/// ファイルとコンソールへ同じ内容を書く
struct TeeWriter<W: Write> {
    file: File,
    console: W,
}

impl<W: Write> Write for TeeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        self.console.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.console.flush()
    }
}
