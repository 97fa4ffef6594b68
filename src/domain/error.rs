//! # Pipeline Error
//!
//! 実行全体が失敗したときの分類。途中までのコピーは巻き戻さない

use std::io;
use thiserror::Error;

/// トップレベルで報告するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Error: Permission denied while accessing a source or '{target}'. Ensure you have appropriate rights.")]
    PermissionDenied { target: String },

    #[error("Error: {message}")]
    NotFound { message: String },

    #[error("Error: Failed to {action}. {message}")]
    Io { action: String, message: String },

    #[error("Unexpected error: {message}")]
    Other { message: String },
}

impl PipelineError {
    /// エラーチェーン中の `io::Error` の種類で分類する
    ///
    /// # Arguments
    ///
    /// * `err` - 失敗したパイプラインのエラー
    /// * `action` - 失敗した処理（例: "copy folder"）
    /// * `target` - 権限エラー時に表示するパス
    pub fn classify(err: &anyhow::Error, action: &str, target: &str) -> Self {
        let message = format!("{:#}", err);
        let io_kind = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<io::Error>())
            .map(|e| e.kind());

        match io_kind {
            Some(io::ErrorKind::PermissionDenied) => PipelineError::PermissionDenied {
                target: target.to_string(),
            },
            Some(io::ErrorKind::NotFound) => PipelineError::NotFound { message },
            Some(_) => PipelineError::Io {
                action: action.to_string(),
                message,
            },
            None => PipelineError::Other { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn io_failure(kind: io::ErrorKind) -> anyhow::Error {
        Err::<(), _>(io::Error::new(kind, "boom"))
            .context("Failed to copy file")
            .unwrap_err()
    }

    #[test]
    fn test_classify_permission_denied() {
        let err = io_failure(io::ErrorKind::PermissionDenied);
        let classified = PipelineError::classify(&err, "copy folder", "U:/dest");
        assert_eq!(
            classified.to_string(),
            "Error: Permission denied while accessing a source or 'U:/dest'. Ensure you have appropriate rights."
        );
    }

    #[test]
    fn test_classify_not_found() {
        let err = io_failure(io::ErrorKind::NotFound);
        let classified = PipelineError::classify(&err, "copy folder", "U:/dest");
        assert_eq!(classified.to_string(), "Error: Failed to copy file: boom");
    }

    #[test]
    fn test_classify_other_io() {
        let err = anyhow::Error::new(io::Error::other("Parent directory 'U:/' does not exist."));
        let classified = PipelineError::classify(&err, "copy folder", "U:/dest");
        assert_eq!(
            classified.to_string(),
            "Error: Failed to copy folder. Parent directory 'U:/' does not exist."
        );
    }

    #[test]
    fn test_classify_non_io() {
        let err = anyhow::anyhow!("No D3/D4 folders found");
        let classified = PipelineError::classify(&err, "build thermal report", "root");
        assert_eq!(classified.to_string(), "Unexpected error: No D3/D4 folders found");
    }
}
