//! # ServerStatus Entity
//!
//! テストホストの BKC ステータス（PythonSV バージョンと最新 Triplet ログ）

/// 値がない列の表示
pub const NOT_AVAILABLE: &str = "N/A";

/// バージョンファイル中で探す目印
pub const VERSION_MARKER: &str = "pythonsv_version";

/// Triplet ログファイル名の接頭辞
pub const TRIPLET_PREFIX: &str = "Triplet";

/// 表・Excel のヘッダ
pub const STATUS_HEADERS: [&str; 3] = ["Server", "Version Info", "Triplet Info"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    pub server: String,
    pub version_info: Option<String>,
    pub triplet_info: Option<String>,
}

impl ServerStatus {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            version_info: None,
            triplet_info: None,
        }
    }

    /// どちらの情報も取れなかったか
    pub fn is_empty(&self) -> bool {
        self.version_info.is_none() && self.triplet_info.is_none()
    }

    pub fn version_display(&self) -> &str {
        self.version_info.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn triplet_display(&self) -> &str {
        self.triplet_info.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Excel に書く1行
    pub fn cells(&self) -> [&str; 3] {
        [&self.server, self.version_display(), self.triplet_display()]
    }
}

/// コンソール表示用の固定幅テーブル
pub fn status_table(statuses: &[ServerStatus]) -> String {
    let mut out = format!(
        "{:<20} {:<40} {:<60}\n",
        STATUS_HEADERS[0], STATUS_HEADERS[1], STATUS_HEADERS[2]
    );
    out.push_str(&"=".repeat(120));
    out.push('\n');
    for status in statuses {
        out.push_str(&format!(
            "{:<20} {:<40} {:<60}\n",
            status.server,
            status.version_display(),
            status.triplet_display()
        ));
    }
    out
}
