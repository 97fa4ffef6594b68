//! # Retention Service
//!
//! 「最新のタイムスタンプフォルダだけを残す」保持ルール

use std::path::Path;

use crate::domain::entities::run_folder::{RunFolder, RunStamp};
use crate::domain::entities::tree_entry::FileEntry;

/// 保持ルール
///
/// ミラーと温度プロファイルの両方から使う純粋なロジック
pub struct RetentionService;

impl RetentionService {
    /// サブフォルダ名の中から最新の実行フォルダを選ぶ
    ///
    /// # Arguments
    ///
    /// * `parent` - サブフォルダの親（結果フォルダ）のパス
    /// * `dir_names` - サブフォルダ名のリスト
    ///
    /// # Returns
    ///
    /// タイムスタンプとしてパースできる名前がなければ `None`。
    /// 同じ日時の場合は先に現れたものを返す
    pub fn latest_run_folder(parent: &Path, dir_names: &[String]) -> Option<RunFolder> {
        let mut latest: Option<RunFolder> = None;
        for name in dir_names {
            let Some(stamp) = RunStamp::parse(name) else {
                continue;
            };
            if latest.as_ref().map_or(true, |current| stamp > current.stamp) {
                latest = Some(RunFolder {
                    path: parent.join(name),
                    name: name.clone(),
                    stamp,
                });
            }
        }
        latest
    }

    /// 更新日時が最も新しいファイル（同時刻なら先のもの）
    pub fn newest_file<'a, I>(files: I) -> Option<&'a FileEntry>
    where
        I: IntoIterator<Item = &'a FileEntry>,
    {
        files.into_iter().fold(None, |newest, file| match newest {
            Some(current) if file.modified <= current.modified => Some(current),
            _ => Some(file),
        })
    }

    /// 名前に `keyword` を含むファイルのうち最新のもの
    pub fn newest_matching<'a>(files: &'a [FileEntry], keyword: &str) -> Option<&'a FileEntry> {
        Self::newest_file(files.iter().filter(|f| f.name.contains(keyword)))
    }

    /// 必須キーワードを順に確認し、最初に見つかったキーワードと最新ファイルを返す
    pub fn first_keyword_match<'a, 'k>(
        files: &'a [FileEntry],
        keywords: &'k [String],
    ) -> Option<(&'k str, &'a FileEntry)> {
        keywords.iter().find_map(|keyword| {
            Self::newest_matching(files, keyword).map(|file| (keyword.as_str(), file))
        })
    }

    /// ファイル名が含む最初の必須キーワード
    pub fn keyword_in_name<'k>(name: &str, keywords: &'k [String]) -> Option<&'k str> {
        keywords
            .iter()
            .find(|keyword| name.contains(keyword.as_str()))
            .map(|k| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn file(path: &str, secs: u64) -> FileEntry {
        FileEntry::new(
            PathBuf::from(path),
            SystemTime::UNIX_EPOCH + Duration::from_secs(secs),
        )
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_latest_run_folder_picks_newest_stamp() {
        let dirs = names(&[
            "2025.07.25_19.28.10",
            "notes",
            "2025.07.30_21.48.51",
            "2025.07.28_09.00.00",
        ]);
        let latest = RetentionService::latest_run_folder(Path::new("/r/D3/HotVmin"), &dirs).unwrap();

        assert_eq!(latest.name, "2025.07.30_21.48.51");
        assert_eq!(latest.path, PathBuf::from("/r/D3/HotVmin/2025.07.30_21.48.51"));
    }

    #[test]
    fn test_latest_run_folder_none_without_stamps() {
        let dirs = names(&["notes", "99999999_999_+99_+99"]);
        assert!(RetentionService::latest_run_folder(Path::new("/r"), &dirs).is_none());
        assert!(RetentionService::latest_run_folder(Path::new("/r"), &[]).is_none());
    }

    #[test]
    fn test_newest_file_first_wins_ties() {
        let files = vec![file("/a/1.txt", 10), file("/a/2.txt", 30), file("/a/3.txt", 30)];
        let newest = RetentionService::newest_file(&files).unwrap();
        assert_eq!(newest.name, "2.txt");
    }

    #[test]
    fn test_first_keyword_match_respects_keyword_order() {
        let files = vec![
            file("/run/unit_HotGNG.xlsx", 50),
            file("/run/old_HotVmin.xlsx", 10),
            file("/run/new_HotVmin.xlsx", 20),
        ];
        let keywords = names(&["HotVmin.xlsx", "HotGNG.xlsx"]);

        let (keyword, newest) = RetentionService::first_keyword_match(&files, &keywords).unwrap();
        assert_eq!(keyword, "HotVmin.xlsx");
        assert_eq!(newest.name, "new_HotVmin.xlsx");
    }

    #[test]
    fn test_first_keyword_match_falls_back() {
        let files = vec![file("/run/unit_HotGNG.xlsx", 50), file("/run/readme.txt", 60)];
        let keywords = names(&["HotVmin.xlsx", "HotGNG.xlsx"]);

        let (keyword, _) = RetentionService::first_keyword_match(&files, &keywords).unwrap();
        assert_eq!(keyword, "HotGNG.xlsx");

        let only_text = vec![file("/run/readme.txt", 60)];
        assert!(RetentionService::first_keyword_match(&only_text, &keywords).is_none());
    }

    #[test]
    fn test_keyword_in_name() {
        let keywords = names(&["HotVmin.xlsx", "HotGNG.xlsx"]);
        assert_eq!(
            RetentionService::keyword_in_name("a_HotGNG.xlsx", &keywords),
            Some("HotGNG.xlsx")
        );
        assert_eq!(RetentionService::keyword_in_name("a.csv", &keywords), None);
    }
}
