//! ディレクトリ別・言語別の集計表

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use code_counter_core::Statistics;
use hashbrown::HashMap;
use serde::Serialize;

use crate::processor::FileResult;

/// 集計済みの結果表
///
/// 集計対象は `Outcome::Counted` のファイルだけです。それ以外のファイルは
/// `files()` に残りますが、どの集計ノードにも加算されません。
#[derive(Debug, Clone, Serialize)]
pub struct ResultTable {
    root: PathBuf,
    total: Statistics,
    languages: Vec<Statistics>,
    directories: Vec<Statistics>,
    files: Vec<FileResult>,
}

impl ResultTable {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, results: &[FileResult]) -> Self {
        let root = root.into();
        let mut total = Statistics::new("Total");
        let mut languages: Vec<Statistics> = Vec::new();
        let mut lang_index: HashMap<String, usize> = HashMap::new();
        let mut directories: BTreeMap<String, Statistics> = BTreeMap::new();

        let mut files = results.to_vec();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        for result in &files {
            let Some(counts) = result.counts() else {
                continue;
            };

            for dir in ancestors(relative_dir(&root, &result.path)) {
                directories
                    .entry(dir.clone())
                    .or_insert_with(|| Statistics::new(dir))
                    .append(counts);
            }

            let lang = result.language_name();
            let idx = *lang_index.entry(lang.to_string()).or_insert_with(|| {
                languages.push(Statistics::new(lang));
                languages.len() - 1
            });
            languages[idx].append(counts);
            total.append(counts);
        }

        Self {
            root,
            total,
            languages,
            directories: directories.into_values().collect(),
            files,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn total(&self) -> &Statistics {
        &self.total
    }

    /// 初出順の言語別集計 (CSV の列順)
    #[must_use]
    pub fn languages(&self) -> &[Statistics] {
        &self.languages
    }

    /// コード行の多い順 (同数なら初出順)
    #[must_use]
    pub fn languages_by_code(&self) -> Vec<&Statistics> {
        let mut langs: Vec<&Statistics> = self.languages.iter().collect();
        langs.sort_by(|a, b| b.code.cmp(&a.code));
        langs
    }

    /// 名前順のディレクトリ別集計 (`.` が基準ディレクトリ)
    #[must_use]
    pub fn directories(&self) -> &[Statistics] {
        &self.directories
    }

    /// パス順の全ファイル結果
    #[must_use]
    pub fn files(&self) -> &[FileResult] {
        &self.files
    }

    /// 基準ディレクトリからの相対表示パス
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        to_slash(path.strip_prefix(&self.root).unwrap_or(path))
    }
}

fn relative_dir(root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    match rel.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => to_slash(parent),
        _ => ".".to_string(),
    }
}

/// `a/b/c` -> `a/b/c`, `a/b`, `a`, `.`
fn ancestors(dir: String) -> Vec<String> {
    if dir == "." {
        return vec![dir];
    }
    let mut chain: Vec<String> = Path::new(&dir)
        .ancestors()
        .map(to_slash)
        .filter(|p| !p.is_empty())
        .collect();
    if !chain.iter().any(|p| p == "/") {
        chain.push(".".to_string());
    }
    chain
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
