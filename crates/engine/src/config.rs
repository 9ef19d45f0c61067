use derive_builder::Builder;
use std::path::PathBuf;

/// ディレクトリ走査の設定
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default)]
    pub roots: Vec<PathBuf>,
    #[builder(default = "1")]
    pub threads: usize,
    #[builder(default)]
    pub hidden: bool,
    #[builder(default = "true")]
    pub git_ignore: bool,
    #[builder(default)]
    pub max_depth: Option<usize>,
    #[builder(default)]
    pub follow_links: bool,
    #[builder(default)]
    pub override_include: Vec<String>,
    #[builder(default)]
    pub override_exclude: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            roots: vec![],
            threads: 1,
            hidden: false,
            git_ignore: true,
            max_depth: None,
            follow_links: false,
            override_include: vec![],
            override_exclude: vec![],
        }
    }
}

/// エンジン全体の設定
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub walk: WalkOptions,

    /// 集計の基準ディレクトリ (ディレクトリ別集計の相対パス計算に使う)
    #[builder(default = "PathBuf::from(\".\")")]
    pub root: PathBuf,

    /// すべてのファイルに適用する言語 id (解決できなければパスで解決)
    #[builder(default, setter(strip_option))]
    pub language: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            walk: WalkOptions::default(),
            root: PathBuf::from("."),
            language: None,
        }
    }
}
