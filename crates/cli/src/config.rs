// crates/cli/src/config.rs
use crate::args::Args;
use crate::error::{AppError, Result};
pub use code_counter_engine::config::{Config, ConfigBuilder, WalkOptions, WalkOptionsBuilder};
use std::path::PathBuf;

/// 引数からエンジン設定を作る
///
/// # Errors
/// Returns an error if the builders reject the options.
pub fn engine_config(args: &Args) -> Result<Config> {
    let walk = walk_options_from_args(args)?;
    let root = report_root(&args.paths);

    let mut builder = ConfigBuilder::default();
    builder.walk(walk).root(root);
    if let Some(language) = &args.language {
        builder.language(language.clone());
    }
    builder.build().map_err(|e| AppError::Config(e.to_string()))
}

/// 並列数 (`--jobs` か CPU 数、最低 1)
#[must_use]
pub fn jobs(args: &Args) -> usize {
    args.jobs.unwrap_or_else(num_cpus::get).max(1)
}

/// 関連付けは `--assoc` の指定順
#[must_use]
pub fn associations(args: &Args) -> Vec<(String, String)> {
    args.assoc.iter().cloned().map(Into::into).collect()
}

fn walk_options_from_args(args: &Args) -> Result<WalkOptions> {
    let roots = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };

    WalkOptionsBuilder::default()
        .roots(roots)
        .threads(jobs(args))
        .hidden(args.hidden)
        .git_ignore(!args.no_gitignore)
        .max_depth(args.max_depth)
        .follow_links(args.follow)
        .override_include(args.include.clone())
        .override_exclude(args.exclude.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// ディレクトリ1つを指定した場合はそこを基準にし、それ以外はカレントディレクトリ
fn report_root(paths: &[PathBuf]) -> PathBuf {
    match paths {
        [single] if single.is_dir() => single.clone(),
        _ => PathBuf::from("."),
    }
}
