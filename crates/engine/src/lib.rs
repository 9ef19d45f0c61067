// crates/engine/src/lib.rs
use rayon::prelude::*;
use std::path::Path;

pub mod config;
pub mod definitions;
pub mod error;
pub mod filesystem;
pub mod processor;
pub mod table;

use code_counter_core::{LanguageRuleRegistry, LineCounts};

use crate::config::Config;
use crate::error::Result;
use crate::processor::FileResult;

pub use crate::definitions::{Definitions, load_registry};
pub use crate::processor::Outcome;
pub use crate::table::ResultTable;

/// 1回の実行結果 (パス順)
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    pub files: Vec<FileResult>,
}

impl RunResult {
    /// 結果表を作る
    #[must_use]
    pub fn table(&self, root: impl Into<std::path::PathBuf>) -> ResultTable {
        ResultTable::new(root, &self.files)
    }
}

/// Run the file counting engine.
///
/// Files are classified in parallel; each file's failure is recorded on its own
/// `FileResult` and never affects the others.
///
/// # Errors
///
/// Returns an error only for critical failures (e.g., missing roots, invalid overrides).
pub fn run(config: &Config, registry: &LanguageRuleRegistry) -> Result<RunResult> {
    let (tx, rx) = crossbeam_channel::bounded(1024);
    let (err_tx, err_rx) = std::sync::mpsc::channel();

    let walk_cfg = config.walk.clone();
    std::thread::spawn(move || {
        if let Err(e) = crate::filesystem::walk_parallel(&walk_cfg, &tx) {
            let _ = err_tx.send(e);
        }
    });

    let language = config.language.as_deref();
    let mut files: Vec<FileResult> = rx
        .into_iter()
        .par_bridge()
        .map(|path| processor::process_file(path, registry, language))
        .collect();

    // Check for walk errors that occurred in the background thread
    if let Ok(walk_err) = err_rx.try_recv() {
        return Err(walk_err);
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    log::info!("counted {} files", files.len());
    Ok(RunResult { files })
}

/// 1つのテキストを数える (明示 id を優先し、なければパスで解決)
///
/// 言語を解決できなければ `None` を返します。
#[must_use]
pub fn count_text(
    registry: &LanguageRuleRegistry,
    language: Option<&str>,
    path: Option<&Path>,
    text: &str,
) -> Option<LineCounts> {
    let rule = registry.resolve(language, path)?;
    Some(code_counter_core::classify(rule, text))
}
