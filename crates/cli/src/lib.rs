// crates/cli/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod options;
pub mod parsers;
pub mod presentation;

use std::io::Write;

use crate::args::Args;
use crate::error::{AppError, Result};
use crate::presentation::ReportOptions;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 引数どおりに集計してレポートを `out` へ書き出す
///
/// # Errors
/// Returns an error if the definitions cannot be loaded, the walk fails,
/// no file was found, or the report cannot be written.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let registry = code_counter_engine::load_registry(args.definitions.as_deref(), &config::associations(args))?;

    if args.list_languages {
        return presentation::write_languages(out, &registry);
    }

    let config = config::engine_config(args)?;
    if let Err(err) = rayon::ThreadPoolBuilder::new()
        .num_threads(config.walk.threads)
        .build_global()
    {
        log::debug!("thread pool already initialized: {err}");
    }

    let result = code_counter_engine::run(&config, &registry)?;
    log::info!("count {} files", result.files.len());
    if result.files.is_empty() {
        return Err(AppError::NoTargetFiles);
    }

    let table = result.table(config.root.clone());
    let opts = ReportOptions {
        commas: !args.no_commas,
        show_unsupported: args.show_unsupported,
        ..ReportOptions::new(args.format)
    };
    presentation::write_report(out, &table, &opts)?;
    out.flush()?;
    Ok(())
}
