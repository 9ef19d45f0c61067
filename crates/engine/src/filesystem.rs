use crate::config::WalkOptions;
use crate::error::{EngineError, Result};
use crossbeam_channel::Sender;
use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};
use std::path::{Path, PathBuf};

/// Parallel recursive directory walk.
///
/// Sends every regular file below the roots to `tx`. Entries that cannot be
/// read are logged and skipped.
///
/// # Errors
/// Returns an error if a root does not exist or an override glob is invalid.
pub fn walk_parallel(options: &WalkOptions, tx: &Sender<PathBuf>) -> Result<()> {
    let Some((first, rest)) = options.roots.split_first() else {
        return Ok(());
    };

    for root in &options.roots {
        if !root.exists() {
            return Err(EngineError::Config(format!("No such file or directory: {}", root.display())));
        }
    }

    let mut builder = WalkBuilder::new(first);
    for root in rest {
        builder.add(root);
    }

    builder
        .threads(options.threads)
        .hidden(!options.hidden)
        .git_ignore(options.git_ignore)
        .git_global(options.git_ignore)
        .git_exclude(options.git_ignore)
        .ignore(options.git_ignore)
        .require_git(false)
        .follow_links(options.follow_links)
        .max_depth(options.max_depth);

    if let Some(overrides) = build_overrides(first, options)? {
        builder.overrides(overrides);
    }

    let walker = builder.build_parallel();
    walker.run(|| {
        let tx = tx.clone();
        Box::new(move |entry| {
            match entry {
                Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                    if tx.send(entry.into_path()).is_err() {
                        return ignore::WalkState::Quit;
                    }
                }
                Ok(_) => {}
                Err(err) => log::warn!("skipping entry: {err}"),
            }
            ignore::WalkState::Continue
        })
    });

    Ok(())
}

/// include と exclude を1つの `Override` にまとめる (exclude は `!` 接頭辞)
fn build_overrides(root: &Path, options: &WalkOptions) -> Result<Option<Override>> {
    if options.override_include.is_empty() && options.override_exclude.is_empty() {
        return Ok(None);
    }

    let mut ov_builder = OverrideBuilder::new(root);
    for ov in &options.override_include {
        ov_builder.add(ov)?;
    }
    for ov in &options.override_exclude {
        ov_builder.add(&format!("!{ov}"))?;
    }
    Ok(Some(ov_builder.build()?))
}
