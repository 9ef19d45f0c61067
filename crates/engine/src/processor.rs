use code_counter_core::{LanguageRule, LanguageRuleRegistry, LineClassifier, LineCounts};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};

/// この長さの先頭バイトに NUL があればバイナリとみなす
pub const BINARY_CHECK_LEN: usize = 8 * 1024;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 1ファイルの集計結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Counted(LineCounts),
    /// 言語を解決できなかった
    Unsupported,
    Binary,
    ReadError { message: String },
}

impl Outcome {
    #[must_use]
    pub const fn counts(&self) -> Option<&LineCounts> {
        match self {
            Self::Counted(counts) => Some(counts),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    pub path: PathBuf,
    /// 解決した言語 id (未解決なら `None`)
    pub language: Option<String>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl FileResult {
    #[must_use]
    pub fn counted(path: impl Into<PathBuf>, language: impl Into<String>, counts: LineCounts) -> Self {
        Self {
            path: path.into(),
            language: Some(language.into()),
            outcome: Outcome::Counted(counts),
        }
    }

    #[must_use]
    pub const fn counts(&self) -> Option<&LineCounts> {
        self.outcome.counts()
    }

    /// 表示用の言語名
    #[must_use]
    pub fn language_name(&self) -> &str {
        match (&self.language, &self.outcome) {
            (_, Outcome::Binary) => "(Binary)",
            (Some(id), _) => id,
            (None, _) => "(Unsupported)",
        }
    }
}

/// Process a single file and return its result.
///
/// Read failures become `Outcome::ReadError`; this never aborts the run.
#[must_use]
pub fn process_file(path: PathBuf, registry: &LanguageRuleRegistry, language: Option<&str>) -> FileResult {
    let Some(rule) = registry.resolve(language, Some(&path)) else {
        log::debug!("{}: unsupported", path.display());
        return FileResult {
            path,
            language: None,
            outcome: Outcome::Unsupported,
        };
    };

    let outcome = match count_file(&path, rule) {
        Ok(outcome) => outcome,
        Err(err) => {
            log::warn!("{err}");
            Outcome::ReadError {
                message: err.to_string(),
            }
        }
    };
    log::debug!("{}: {} -> {:?}", path.display(), rule.id(), outcome);

    FileResult {
        path,
        language: Some(rule.id().to_string()),
        outcome,
    }
}

fn count_file(path: &Path, rule: &LanguageRule) -> Result<Outcome> {
    let file = File::open(path).map_err(|e| EngineError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = BufReader::with_capacity(BINARY_CHECK_LEN, file);
    count_reader(&mut reader, rule).map_err(|e| EngineError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// 行単位で読みながら分類する (非 UTF-8 は置換文字で読み進める)
///
/// # Errors
/// Returns the underlying I/O error.
pub fn count_reader<R: BufRead>(reader: &mut R, rule: &LanguageRule) -> std::io::Result<Outcome> {
    // Binary check (Initial buffer check)
    {
        let buffer = reader.fill_buf()?;
        if buffer.is_empty() {
            return Ok(Outcome::Counted(LineCounts::zero()));
        }
        if buffer.contains(&0) {
            return Ok(Outcome::Binary);
        }
        if buffer.starts_with(UTF8_BOM) {
            reader.consume(UTF8_BOM.len());
        }
    }

    let mut scanner = LineClassifier::new(rule).scanner();
    let mut line_buf = Vec::new();
    loop {
        line_buf.clear();
        if reader.read_until(b'\n', &mut line_buf)? == 0 {
            break;
        }
        scanner.process_line(&String::from_utf8_lossy(&line_buf));
    }
    Ok(Outcome::Counted(scanner.finish()))
}
