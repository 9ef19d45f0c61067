//! # Line Classifier
//!
//! Splits a text into code / comment / blank lines using one language's
//! lexical rules.
//!
//! ## Rules
//!
//! | Line | Result |
//! |------|--------|
//! | Any non-whitespace outside comments (strings included) | code |
//! | Only comment tokens/content, or started inside a block comment | comment |
//! | Whitespace only, started outside block comments | blank |
//!
//! Block comments and configured block strings persist across lines.
//! Ordinary `"`/`'` strings are line-local: an unterminated one runs to the end
//! of its line. Backslash escapes the next character, except inside block
//! strings marked raw (Go backticks, C# `@"`, Lua `[[`).
//!
//! Classification is pure and never fails; malformed input just degrades.
//!
//! ## Usage Example
//!
//! ```rust
//! use code_counter_core::classifier::LineClassifier;
//! use code_counter_core::language::{LanguageRule, TokenPair};
//!
//! let rule = LanguageRule::new("c")
//!     .with_line_comments(["//"])
//!     .with_block_comments([TokenPair::new("/*", "*/")]);
//!
//! let counts = LineClassifier::new(&rule).classify("/*\n\n*/\ncode();");
//! assert_eq!((counts.code, counts.comment, counts.blank), (1, 3, 0));
//! ```

mod scanner;

pub use scanner::{LineKind, LineScanner};

use crate::language::LanguageRule;
use crate::stats::LineCounts;

const BOM: char = '\u{feff}';

/// 言語ルールに束縛された分類器
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier<'r> {
    rule: &'r LanguageRule,
}

impl<'r> LineClassifier<'r> {
    #[must_use]
    pub const fn new(rule: &'r LanguageRule) -> Self {
        Self { rule }
    }

    /// テキスト全体を1パスで分類する
    #[must_use]
    pub fn classify(&self, text: &str) -> LineCounts {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let mut scanner = LineScanner::new(self.rule);
        for line in text.split_inclusive('\n') {
            scanner.process_line(line);
        }
        scanner.finish()
    }

    /// 新しい行スキャナを作る (ストリーミング読み込み用)
    #[must_use]
    pub const fn scanner(&self) -> LineScanner<'r> {
        LineScanner::new(self.rule)
    }
}

/// `rule` で `text` を分類する
#[must_use]
pub fn classify(rule: &LanguageRule, text: &str) -> LineCounts {
    LineClassifier::new(rule).classify(text)
}

/// `\n` 区切りの行数 (末尾の未終端行を含む、空テキストは 0)
///
/// 先頭の BOM は `classify` と同じく数えません。
#[must_use]
pub fn count_lines(text: &str) -> usize {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let newlines = text.bytes().filter(|&b| b == b'\n').count();
    newlines + usize::from(!text.is_empty() && !text.ends_with('\n'))
}
