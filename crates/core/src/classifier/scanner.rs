//! 行分類ステートマシン
//!
//! 1行ずつ文字を左から右へ1回だけ走査し、状態遷移を追跡します。
//! ブロックコメントと複数行文字列の状態は行をまたいで保持され、
//! 通常の文字列 (`"` / `'`) は行末で閉じられます。

use crate::language::LanguageRule;
use crate::stats::LineCounts;

/// 1行の分類結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Code,
    Comment,
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    InString(char),
    InBlockString(usize),
    InBlockComment { pair: usize, depth: usize },
}

/// `Code` 状態で位置に一致したトークン (優先度順に並べてある)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Token {
    BlockString(usize),
    Quote(char),
    BlockComment(usize),
    LineComment,
}

const QUOTES: [char; 2] = ['"', '\''];

#[derive(Debug, Default, Clone, Copy)]
struct LineFlags {
    has_code: bool,
    has_comment: bool,
}

/// 行単位でフィードできるスキャナ
///
/// 行をまたぐ状態を持つため、1ファイルにつき1インスタンスを使います。
///
/// ```rust
/// use code_counter_core::classifier::{LineKind, LineScanner};
/// use code_counter_core::language::{LanguageRule, TokenPair};
///
/// let rule = LanguageRule::new("c")
///     .with_line_comments(["//"])
///     .with_block_comments([TokenPair::new("/*", "*/")]);
/// let mut scanner = LineScanner::new(&rule);
///
/// assert_eq!(scanner.process_line("int x; // note"), LineKind::Code);
/// assert_eq!(scanner.process_line("/* open"), LineKind::Comment);
/// assert_eq!(scanner.process_line(""), LineKind::Comment);
/// assert_eq!(scanner.process_line("*/ y();"), LineKind::Code);
/// assert_eq!(scanner.finish().total(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct LineScanner<'r> {
    rule: &'r LanguageRule,
    state: State,
    counts: LineCounts,
}

impl<'r> LineScanner<'r> {
    #[must_use]
    pub const fn new(rule: &'r LanguageRule) -> Self {
        Self {
            rule,
            state: State::Code,
            counts: LineCounts::zero(),
        }
    }

    /// ブロックコメント内にいるかどうか
    #[must_use]
    pub const fn is_in_block_comment(&self) -> bool {
        matches!(self.state, State::InBlockComment { .. })
    }

    /// 1行を処理して分類する
    ///
    /// 末尾の `\n` (および `\r`) は含まれていても構いません。
    pub fn process_line(&mut self, line: &str) -> LineKind {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let mut flags = LineFlags::default();

        match self.state {
            State::InBlockComment { .. } => flags.has_comment = true,
            State::InBlockString(_) => flags.has_code = true,
            State::Code | State::InString(_) => {}
        }

        let mut pos = 0;
        while pos < line.len() {
            let rest = &line[pos..];
            pos += match self.state {
                State::Code => self.step_code(rest, &mut flags),
                State::InString(quote) => self.step_string(rest, quote),
                State::InBlockString(idx) => self.step_block_string(rest, idx),
                State::InBlockComment { pair, depth } => self.step_block_comment(rest, pair, depth),
            };
        }

        // 通常の文字列は行をまたがない
        if matches!(self.state, State::InString(_)) {
            self.state = State::Code;
        }

        let kind = if flags.has_code {
            LineKind::Code
        } else if flags.has_comment {
            LineKind::Comment
        } else {
            LineKind::Blank
        };
        match kind {
            LineKind::Code => self.counts.code += 1,
            LineKind::Comment => self.counts.comment += 1,
            LineKind::Blank => self.counts.blank += 1,
        }
        kind
    }

    /// 集計結果を返す (未終了のコメント・文字列はそのまま)
    #[must_use]
    pub const fn finish(self) -> LineCounts {
        self.counts
    }

    fn step_code(&mut self, rest: &str, flags: &mut LineFlags) -> usize {
        let c = first_char(rest);
        if c.is_whitespace() {
            return c.len_utf8();
        }

        let Some((token, len)) = self.match_token(rest) else {
            flags.has_code = true;
            return c.len_utf8();
        };

        match token {
            Token::BlockString(idx) => {
                flags.has_code = true;
                self.state = State::InBlockString(idx);
                len
            }
            Token::Quote(quote) => {
                flags.has_code = true;
                self.state = State::InString(quote);
                len
            }
            Token::BlockComment(pair) => {
                flags.has_comment = true;
                self.state = State::InBlockComment { pair, depth: 1 };
                len
            }
            Token::LineComment => {
                // 行末までコメント
                flags.has_comment = true;
                rest.len()
            }
        }
    }

    /// 現在位置で一致する最長のトークン (同長なら文字列 > ブロックコメント > 行コメント)
    fn match_token(&self, rest: &str) -> Option<(Token, usize)> {
        let rule = self.rule;
        let block_strings = rule
            .block_strings()
            .iter()
            .enumerate()
            .filter(|(_, p)| rest.starts_with(p.begin.as_str()))
            .map(|(i, p)| (Token::BlockString(i), p.begin.len()));
        // 行コメントとして登録された引用符 (VB の `'` など) と、`'` を文字列に使わない言語の `'` は文字列を開かない
        let quotes = QUOTES
            .iter()
            .filter(|&&q| rest.starts_with(q))
            .filter(|&&q| !(q == '\'' && rule.has_plain_apostrophe()))
            .filter(|&&q| !rule.line_comments().iter().any(|t| t.len() == 1 && t.starts_with(q)))
            .map(|&q| (Token::Quote(q), q.len_utf8()));
        let block_comments = rule
            .block_comments()
            .iter()
            .enumerate()
            .filter(|(_, p)| rest.starts_with(p.begin.as_str()))
            .map(|(i, p)| (Token::BlockComment(i), p.begin.len()));
        let line_comments = rule
            .line_comments()
            .iter()
            .filter(|t| rest.starts_with(t.as_str()))
            .map(|t| (Token::LineComment, t.len()));

        block_strings
            .chain(quotes)
            .chain(block_comments)
            .chain(line_comments)
            .min_by(|(ta, la), (tb, lb)| lb.cmp(la).then_with(|| ta.cmp(tb)))
    }

    fn step_string(&mut self, rest: &str, quote: char) -> usize {
        let c = first_char(rest);
        if c == '\\' {
            return escape_len(rest);
        }
        if c == quote {
            self.state = State::Code;
        }
        c.len_utf8()
    }

    fn step_block_string(&mut self, rest: &str, idx: usize) -> usize {
        let pair = &self.rule.block_strings()[idx];
        if rest.starts_with(pair.end.as_str()) {
            self.state = State::Code;
            return pair.end.len();
        }
        let c = first_char(rest);
        if c == '\\' && !pair.raw {
            return escape_len(rest);
        }
        c.len_utf8()
    }

    fn step_block_comment(&mut self, rest: &str, pair: usize, depth: usize) -> usize {
        let tokens = &self.rule.block_comments()[pair];
        if rest.starts_with(tokens.end.as_str()) {
            self.state = if depth > 1 {
                State::InBlockComment { pair, depth: depth - 1 }
            } else {
                State::Code
            };
            return tokens.end.len();
        }
        if self.rule.is_nested() && rest.starts_with(tokens.begin.as_str()) {
            self.state = State::InBlockComment { pair, depth: depth + 1 };
            return tokens.begin.len();
        }
        first_char(rest).len_utf8()
    }
}

/// `rest` は空でないことが呼び出し側で保証されている
fn first_char(rest: &str) -> char {
    rest.chars().next().unwrap_or('\0')
}

/// バックスラッシュと、続く1文字を読み飛ばす長さ
fn escape_len(rest: &str) -> usize {
    let mut chars = rest.chars();
    let backslash = chars.next().map_or(0, char::len_utf8);
    backslash + chars.next().map_or(0, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::TokenPair;

    fn c_rule() -> LanguageRule {
        LanguageRule::new("c")
            .with_line_comments(["//"])
            .with_block_comments([TokenPair::new("/*", "*/")])
    }

    #[test]
    fn test_state_persists_across_lines() {
        let rule = c_rule();
        let mut scanner = LineScanner::new(&rule);
        assert_eq!(scanner.process_line("x(); /* start"), LineKind::Code);
        assert!(scanner.is_in_block_comment());
        assert_eq!(scanner.process_line("   "), LineKind::Comment);
        assert_eq!(scanner.process_line("end */"), LineKind::Comment);
        assert!(!scanner.is_in_block_comment());
        assert_eq!(scanner.process_line("   "), LineKind::Blank);
    }

    #[test]
    fn test_string_closes_at_line_end() {
        let rule = c_rule();
        let mut scanner = LineScanner::new(&rule);
        assert_eq!(scanner.process_line(r#"s = "unterminated // still string"#), LineKind::Code);
        assert_eq!(scanner.process_line("// comment again"), LineKind::Comment);
    }

    #[test]
    fn test_escaped_quote_does_not_close() {
        let rule = c_rule();
        let mut scanner = LineScanner::new(&rule);
        assert_eq!(scanner.process_line(r#"s = "a \" /* b";"#), LineKind::Code);
        assert!(!scanner.is_in_block_comment());
        assert_eq!(scanner.process_line("// c"), LineKind::Comment);
    }

    #[test]
    fn test_longest_token_wins() {
        let rule = LanguageRule::new("python")
            .with_line_comments(["#"])
            .with_block_comments([TokenPair::new("\"\"\"", "\"\"\"")]);
        let mut scanner = LineScanner::new(&rule);
        assert_eq!(scanner.process_line("\"\"\""), LineKind::Comment);
        assert_eq!(scanner.process_line("docstring 'quoted'"), LineKind::Comment);
        assert_eq!(scanner.process_line("\"\"\""), LineKind::Comment);
        assert_eq!(scanner.process_line("x = \"\""), LineKind::Code);
    }

    #[test]
    fn test_nested_block_comments() {
        let rule = c_rule().with_nested(true);
        let mut scanner = LineScanner::new(&rule);
        assert_eq!(scanner.process_line("/* outer /* inner */"), LineKind::Comment);
        assert!(scanner.is_in_block_comment());
        assert_eq!(scanner.process_line("still comment */"), LineKind::Comment);
        assert_eq!(scanner.process_line("code();"), LineKind::Code);
    }

    #[test]
    fn test_non_nested_ignores_inner_begin() {
        let rule = c_rule();
        let mut scanner = LineScanner::new(&rule);
        assert_eq!(scanner.process_line("/* outer /* inner */"), LineKind::Comment);
        assert!(!scanner.is_in_block_comment());
        assert_eq!(scanner.process_line("still_code */"), LineKind::Code);
    }

    #[test]
    fn test_block_string_spans_lines() {
        let rule = c_rule().with_block_strings([TokenPair::new("`", "`")]);
        let mut scanner = LineScanner::new(&rule);
        assert_eq!(scanner.process_line("const t = `"), LineKind::Code);
        assert_eq!(scanner.process_line("// inside template"), LineKind::Code);
        assert_eq!(scanner.process_line(""), LineKind::Code);
        assert_eq!(scanner.process_line("`; // done"), LineKind::Code);
        assert_eq!(scanner.process_line("// real comment"), LineKind::Comment);
    }

    #[test]
    fn test_raw_block_string_ends_at_backslash() {
        let rule = c_rule().with_block_strings([TokenPair::raw("`", "`")]);
        let mut scanner = LineScanner::new(&rule);
        assert_eq!(scanner.process_line("sep := `\\`"), LineKind::Code);
        assert_eq!(scanner.process_line("// comment"), LineKind::Comment);

        let escaped = c_rule().with_block_strings([TokenPair::new("`", "`")]);
        let mut scanner = LineScanner::new(&escaped);
        assert_eq!(scanner.process_line("t = `\\`"), LineKind::Code);
        assert_eq!(scanner.process_line("// still inside"), LineKind::Code);
    }

    #[test]
    fn test_plain_apostrophe_does_not_open_string() {
        let rule = c_rule().with_plain_apostrophe(true);
        let mut scanner = LineScanner::new(&rule);
        assert_eq!(scanner.process_line("impl<'a> X { /* start"), LineKind::Code);
        assert!(scanner.is_in_block_comment());
        assert_eq!(scanner.process_line("end */"), LineKind::Comment);

        let mut scanner = LineScanner::new(&rule);
        assert_eq!(scanner.process_line("s = \"it's // here\";"), LineKind::Code);
        assert!(!scanner.is_in_block_comment());
    }

    #[test]
    fn test_multiple_block_pairs_close_with_their_own_end() {
        let rule = c_rule().with_block_comments([TokenPair::new("<!--", "-->")]);
        let mut scanner = LineScanner::new(&rule);
        assert_eq!(scanner.process_line("<!-- */ still open"), LineKind::Comment);
        assert_eq!(scanner.process_line("--> tail();"), LineKind::Code);
    }

    #[test]
    fn test_crlf_and_unicode() {
        let rule = c_rule();
        let mut scanner = LineScanner::new(&rule);
        assert_eq!(scanner.process_line("  \r\n"), LineKind::Blank);
        assert_eq!(scanner.process_line("// 日本語のコメント\r\n"), LineKind::Comment);
        assert_eq!(scanner.process_line("let s = \"日本語\";\r\n"), LineKind::Code);
        assert_eq!(scanner.finish(), LineCounts::new(1, 1, 1));
    }
}
