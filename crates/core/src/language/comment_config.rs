//! コメント構文設定 (language-configuration 形式) の読み込み
//!
//! 受け付ける形式:
//!
//! ```json
//! { "comments": { "lineComment": "//", "blockComment": ["/*", "*/"] } }
//! ```
//!
//! `comments` を省いた裸のオブジェクト、`lineComment` の配列、
//! `blockComment` のペア配列 (`[["/*", "*/"], ["<!--", "-->"]]`) も可。
//! 入力は JSONC (コメント・末尾カンマ付き) を許容します。

use serde::Deserialize;

use super::rule::TokenPair;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LineToken {
    Plain(String),
    Detailed { comment: String },
}

impl LineToken {
    fn into_token(self) -> String {
        match self {
            Self::Plain(s) | Self::Detailed { comment: s } => s,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LineTokens {
    One(LineToken),
    Many(Vec<LineToken>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BlockTokens {
    One((String, String)),
    Many(Vec<(String, String)>),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComments {
    line_comment: Option<LineTokens>,
    block_comment: Option<BlockTokens>,
}

/// パース済みのコメントトークン定義
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentConfig {
    pub line_comments: Vec<String>,
    pub block_comments: Vec<TokenPair>,
}

impl CommentConfig {
    /// JSONC テキストをパースする
    ///
    /// # Errors
    ///
    /// JSON として不正、またはコメント定義の型が合わない場合
    /// `CoreError::MalformedConfiguration` を返します。
    pub fn parse(reference: &str, text: &str) -> Result<Self> {
        let malformed = |details: String| CoreError::MalformedConfiguration {
            reference: reference.to_string(),
            details,
        };

        let stripped = strip_jsonc(text);
        let mut value: serde_json::Value =
            serde_json::from_str(&stripped).map_err(|e| malformed(e.to_string()))?;

        let comments = match value.get_mut("comments") {
            Some(inner) => inner.take(),
            None => value,
        };
        if comments.is_null() {
            return Ok(Self::default());
        }

        let raw: RawComments =
            serde_json::from_value(comments).map_err(|e| malformed(e.to_string()))?;
        Ok(raw.into())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_comments.is_empty() && self.block_comments.is_empty()
    }
}

impl From<RawComments> for CommentConfig {
    fn from(raw: RawComments) -> Self {
        let line_comments = match raw.line_comment {
            Some(LineTokens::One(t)) => vec![t.into_token()],
            Some(LineTokens::Many(ts)) => ts.into_iter().map(LineToken::into_token).collect(),
            None => Vec::new(),
        };
        let block_comments = match raw.block_comment {
            Some(BlockTokens::One((b, e))) => vec![TokenPair::new(b, e)],
            Some(BlockTokens::Many(pairs)) => {
                pairs.into_iter().map(|(b, e)| TokenPair::new(b, e)).collect()
            }
            None => Vec::new(),
        };
        Self {
            line_comments,
            block_comments,
        }
    }
}

/// JSONC から `//` `/* */` コメントと末尾カンマを取り除く
#[must_use]
pub fn strip_jsonc(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    let mut in_string = false;

    while i < len {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' && i + 1 < len {
                i += 1;
                out.push(chars[i]);
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < len && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < len && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(len);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}' | ']')) {
                    out.push(c);
                }
                i += 1;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}
