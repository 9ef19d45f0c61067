//! 言語ごとの字句ルール
//!
//! `LanguageRule` は一度構築されたら不変で、複数ファイルの並列カウントから
//! `Arc` 経由で読み取り専用に共有されます。更新は `merge` が返す新しい値で行います。

use serde::{Deserialize, Serialize};

/// 開始/終了トークンの組 (`/*` と `*/` など)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    pub begin: String,
    pub end: String,
    /// バックスラッシュをエスケープとして扱わない (生文字列)
    #[serde(default)]
    pub raw: bool,
}

impl TokenPair {
    #[must_use]
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
            raw: false,
        }
    }

    /// 中身にエスケープを持たない組 (Go の `` ` ``、C# の `@"` など)
    #[must_use]
    pub fn raw(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            raw: true,
            ..Self::new(begin, end)
        }
    }

    /// 空トークンはスキャナを無限ループさせるため無効
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.begin.is_empty() && !self.end.is_empty()
    }
}

/// 1言語分の字句ルール
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRule {
    id: String,
    aliases: Vec<String>,
    line_comments: Vec<String>,
    block_comments: Vec<TokenPair>,
    block_strings: Vec<TokenPair>,
    nested: bool,
    plain_apostrophe: bool,
}

impl LanguageRule {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        union_into(&mut self.aliases, aliases.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_line_comments<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        union_into(
            &mut self.line_comments,
            tokens.into_iter().map(Into::into).filter(|t: &String| !t.is_empty()),
        );
        self
    }

    #[must_use]
    pub fn with_block_comments<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = TokenPair>,
    {
        union_into(&mut self.block_comments, pairs.into_iter().filter(TokenPair::is_valid));
        self
    }

    #[must_use]
    pub fn with_block_strings<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = TokenPair>,
    {
        union_into(&mut self.block_strings, pairs.into_iter().filter(TokenPair::is_valid));
        self
    }

    #[must_use]
    pub const fn with_nested(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }

    /// `'` を文字列の開始として扱わない (ライフタイムやクォート記法を持つ言語)
    #[must_use]
    pub const fn with_plain_apostrophe(mut self, plain: bool) -> Self {
        self.plain_apostrophe = plain;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    #[must_use]
    pub fn line_comments(&self) -> &[String] {
        &self.line_comments
    }

    #[must_use]
    pub fn block_comments(&self) -> &[TokenPair] {
        &self.block_comments
    }

    #[must_use]
    pub fn block_strings(&self) -> &[TokenPair] {
        &self.block_strings
    }

    /// ブロックコメントがネストするかどうか
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        self.nested
    }

    #[must_use]
    pub const fn has_plain_apostrophe(&self) -> bool {
        self.plain_apostrophe
    }

    /// 同一 id の2つのルールを統合する
    ///
    /// エイリアスとトークンは和集合 (既存の順序を保ち、新規分を末尾に追加)。
    /// ネスト指定と `'` の扱いは、どちらかが有効なら有効になります。
    #[must_use]
    pub fn merge(&self, incoming: &Self) -> Self {
        debug_assert_eq!(self.id, incoming.id, "merge requires matching ids");
        let mut merged = self.clone();
        union_into(&mut merged.aliases, incoming.aliases.iter().cloned());
        union_into(&mut merged.line_comments, incoming.line_comments.iter().cloned());
        union_into(&mut merged.block_comments, incoming.block_comments.iter().cloned());
        union_into(&mut merged.block_strings, incoming.block_strings.iter().cloned());
        merged.nested |= incoming.nested;
        merged.plain_apostrophe |= incoming.plain_apostrophe;
        merged
    }
}

fn union_into<T: PartialEq>(dst: &mut Vec<T>, items: impl Iterator<Item = T>) {
    for item in items {
        if !dst.contains(&item) {
            dst.push(item);
        }
    }
}
