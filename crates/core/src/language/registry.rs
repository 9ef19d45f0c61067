//! 言語ルールレジストリ
//!
//! 構築 (`RegistryBuilder`, 単一ライター) と参照 (`LanguageRuleRegistry`, 読み取り専用)
//! を型で分けています。設定が変わったら新しいレジストリを作り直します。
//!
//! 解決順序: 明示 id > ファイル名 > 拡張子 > glob 関連付け

use std::path::Path;
use std::sync::Arc;

use globset::{GlobBuilder, GlobMatcher};
use hashbrown::HashMap;
use serde::Deserialize;

use super::comment_config::CommentConfig;
use super::rule::{LanguageRule, TokenPair};
use crate::error::CoreError;

/// 言語定義フィードの1エントリ
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageDefinition {
    pub id: String,
    pub aliases: Vec<String>,
    pub extensions: Vec<String>,
    pub filenames: Vec<String>,
    pub line_comments: Vec<String>,
    pub block_comments: Vec<TokenPair>,
    pub nested: bool,
    /// `'` を文字列として扱わない
    pub plain_apostrophe: bool,
    /// コメント設定ペイロードの参照キー (設定ファイルのパスなど)
    pub configuration: Option<String>,
}

impl LanguageDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|s| (*s).to_string()));
        self
    }

    #[must_use]
    pub fn extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions.extend(extensions.iter().map(|s| (*s).to_string()));
        self
    }

    #[must_use]
    pub fn filenames(mut self, filenames: &[&str]) -> Self {
        self.filenames.extend(filenames.iter().map(|s| (*s).to_string()));
        self
    }

    #[must_use]
    pub fn line_comments(mut self, tokens: &[&str]) -> Self {
        self.line_comments.extend(tokens.iter().map(|s| (*s).to_string()));
        self
    }

    #[must_use]
    pub fn block_comment(mut self, begin: &str, end: &str) -> Self {
        self.block_comments.push(TokenPair::new(begin, end));
        self
    }

    #[must_use]
    pub const fn nested(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }

    #[must_use]
    pub const fn plain_apostrophe(mut self, plain: bool) -> Self {
        self.plain_apostrophe = plain;
        self
    }

    #[must_use]
    pub fn configuration(mut self, reference: impl Into<String>) -> Self {
        self.configuration = Some(reference.into());
        self
    }

    fn to_rule(&self) -> LanguageRule {
        LanguageRule::new(self.id.clone())
            .with_aliases(self.aliases.iter().cloned())
            .with_line_comments(self.line_comments.iter().cloned())
            .with_block_comments(self.block_comments.iter().cloned())
            .with_nested(self.nested)
            .with_plain_apostrophe(self.plain_apostrophe)
    }
}

/// 拡張子を先頭ドット付きに正規化する (`rs` -> `.rs`)
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

/// レジストリ構築器
///
/// `register` は同じ id への再登録をマージします。コメント設定は定義より後に
/// 届いても構いません。
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    rules: Vec<LanguageRule>,
    index: HashMap<String, usize>,
    aliases: HashMap<String, usize>,
    extensions: HashMap<String, usize>,
    filenames: HashMap<String, usize>,
    config_refs: HashMap<String, Vec<usize>>,
    comment_configs: HashMap<String, CommentConfig>,
    associations: Vec<(String, String)>,
    issues: Vec<CoreError>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 言語を登録する (同じ id なら既存ルールへマージ)
    pub fn register(&mut self, def: LanguageDefinition) -> &mut Self {
        if def.id.is_empty() {
            log::warn!("ignoring language definition without id");
            return self;
        }

        let incoming = def.to_rule();
        let idx = match self.index.get(&def.id) {
            Some(&idx) => {
                log::debug!("merging language definition '{}'", def.id);
                self.rules[idx] = self.rules[idx].merge(&incoming);
                idx
            }
            None => {
                self.rules.push(incoming);
                let idx = self.rules.len() - 1;
                self.index.insert(def.id.clone(), idx);
                idx
            }
        };

        for alias in &def.aliases {
            self.aliases.insert(alias.clone(), idx);
        }
        for ext in &def.extensions {
            self.extensions.insert(normalize_extension(ext), idx);
        }
        for name in &def.filenames {
            self.filenames.insert(name.clone(), idx);
        }

        if let Some(reference) = def.configuration {
            if let Some(conf) = self.comment_configs.get(&reference) {
                self.rules[idx] = apply_comment_config(&self.rules[idx], conf);
            }
            let users = self.config_refs.entry(reference).or_default();
            if !users.contains(&idx) {
                users.push(idx);
            }
        }
        self
    }

    /// コメント設定ペイロード (JSONC) を受け取り、参照している言語へ反映する
    ///
    /// パースに失敗した場合は問題として記録し、該当言語は既存のトークンのまま残ります。
    pub fn add_comment_config(&mut self, reference: &str, text: &str) -> &mut Self {
        match CommentConfig::parse(reference, text) {
            Ok(conf) => self.add_parsed_comment_config(reference, conf),
            Err(err) => {
                log::warn!("{err}");
                self.issues.push(err);
                self
            }
        }
    }

    pub fn add_parsed_comment_config(&mut self, reference: &str, conf: CommentConfig) -> &mut Self {
        if let Some(users) = self.config_refs.get(reference) {
            for &idx in users {
                self.rules[idx] = apply_comment_config(&self.rules[idx], &conf);
            }
        }
        self.comment_configs.insert(reference.to_string(), conf);
        self
    }

    /// 複数行文字列のトークン組を追加する
    ///
    /// `types` の各要素は言語 id/エイリアス、またはパス (拡張子・ファイル名) として解決します。
    pub fn add_block_strings<S: AsRef<str>>(&mut self, types: &[S], pairs: &[TokenPair]) -> &mut Self {
        for ty in types {
            let ty = ty.as_ref();
            let Some(idx) = self.lookup_id(ty).or_else(|| self.lookup_path(Path::new(ty))) else {
                log::debug!("block string target '{ty}' did not resolve to a language");
                continue;
            };
            self.rules[idx] = self.rules[idx].clone().with_block_strings(pairs.iter().cloned());
        }
        self
    }

    /// glob 関連付けを宣言順に追加する
    pub fn add_association(&mut self, pattern: impl Into<String>, language: impl Into<String>) -> &mut Self {
        self.associations.push((pattern.into(), language.into()));
        self
    }

    pub fn add_associations<I, P, L>(&mut self, associations: I) -> &mut Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: Into<String>,
    {
        for (pattern, language) in associations {
            self.add_association(pattern, language);
        }
        self
    }

    fn lookup_id(&self, id: &str) -> Option<usize> {
        self.index.get(id).or_else(|| self.aliases.get(id)).copied()
    }

    fn lookup_path(&self, path: &Path) -> Option<usize> {
        let name = path.file_name()?.to_str()?;
        self.filenames
            .get(name)
            .or_else(|| extension_candidates(name).find_map(|ext| self.extensions.get(ext)))
            .copied()
    }

    /// 読み取り専用のレジストリを確定する
    #[must_use]
    pub fn build(self) -> LanguageRuleRegistry {
        let Self {
            rules,
            index,
            aliases,
            extensions,
            filenames,
            associations,
            mut issues,
            ..
        } = self;

        let rules: Vec<Arc<LanguageRule>> = rules.into_iter().map(Arc::new).collect();
        let pick = |table: HashMap<String, usize>| -> HashMap<String, Arc<LanguageRule>> {
            table
                .into_iter()
                .map(|(key, idx)| (key, Arc::clone(&rules[idx])))
                .collect()
        };

        // エイリアスを先に入れ、正規 id で上書きする
        let mut ids = pick(aliases);
        ids.extend(pick(index));

        let associations = associations
            .into_iter()
            .filter_map(|(pattern, language)| match Association::compile(&pattern, language) {
                Ok(assoc) => Some(assoc),
                Err(err) => {
                    log::warn!("{err}");
                    issues.push(err);
                    None
                }
            })
            .collect();

        LanguageRuleRegistry {
            extensions: pick(extensions),
            filenames: pick(filenames),
            rules,
            ids,
            associations,
            issues,
        }
    }
}

fn apply_comment_config(rule: &LanguageRule, conf: &CommentConfig) -> LanguageRule {
    let incoming = LanguageRule::new(rule.id())
        .with_line_comments(conf.line_comments.iter().cloned())
        .with_block_comments(conf.block_comments.iter().cloned());
    rule.merge(&incoming)
}

/// ファイル名から拡張子候補を長い順に列挙する (`a.d.ts` -> `.d.ts`, `.ts`)
///
/// 先頭のドット (ドットファイル) は拡張子とみなしません。
fn extension_candidates(name: &str) -> impl Iterator<Item = &str> {
    name.char_indices()
        .filter(|&(i, c)| c == '.' && i > 0)
        .map(move |(i, _)| &name[i..])
}

#[derive(Debug, Clone)]
struct Association {
    pattern: String,
    matcher: GlobMatcher,
    base_name_only: bool,
    language: String,
}

impl Association {
    fn compile(pattern: &str, language: String) -> Result<Self, CoreError> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| CoreError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
            // スラッシュを含まないパターンはファイル名だけに照合する
            base_name_only: !pattern.contains('/'),
            language,
        })
    }

    fn is_match(&self, path: &Path) -> bool {
        if self.base_name_only {
            path.file_name().is_some_and(|name| self.matcher.is_match(name))
        } else {
            self.matcher.is_match(path)
        }
    }
}

/// 構築済みの言語ルールレジストリ (読み取り専用, `Send + Sync`)
#[derive(Debug, Clone, Default)]
pub struct LanguageRuleRegistry {
    rules: Vec<Arc<LanguageRule>>,
    ids: HashMap<String, Arc<LanguageRule>>,
    extensions: HashMap<String, Arc<LanguageRule>>,
    filenames: HashMap<String, Arc<LanguageRule>>,
    associations: Vec<Association>,
    issues: Vec<CoreError>,
}

impl LanguageRuleRegistry {
    /// 正規 id またはエイリアスで解決する
    #[must_use]
    pub fn resolve_by_id(&self, id: &str) -> Option<&Arc<LanguageRule>> {
        self.ids.get(id)
    }

    /// パスから解決する (ファイル名 > 拡張子 > glob 関連付け)
    #[must_use]
    pub fn resolve_by_path(&self, path: &Path) -> Option<&Arc<LanguageRule>> {
        let name = path.file_name().and_then(|n| n.to_str());

        if let Some(name) = name {
            if let Some(rule) = self.filenames.get(name) {
                return Some(rule);
            }
            if let Some(rule) = extension_candidates(name).find_map(|ext| self.extensions.get(ext)) {
                return Some(rule);
            }
        }

        self.resolve_by_association(path)
    }

    /// glob 関連付けのみで解決する (宣言順で最初に一致したもの)
    #[must_use]
    pub fn resolve_by_association(&self, path: &Path) -> Option<&Arc<LanguageRule>> {
        let assoc = self.associations.iter().find(|a| a.is_match(path))?;
        log::debug!("{} matched association '{}' -> {}", path.display(), assoc.pattern, assoc.language);
        self.resolve_by_id(&assoc.language)
    }

    /// 明示 id を優先し、解決できなければパスで解決する
    #[must_use]
    pub fn resolve(&self, id: Option<&str>, path: Option<&Path>) -> Option<&Arc<LanguageRule>> {
        id.and_then(|id| self.resolve_by_id(id))
            .or_else(|| path.and_then(|p| self.resolve_by_path(p)))
    }

    /// 登録順の全ルール
    pub fn languages(&self) -> impl Iterator<Item = &Arc<LanguageRule>> {
        self.rules.iter()
    }

    /// 言語ごとの登録済み拡張子 (表示用, ソート済み)
    #[must_use]
    pub fn extensions_of(&self, id: &str) -> Vec<&str> {
        let mut exts: Vec<&str> = self
            .extensions
            .iter()
            .filter(|(_, rule)| rule.id() == id)
            .map(|(ext, _)| ext.as_str())
            .collect();
        exts.sort_unstable();
        exts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 構築中に記録された設定の問題
    #[must_use]
    pub fn issues(&self) -> &[CoreError] {
        &self.issues
    }
}
