//! 言語定義ファイルの読み込み
//!
//! ```json
//! {
//!   "languages": [
//!     { "id": "sql", "extensions": [".sql"], "configuration": "./sql.language-configuration.json" }
//!   ],
//!   "associations": { "*.inc": "c" },
//!   "blockComment": [
//!     { "types": ["python"], "patterns": [["\"\"\"", "\"\"\""]] },
//!     { "types": ["go"], "patterns": [["`", "`"]], "raw": true }
//!   ]
//! }
//! ```
//!
//! `configuration` はこのファイルからの相対パスで、JSONC のコメント設定を指します。

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use code_counter_core::language::strip_jsonc;
use code_counter_core::{LanguageDefinition, LanguageRuleRegistry, RegistryBuilder, TokenPair};
use hashbrown::HashSet;
use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

use crate::error::{EngineError, Result};

/// 複数行文字列の指定 (`types` は言語 id・エイリアス・パスのいずれか)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlockStringConfig {
    pub types: Vec<String>,
    pub patterns: Vec<(String, String)>,
    /// バックスラッシュをエスケープとして扱わない
    pub raw: bool,
}

impl BlockStringConfig {
    fn pairs(&self) -> Vec<TokenPair> {
        self.patterns
            .iter()
            .map(|(b, e)| TokenPair {
                raw: self.raw,
                ..TokenPair::new(b.as_str(), e.as_str())
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Definitions {
    pub languages: Vec<LanguageDefinition>,
    /// glob -> 言語 id (記述順を保持)
    #[serde(deserialize_with = "ordered_pairs")]
    pub associations: Vec<(String, String)>,
    pub block_comment: Vec<BlockStringConfig>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Definitions {
    /// 定義ファイルを読み込む (コメントと末尾カンマを許容)
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| EngineError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut defs: Self = serde_json::from_str(&strip_jsonc(&text)).map_err(|source| EngineError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        defs.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        log::debug!(
            "loaded {} language definitions from {}",
            defs.languages.len(),
            path.display()
        );
        Ok(defs)
    }

    /// 構築器へ登録する
    ///
    /// 参照されたコメント設定ファイルはそれぞれ1回だけ読みます。読めないファイルは
    /// 警告だけ出し、その言語は定義済みのトークンのまま残ります。
    pub fn apply_to(self, builder: &mut RegistryBuilder) {
        let mut loaded = HashSet::new();
        for mut def in self.languages {
            if let Some(reference) = def.configuration.take() {
                let path = self.base_dir.join(&reference);
                let key = path.to_string_lossy().into_owned();
                if loaded.insert(key.clone()) {
                    match fs::read_to_string(&path) {
                        Ok(text) => {
                            builder.add_comment_config(&key, &text);
                        }
                        Err(err) => log::warn!("cannot read comment configuration {}: {err}", path.display()),
                    }
                }
                def.configuration = Some(key);
            }
            builder.register(def);
        }
        for conf in &self.block_comment {
            builder.add_block_strings(conf.types.as_slice(), &conf.pairs());
        }
        builder.add_associations(self.associations);
    }
}

/// 組み込み定義・定義ファイル・追加の関連付けからレジストリを作る
///
/// 関連付けは定義ファイルのものを先に、`extra_associations` を後に評価します。
///
/// # Errors
/// Returns an error if the definitions file cannot be loaded.
pub fn load_registry(definitions: Option<&Path>, extra_associations: &[(String, String)]) -> Result<LanguageRuleRegistry> {
    let mut builder = RegistryBuilder::with_builtin();
    if let Some(path) = definitions {
        Definitions::load(path)?.apply_to(&mut builder);
    }
    builder.add_associations(extra_associations.iter().cloned());

    let registry = builder.build();
    for issue in registry.issues() {
        log::warn!("configuration issue: {issue}");
    }
    Ok(registry)
}

fn ordered_pairs<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of glob patterns to language ids")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(pair) = map.next_entry::<String, String>()? {
                pairs.push(pair);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}
