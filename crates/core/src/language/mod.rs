//! 言語ルールとその解決
//!
//! - `rule`: 1言語分の字句ルール (不変値)
//! - `comment_config`: JSONC のコメント設定ペイロード
//! - `registry`: id・エイリアス・拡張子・ファイル名・glob からの解決
//! - `builtin`: 組み込みの言語定義

pub mod builtin;
pub mod comment_config;
pub mod registry;
pub mod rule;

pub use builtin::{builtin_block_strings, builtin_definitions};
pub use comment_config::{CommentConfig, strip_jsonc};
pub use registry::{LanguageDefinition, LanguageRuleRegistry, RegistryBuilder, normalize_extension};
pub use rule::{LanguageRule, TokenPair};
