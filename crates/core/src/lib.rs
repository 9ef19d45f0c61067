#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

//! 言語ルールレジストリと行分類器
//!
//! ```rust
//! use std::path::Path;
//! use code_counter_core::language::RegistryBuilder;
//!
//! let registry = RegistryBuilder::with_builtin().build();
//! let rule = registry.resolve_by_path(Path::new("main.rs")).unwrap();
//! let counts = code_counter_core::classify(rule, "// hi\nfn main() {}\n\n");
//! assert_eq!((counts.code, counts.comment, counts.blank), (1, 1, 1));
//! ```

pub mod classifier;
pub mod error;
pub mod language;
pub mod stats;

pub use classifier::{LineClassifier, LineKind, LineScanner, classify, count_lines};
pub use error::{CoreError, Result};
pub use language::{LanguageDefinition, LanguageRule, LanguageRuleRegistry, RegistryBuilder, TokenPair};
pub use stats::{LineCounts, Statistics};
