use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 罫線付きのテキスト表
    #[default]
    Text,
    Csv,
    Md,
    Json,
    Yaml,
}
