use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::options::OutputFormat;
use crate::parsers::AssocArg;

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "code_counter",
    version = crate::VERSION,
    about = "ソースコードの行数 (コード/コメント/空行) 集計ツール"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// 対象のファイル/ディレクトリ (省略時はカレントディレクトリ)
    #[arg(value_hint = ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// 出力フォーマット
    #[arg(long, value_enum, default_value = "text", help_heading = "出力")]
    pub format: OutputFormat,

    /// 数値を桁区切りなしで出力する
    #[arg(long, help_heading = "出力")]
    pub no_commas: bool,

    /// 未対応/バイナリのファイルも一覧に含める
    #[arg(long, help_heading = "出力")]
    pub show_unsupported: bool,

    /// 言語定義ファイル (JSON)
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "言語")]
    pub definitions: Option<PathBuf>,

    /// glob による言語の関連付け (例: --assoc '*.inc=c'、複数指定可)
    #[arg(long, help_heading = "言語")]
    pub assoc: Vec<AssocArg>,

    /// すべてのファイルをこの言語 id として数える
    #[arg(long, help_heading = "言語")]
    pub language: Option<String>,

    /// 登録済みの言語一覧を表示して終了
    #[arg(long, help_heading = "言語")]
    pub list_languages: bool,

    /// 含めるパターン (gitignore 互換、カンマ区切り/複数指定可)
    #[arg(long, value_delimiter = ',', help_heading = "走査/入力")]
    pub include: Vec<String>,

    /// 除外するパターン (gitignore 互換、カンマ区切り/複数指定可)
    #[arg(long, value_delimiter = ',', help_heading = "走査/入力")]
    pub exclude: Vec<String>,

    /// 隠しファイルも対象にする
    #[arg(long, help_heading = "走査/入力")]
    pub hidden: bool,

    /// .gitignore を無視する
    #[arg(long, help_heading = "走査/入力")]
    pub no_gitignore: bool,

    /// 最大探索深さ
    #[arg(long, help_heading = "走査/入力")]
    pub max_depth: Option<usize>,

    /// シンボリックリンクを辿る
    #[arg(long, help_heading = "走査/入力")]
    pub follow: bool,

    /// 並列数 (省略時は CPU 数)
    #[arg(short, long, help_heading = "走査/入力")]
    pub jobs: Option<usize>,

    /// ログを詳細にする (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
