//! 組み込みの言語定義
//!
//! 外部の定義フィードなしでも動くように、主要言語の id・拡張子・コメント構文を持ちます。
//! 定義ファイルから同じ id を登録すると、ここでの定義にマージされます。

use super::registry::{LanguageDefinition as Def, RegistryBuilder};
use super::rule::TokenPair;

/// 組み込み定義の一覧
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn builtin_definitions() -> Vec<Def> {
    vec![
        // C系言語 (// と /* */)
        Def::new("c").aliases(&["C"]).extensions(&[".c", ".h"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("cpp")
            .aliases(&["C++", "Cpp"])
            .extensions(&[".cpp", ".cc", ".cxx", ".c++", ".hpp", ".hh", ".hxx", ".h++", ".ino"])
            .line_comments(&["//"])
            .block_comment("/*", "*/"),
        Def::new("csharp").aliases(&["C#", "csharp"]).extensions(&[".cs", ".csx"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("java").aliases(&["Java"]).extensions(&[".java", ".jav"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("javascript")
            .aliases(&["JavaScript", "js"])
            .extensions(&[".js", ".es6", ".mjs", ".cjs", ".pac"])
            .filenames(&["jakefile"])
            .line_comments(&["//"])
            .block_comment("/*", "*/"),
        Def::new("javascriptreact").aliases(&["JavaScript React", "jsx"]).extensions(&[".jsx"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("typescript").aliases(&["TypeScript", "ts"]).extensions(&[".ts", ".mts", ".cts"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("typescriptreact").aliases(&["TypeScript React", "tsx"]).extensions(&[".tsx"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("go").aliases(&["Go"]).extensions(&[".go"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("rust").aliases(&["Rust", "rs"]).extensions(&[".rs"]).line_comments(&["//"]).block_comment("/*", "*/").nested(true).plain_apostrophe(true),
        Def::new("swift").aliases(&["Swift"]).extensions(&[".swift"]).line_comments(&["//"]).block_comment("/*", "*/").nested(true),
        Def::new("kotlin").aliases(&["Kotlin"]).extensions(&[".kt", ".kts"]).line_comments(&["//"]).block_comment("/*", "*/").nested(true),
        Def::new("scala").aliases(&["Scala"]).extensions(&[".scala", ".sc"]).line_comments(&["//"]).block_comment("/*", "*/").nested(true),
        Def::new("dart").aliases(&["Dart"]).extensions(&[".dart"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("zig").aliases(&["Zig"]).extensions(&[".zig"]).line_comments(&["//"]),
        Def::new("d").aliases(&["D"]).extensions(&[".d", ".di"]).line_comments(&["//"]).block_comment("/*", "*/").block_comment("/+", "+/"),
        Def::new("objective-c").aliases(&["Objective-C"]).extensions(&[".m"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("objective-cpp").aliases(&["Objective-C++"]).extensions(&[".mm"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("groovy").aliases(&["Groovy"]).extensions(&[".groovy", ".gvy", ".gradle"]).filenames(&["Jenkinsfile"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("php").aliases(&["PHP", "php"]).extensions(&[".php", ".php4", ".php5", ".phtml", ".ctp"]).line_comments(&["//", "#"]).block_comment("/*", "*/"),
        Def::new("css").aliases(&["CSS"]).extensions(&[".css"]).block_comment("/*", "*/"),
        Def::new("scss").aliases(&["SCSS"]).extensions(&[".scss"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("less").aliases(&["Less"]).extensions(&[".less"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("jsonc").aliases(&["JSON with Comments"]).extensions(&[".jsonc"]).filenames(&["tsconfig.json", "jsconfig.json"]).line_comments(&["//"]).block_comment("/*", "*/"),
        Def::new("json").aliases(&["JSON"]).extensions(&[".json", ".webmanifest"]),
        Def::new("proto3").aliases(&["Protocol Buffers"]).extensions(&[".proto"]).line_comments(&["//"]).block_comment("/*", "*/"),
        // Hash系 (#)
        Def::new("python").aliases(&["Python", "py"]).extensions(&[".py", ".pyw", ".pyi", ".rpy"]).line_comments(&["#"]),
        Def::new("ruby")
            .aliases(&["Ruby", "rb"])
            .extensions(&[".rb", ".rake", ".gemspec", ".ru"])
            .filenames(&["Rakefile", "Gemfile"])
            .line_comments(&["#"])
            .block_comment("=begin", "=end"),
        Def::new("perl").aliases(&["Perl", "pl"]).extensions(&[".pl", ".pm", ".t"]).line_comments(&["#"]),
        Def::new("shellscript")
            .aliases(&["Shell Script", "shellscript", "bash", "sh", "zsh"])
            .extensions(&[".sh", ".bash", ".zsh"])
            .filenames(&[".bashrc", ".bash_profile", ".profile", ".zshrc"])
            .line_comments(&["#"]),
        Def::new("powershell").aliases(&["PowerShell", "ps1"]).extensions(&[".ps1", ".psm1", ".psd1"]).line_comments(&["#"]).block_comment("<#", "#>"),
        Def::new("yaml").aliases(&["YAML", "yaml"]).extensions(&[".yml", ".yaml", ".eyaml"]).line_comments(&["#"]),
        Def::new("toml").aliases(&["TOML"]).extensions(&[".toml"]).filenames(&["Cargo.lock"]).line_comments(&["#"]),
        Def::new("ini").aliases(&["Ini", "ini"]).extensions(&[".ini", ".cfg", ".conf", ".properties"]).line_comments(&[";", "#"]),
        Def::new("dockerfile").aliases(&["Docker", "Dockerfile"]).extensions(&[".dockerfile"]).filenames(&["Dockerfile", "Containerfile"]).line_comments(&["#"]),
        Def::new("makefile").aliases(&["Makefile", "make"]).extensions(&[".mk", ".mak"]).filenames(&["Makefile", "makefile", "GNUmakefile"]).line_comments(&["#"]),
        Def::new("cmake").aliases(&["CMake"]).extensions(&[".cmake"]).filenames(&["CMakeLists.txt"]).line_comments(&["#"]).block_comment("#[[", "]]"),
        Def::new("r").aliases(&["R", "r"]).extensions(&[".r", ".rhistory", ".rprofile"]).line_comments(&["#"]),
        Def::new("elixir").aliases(&["Elixir", "elixir"]).extensions(&[".ex", ".exs"]).line_comments(&["#"]),
        Def::new("julia").aliases(&["Julia", "julia"]).extensions(&[".jl"]).line_comments(&["#"]).block_comment("#=", "=#").nested(true),
        Def::new("nim").aliases(&["Nim"]).extensions(&[".nim", ".nims"]).line_comments(&["#"]).block_comment("#[", "]#").nested(true),
        Def::new("terraform").aliases(&["Terraform", "hcl"]).extensions(&[".tf", ".tfvars", ".hcl"]).line_comments(&["#", "//"]).block_comment("/*", "*/"),
        // -- 系
        Def::new("lua").aliases(&["Lua"]).extensions(&[".lua"]).line_comments(&["--"]).block_comment("--[[", "]]"),
        Def::new("sql").aliases(&["SQL"]).extensions(&[".sql", ".dsql"]).line_comments(&["--"]).block_comment("/*", "*/"),
        Def::new("haskell").aliases(&["Haskell", "hs"]).extensions(&[".hs", ".lhs"]).line_comments(&["--"]).block_comment("{-", "-}").nested(true).plain_apostrophe(true),
        Def::new("elm").aliases(&["Elm"]).extensions(&[".elm"]).line_comments(&["--"]).block_comment("{-", "-}").nested(true).plain_apostrophe(true),
        Def::new("vhdl").aliases(&["VHDL"]).extensions(&[".vhd", ".vhdl"]).line_comments(&["--"]),
        // マークアップ (<!-- -->)
        Def::new("html").aliases(&["HTML", "htm", "html"]).extensions(&[".html", ".htm", ".shtml", ".xhtml"]).block_comment("<!--", "-->"),
        Def::new("xml").aliases(&["XML"]).extensions(&[".xml", ".xsd", ".xsl", ".xslt", ".svg", ".csproj", ".plist"]).block_comment("<!--", "-->"),
        Def::new("markdown").aliases(&["Markdown"]).extensions(&[".md", ".markdown", ".mdown"]).block_comment("<!--", "-->"),
        Def::new("vue").aliases(&["Vue"]).extensions(&[".vue"]).line_comments(&["//"]).block_comment("<!--", "-->").block_comment("/*", "*/"),
        // その他
        Def::new("clojure").aliases(&["Clojure", "clojure"]).extensions(&[".clj", ".cljs", ".cljc", ".edn"]).line_comments(&[";"]).plain_apostrophe(true),
        Def::new("lisp").aliases(&["Lisp", "Scheme"]).extensions(&[".lisp", ".lsp", ".el", ".scm", ".ss", ".rkt"]).line_comments(&[";"]).block_comment("#|", "|#").nested(true).plain_apostrophe(true),
        Def::new("erlang").aliases(&["Erlang"]).extensions(&[".erl", ".hrl"]).line_comments(&["%"]),
        Def::new("matlab").aliases(&["MATLAB"]).extensions(&[".mat", ".mlx"]).line_comments(&["%"]).block_comment("%{", "%}"),
        Def::new("latex").aliases(&["LaTeX", "latex"]).extensions(&[".tex", ".sty", ".cls"]).line_comments(&["%"]),
        Def::new("fortran").aliases(&["Fortran"]).extensions(&[".f90", ".f95", ".f03", ".f08"]).line_comments(&["!"]),
        Def::new("ocaml").aliases(&["OCaml"]).extensions(&[".ml", ".mli"]).block_comment("(*", "*)").nested(true).plain_apostrophe(true),
        Def::new("fsharp").aliases(&["F#", "FSharp"]).extensions(&[".fs", ".fsi", ".fsx", ".fsscript"]).line_comments(&["//"]).block_comment("(*", "*)").nested(true),
        Def::new("pascal").aliases(&["Pascal"]).extensions(&[".pas", ".dpr", ".dpk"]).line_comments(&["//"]).block_comment("{", "}").block_comment("(*", "*)"),
        Def::new("asm").aliases(&["Assembly", "nasm"]).extensions(&[".asm", ".nasm"]).line_comments(&[";"]),
        Def::new("bat").aliases(&["Batch", "bat"]).extensions(&[".bat", ".cmd"]).line_comments(&["REM", "rem", "Rem", "::"]),
        Def::new("vb").aliases(&["Visual Basic", "vb"]).extensions(&[".vb", ".vbs", ".bas", ".brs"]).line_comments(&["'", "REM", "rem"]),
        Def::new("plaintext").aliases(&["Plain Text", "text"]).extensions(&[".txt"]),
    ]
}

/// 複数行文字列の組み込み設定 (`blockComment` 設定と同じ扱い)
#[must_use]
pub fn builtin_block_strings() -> Vec<(&'static [&'static str], Vec<TokenPair>)> {
    let triple = || vec![TokenPair::new("\"\"\"", "\"\"\""), TokenPair::new("'''", "'''")];
    vec![
        (&["python", "dart"][..], triple()),
        (&["elixir", "kotlin", "scala", "java", "swift"][..], vec![TokenPair::new("\"\"\"", "\"\"\"")]),
        (
            &["javascript", "javascriptreact", "typescript", "typescriptreact", "vue"][..],
            vec![TokenPair::new("`", "`")],
        ),
        // 生文字列 (バックスラッシュはエスケープではない)
        (&["go"][..], vec![TokenPair::raw("`", "`")]),
        (&["csharp"][..], vec![TokenPair::raw("@\"", "\"")]),
        (&["lua"][..], vec![TokenPair::raw("[[", "]]")]),
    ]
}

impl RegistryBuilder {
    /// 組み込み定義を登録済みの構築器を作る
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut builder = Self::new();
        for def in builtin_definitions() {
            builder.register(def);
        }
        for (types, pairs) in builtin_block_strings() {
            builder.add_block_strings(types, &pairs);
        }
        builder
    }
}
