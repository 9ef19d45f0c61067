// crates/cli/src/presentation.rs
use crate::error::Result;
use crate::options::OutputFormat;
use code_counter_core::{LanguageRuleRegistry, Statistics};
use code_counter_engine::processor::{FileResult, Outcome};
use code_counter_engine::ResultTable;
use serde::Serialize;
use std::io::Write;

/// 表示オプション
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: OutputFormat,
    /// 数値を桁区切りで出す
    pub commas: bool,
    pub show_unsupported: bool,
    /// `Date :` 行に出す日時
    pub date: String,
}

impl ReportOptions {
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            commas: true,
            show_unsupported: false,
            date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    fn num(&self, n: usize) -> String {
        if self.commas { with_commas(n) } else { n.to_string() }
    }
}

/// 結果表を指定のフォーマットで書き出す
///
/// # Errors
/// Returns an error if writing or serialization fails.
pub fn write_report<W: Write>(out: &mut W, table: &ResultTable, opts: &ReportOptions) -> Result<()> {
    match opts.format {
        OutputFormat::Text => write_lines(out, &text_lines(table, opts))?,
        OutputFormat::Csv => write_lines(out, &csv_lines(table))?,
        OutputFormat::Md => write_lines(out, &markdown_lines(table, opts))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &Document::new(table, opts))?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *out, &Document::new(table, opts))?,
    }
    Ok(())
}

/// 登録済み言語の一覧 (id 順)
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_languages<W: Write>(out: &mut W, registry: &LanguageRuleRegistry) -> Result<()> {
    let mut rules: Vec<_> = registry.languages().collect();
    rules.sort_by(|a, b| a.id().cmp(b.id()));
    let width = rules.iter().map(|r| r.id().chars().count()).max().unwrap_or(0);
    for rule in rules {
        writeln!(
            out,
            "{:<width$}  {}",
            rule.id(),
            registry.extensions_of(rule.id()).join(" ")
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct Document<'a> {
    version: &'static str,
    date: &'a str,
    #[serde(flatten)]
    table: &'a ResultTable,
}

impl<'a> Document<'a> {
    fn new(table: &'a ResultTable, opts: &'a ReportOptions) -> Self {
        Self {
            version: crate::VERSION,
            date: &opts.date,
            table,
        }
    }
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// 一覧に出すファイル (集計済みと読み込みエラーは常に、未対応とバイナリは指定時のみ)
fn listed_files<'t>(table: &'t ResultTable, opts: &ReportOptions) -> impl Iterator<Item = &'t FileResult> {
    let show_unsupported = opts.show_unsupported;
    table.files().iter().filter(move |f| match f.outcome {
        Outcome::Counted(_) | Outcome::ReadError { .. } => true,
        Outcome::Unsupported | Outcome::Binary => show_unsupported,
    })
}

fn file_language(file: &FileResult) -> &str {
    match file.outcome {
        Outcome::ReadError { .. } => "(Error)",
        _ => file.language_name(),
    }
}

fn summary_line(table: &ResultTable, opts: &ReportOptions) -> String {
    let t = table.total();
    format!(
        "Total : {} files,  {} codes, {} comments, {} blanks, all {} lines",
        opts.num(t.files),
        opts.num(t.code),
        opts.num(t.comment),
        opts.num(t.blank),
        opts.num(t.total())
    )
}

enum Cell {
    Text(String),
    Num(String),
}

struct TextTable {
    widths: Vec<usize>,
    titles: Vec<&'static str>,
}

impl TextTable {
    fn new(columns: &[(&'static str, usize)]) -> Self {
        Self {
            widths: columns.iter().map(|(t, w)| (*w).max(t.chars().count())).collect(),
            titles: columns.iter().map(|(t, _)| *t).collect(),
        }
    }

    fn separator(&self) -> String {
        let dashes: Vec<String> = self.widths.iter().map(|w| "-".repeat(*w)).collect();
        format!("+-{}-+", dashes.join("-+-"))
    }

    fn header(&self) -> Vec<String> {
        let titles: Vec<String> = self
            .titles
            .iter()
            .zip(&self.widths)
            .map(|(t, w)| format!("{t:<w$}"))
            .collect();
        vec![self.separator(), format!("| {} |", titles.join(" | ")), self.separator()]
    }

    fn line(&self, cells: &[Cell]) -> String {
        let cells: Vec<String> = cells
            .iter()
            .zip(&self.widths)
            .map(|(c, w)| match c {
                Cell::Text(s) => format!("{s:<w$}"),
                Cell::Num(s) => format!("{s:>w$}"),
            })
            .collect();
        format!("| {} |", cells.join(" | "))
    }
}

const NUM_WIDTH: usize = 10;

fn stats_cells(s: &Statistics, opts: &ReportOptions) -> Vec<Cell> {
    vec![
        Cell::Text(s.name.clone()),
        Cell::Num(opts.num(s.files)),
        Cell::Num(opts.num(s.code)),
        Cell::Num(opts.num(s.comment)),
        Cell::Num(opts.num(s.blank)),
        Cell::Num(opts.num(s.total())),
    ]
}

fn file_cells(table: &ResultTable, file: &FileResult, opts: &ReportOptions) -> Vec<Cell> {
    let mut cells = vec![
        Cell::Text(table.display_path(&file.path)),
        Cell::Text(file_language(file).to_string()),
    ];
    match file.counts() {
        Some(c) => cells.extend(
            [c.code, c.comment, c.blank, c.total()]
                .into_iter()
                .map(|n| Cell::Num(opts.num(n))),
        ),
        None => cells.extend((0..4).map(|_| Cell::Num("-".to_string()))),
    }
    cells
}

fn text_lines(table: &ResultTable, opts: &ReportOptions) -> Vec<String> {
    let files: Vec<&FileResult> = listed_files(table, opts).collect();
    let name_width = files
        .iter()
        .map(|f| table.display_path(&f.path).chars().count())
        .chain(table.directories().iter().map(|d| d.name.chars().count()))
        .max()
        .unwrap_or(0);
    let lang_width = files
        .iter()
        .map(|f| file_language(f).chars().count())
        .chain(table.languages().iter().map(|l| l.name.chars().count()))
        .max()
        .unwrap_or(0);

    let counts = |first: &'static str, width: usize| {
        TextTable::new(&[
            (first, width),
            ("files", NUM_WIDTH),
            ("code", NUM_WIDTH),
            ("comment", NUM_WIDTH),
            ("blank", NUM_WIDTH),
            ("total", NUM_WIDTH),
        ])
    };
    let lang_fmt = counts("language", lang_width);
    let dir_fmt = counts("path", name_width);
    let file_fmt = TextTable::new(&[
        ("filename", name_width),
        ("language", lang_width),
        ("code", NUM_WIDTH),
        ("comment", NUM_WIDTH),
        ("blank", NUM_WIDTH),
        ("total", NUM_WIDTH),
    ]);

    let mut lines = vec![
        format!("Date : {}", opts.date),
        format!("Directory : {}", table.root().display()),
        summary_line(table, opts),
        String::new(),
        "Languages".to_string(),
    ];
    lines.extend(lang_fmt.header());
    lines.extend(table.languages_by_code().into_iter().map(|l| lang_fmt.line(&stats_cells(l, opts))));
    lines.push(lang_fmt.separator());

    lines.extend([String::new(), "Directories".to_string()]);
    lines.extend(dir_fmt.header());
    lines.extend(table.directories().iter().map(|d| dir_fmt.line(&stats_cells(d, opts))));
    lines.push(dir_fmt.separator());

    lines.extend([String::new(), "Files".to_string()]);
    lines.extend(file_fmt.header());
    lines.extend(files.iter().map(|f| file_fmt.line(&file_cells(table, f, opts))));
    let t = table.total();
    lines.push(file_fmt.line(&[
        Cell::Text("Total".to_string()),
        Cell::Text(String::new()),
        Cell::Num(opts.num(t.code)),
        Cell::Num(opts.num(t.comment)),
        Cell::Num(opts.num(t.blank)),
        Cell::Num(opts.num(t.total())),
    ]));
    lines.push(file_fmt.separator());
    lines
}

/// 言語ごとにコード行の列を持つ CSV (集計済みファイルのみ)
fn csv_lines(table: &ResultTable) -> Vec<String> {
    let languages = table.languages();
    let names: Vec<String> = languages.iter().map(|l| quote(&l.name)).collect();
    let mut lines = vec![format!(
        "\"filename\", \"language\", {}{}\"comment\", \"blank\", \"total\"",
        names.join(", "),
        if names.is_empty() { "" } else { ", " }
    )];

    for file in table.files() {
        let Some(c) = file.counts() else {
            continue;
        };
        let lang = file.language_name();
        let codes: Vec<String> = languages
            .iter()
            .map(|l| if l.name == lang { c.code } else { 0 }.to_string())
            .collect();
        lines.push(format!(
            "{}, {}, {}, {}, {}, {}",
            quote(&table.display_path(&file.path)),
            quote(lang),
            codes.join(", "),
            c.comment,
            c.blank,
            c.total()
        ));
    }

    let t = table.total();
    let codes: Vec<String> = languages.iter().map(|l| l.code.to_string()).collect();
    lines.push(format!(
        "\"Total\", \"-\", {}, {}, {}, {}",
        codes.join(", "),
        t.comment,
        t.blank,
        t.total()
    ));
    lines
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn markdown_lines(table: &ResultTable, opts: &ReportOptions) -> Vec<String> {
    const COUNT_COLUMNS: [&str; 5] = ["files", "code", "comment", "blank", "total"];

    let header = |first: &str, numbers: &[&str]| {
        let mut titles = vec![first.to_string()];
        titles.extend(numbers.iter().map(ToString::to_string));
        let mut align = vec![":---"];
        align.extend(numbers.iter().map(|_| "---:"));
        vec![format!("| {} |", titles.join(" | ")), format!("| {} |", align.join(" | "))]
    };
    let stats_row = |s: &Statistics| {
        format!(
            "| {} | {} | {} | {} | {} | {} |",
            md_escape(&s.name),
            opts.num(s.files),
            opts.num(s.code),
            opts.num(s.comment),
            opts.num(s.blank),
            opts.num(s.total())
        )
    };

    let mut lines = vec![
        format!("Date : {}", opts.date),
        String::new(),
        format!("Directory {}", table.root().display()),
        String::new(),
        summary_line(table, opts),
        String::new(),
        "## Languages".to_string(),
    ];
    lines.extend(header("language", &COUNT_COLUMNS));
    lines.extend(table.languages_by_code().into_iter().map(stats_row));
    lines.extend([String::new(), "## Directories".to_string()]);
    lines.extend(header("path", &COUNT_COLUMNS));
    lines.extend(table.directories().iter().map(stats_row));

    lines.extend([String::new(), "## Files".to_string()]);
    lines.extend([
        "| filename | language | code | comment | blank | total |".to_string(),
        "| :--- | :--- | ---: | ---: | ---: | ---: |".to_string(),
    ]);
    for file in listed_files(table, opts) {
        let rel = table.display_path(&file.path);
        let numbers: Vec<String> = match file.counts() {
            Some(c) => [c.code, c.comment, c.blank, c.total()].iter().map(|n| opts.num(*n)).collect(),
            None => vec!["-".to_string(); 4],
        };
        lines.push(format!(
            "| [{}]({}) | {} | {} |",
            md_escape(&rel),
            rel.replace(' ', "%20"),
            md_escape(file_language(file)),
            numbers.join(" | ")
        ));
    }
    lines
}

fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
}

/// `1234567` -> `1,234,567`
#[must_use]
pub fn with_commas(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use code_counter_core::LineCounts;
    use std::path::PathBuf;

    fn table() -> ResultTable {
        let files = vec![
            FileResult::counted("/w/src/lib.rs", "rust", LineCounts::new(1200, 30, 40)),
            FileResult::counted("/w/run.py", "python", LineCounts::new(10, 2, 3)),
            FileResult {
                path: PathBuf::from("/w/logo.png"),
                language: None,
                outcome: Outcome::Unsupported,
            },
        ];
        ResultTable::new("/w", &files)
    }

    fn opts(format: OutputFormat) -> ReportOptions {
        ReportOptions {
            format,
            commas: true,
            show_unsupported: false,
            date: "2024-01-02 03:04:05".to_string(),
        }
    }

    fn render(table: &ResultTable, opts: &ReportOptions) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, table, opts).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_with_commas() {
        assert_eq!(with_commas(0), "0");
        assert_eq!(with_commas(999), "999");
        assert_eq!(with_commas(1000), "1,000");
        assert_eq!(with_commas(1_234_567), "1,234,567");
    }

    #[test]
    fn test_text_report() {
        let out = render(&table(), &opts(OutputFormat::Text));
        assert!(out.starts_with("Date : 2024-01-02 03:04:05\n"));
        assert!(out.contains("Total : 2 files,  1,210 codes, 32 comments, 43 blanks, all 1,285 lines"));
        assert!(out.contains("| src/lib.rs | rust     |      1,200 |"));
        assert!(!out.contains("logo.png"));

        let rust = out.find("| rust ").unwrap();
        let python = out.find("| python ").unwrap();
        assert!(rust < python);
    }

    #[test]
    fn test_text_report_show_unsupported_without_commas() {
        let mut o = opts(OutputFormat::Text);
        o.show_unsupported = true;
        o.commas = false;
        let out = render(&table(), &o);
        assert!(out.contains("logo.png"));
        assert!(out.contains("(Unsupported)"));
        assert!(out.contains("1210"));
    }

    #[test]
    fn test_csv_report() {
        let out = render(&table(), &opts(OutputFormat::Csv));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "\"filename\", \"language\", \"python\", \"rust\", \"comment\", \"blank\", \"total\"");
        assert_eq!(lines[1], "\"run.py\", \"python\", 10, 0, 2, 3, 15");
        assert_eq!(lines[2], "\"src/lib.rs\", \"rust\", 0, 1200, 30, 40, 1270");
        assert_eq!(lines[3], "\"Total\", \"-\", 10, 1200, 32, 43, 1285");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_markdown_report() {
        let out = render(&table(), &opts(OutputFormat::Md));
        assert!(out.contains("## Languages\n| language | files | code | comment | blank | total |\n| :--- | ---: |"));
        assert!(out.contains("| . | 2 | 1,210 | 32 | 43 | 1,285 |"));
        assert!(out.contains("| [src/lib.rs](src/lib.rs) | rust | 1,200 | 30 | 40 | 1,270 |"));
    }

    #[test]
    fn test_json_report() {
        let out = render(&table(), &opts(OutputFormat::Json));
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["total"]["code"], 1210);
        assert_eq!(v["date"], "2024-01-02 03:04:05");
        assert_eq!(v["files"].as_array().unwrap().len(), 3);
        assert_eq!(v["files"][0]["status"], "unsupported");
        assert_eq!(v["files"][1]["status"], "counted");
        assert_eq!(v["files"][1]["comment"], 2);
    }

    #[test]
    fn test_yaml_report() {
        let out = render(&table(), &opts(OutputFormat::Yaml));
        assert!(out.contains("total:"));
        assert!(out.contains("status: counted"));
    }

    #[test]
    fn test_list_languages() {
        let registry = code_counter_core::RegistryBuilder::with_builtin().build();
        let mut buf = Vec::new();
        write_languages(&mut buf, &registry).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.lines().any(|l| l.starts_with("rust") && l.ends_with(".rs")));
        assert_eq!(out.lines().count(), registry.len());
    }
}
