use std::fs;
use std::path::{Path, PathBuf};

use code_counter_core::{LineCounts, RegistryBuilder};
use code_counter_engine::config::{Config, WalkOptions};
use code_counter_engine::{Outcome, count_text, load_registry, run};
use tempfile::{TempDir, tempdir};

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src/util")).unwrap();
    fs::write(root.join("src/main.rs"), "// entry\nfn main() {\n    /* a\n\n    */\n}\n").unwrap();
    fs::write(root.join("src/util/mod.rs"), "pub fn f() {}\n\n").unwrap();
    fs::write(root.join("script.py"), "#!/usr/bin/env python\n\"\"\"\ndoc\n\"\"\"\nprint(1)\n").unwrap();
    fs::write(root.join("data.bin.rs"), b"\0\x01\x02").unwrap();
    fs::write(root.join("README.unknown"), "hello\n").unwrap();
    dir
}

fn config(root: &Path) -> Config {
    Config {
        walk: WalkOptions {
            roots: vec![root.to_path_buf()],
            threads: 2,
            ..WalkOptions::default()
        },
        root: root.to_path_buf(),
        language: None,
    }
}

#[test]
fn test_run_classifies_every_file() {
    let dir = fixture();
    let registry = RegistryBuilder::with_builtin().build();
    let result = run(&config(dir.path()), &registry).unwrap();

    let by_name = |name: &str| {
        result
            .files
            .iter()
            .find(|f| f.path == dir.path().join(name))
            .unwrap_or_else(|| panic!("missing {name}"))
    };

    assert_eq!(result.files.len(), 5);
    assert_eq!(by_name("src/main.rs").counts(), Some(&LineCounts::new(2, 4, 0)));
    assert_eq!(by_name("src/util/mod.rs").counts(), Some(&LineCounts::new(1, 0, 1)));
    assert_eq!(by_name("script.py").counts(), Some(&LineCounts::new(4, 1, 0)));
    assert_eq!(by_name("data.bin.rs").outcome, Outcome::Binary);
    assert_eq!(by_name("README.unknown").outcome, Outcome::Unsupported);

    let paths: Vec<&PathBuf> = result.files.iter().map(|f| &f.path).collect();
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted);
}

#[test]
fn test_table_aggregates_counted_files_only() {
    let dir = fixture();
    let registry = RegistryBuilder::with_builtin().build();
    let table = run(&config(dir.path()), &registry).unwrap().table(dir.path());

    let total = table.total();
    assert_eq!((total.files, total.code, total.comment, total.blank), (3, 7, 5, 1));

    let dirs: Vec<(&str, usize)> = table.directories().iter().map(|d| (d.name.as_str(), d.files)).collect();
    assert_eq!(dirs, [(".", 3), ("src", 2), ("src/util", 1)]);

    let rust = table.languages().iter().find(|l| l.name == "rust").unwrap();
    assert_eq!((rust.files, rust.code), (2, 3));
}

#[test]
fn test_forced_language() {
    let dir = fixture();
    let registry = RegistryBuilder::with_builtin().build();
    let mut cfg = config(dir.path());
    cfg.language = Some("python".to_string());
    let result = run(&cfg, &registry).unwrap();

    let readme = result.files.iter().find(|f| f.path.ends_with("README.unknown")).unwrap();
    assert_eq!(readme.language.as_deref(), Some("python"));
    assert_eq!(readme.counts(), Some(&LineCounts::new(1, 0, 0)));
}

#[test]
fn test_missing_root_fails() {
    let registry = RegistryBuilder::with_builtin().build();
    let cfg = config(Path::new("/no/such/dir/for/code_counter"));
    assert!(run(&cfg, &registry).is_err());
}

#[test]
fn test_associations_from_definitions() {
    let dir = fixture();
    let defs = dir.path().join("defs.json");
    fs::write(&defs, r#"{ "associations": { "*.unknown": "markdown" } }"#).unwrap();
    let registry = load_registry(Some(&defs), &[]).unwrap();

    let mut cfg = config(dir.path());
    cfg.walk.override_exclude = vec!["*.json".to_string()];
    let result = run(&cfg, &registry).unwrap();
    let readme = result.files.iter().find(|f| f.path.ends_with("README.unknown")).unwrap();
    assert_eq!(readme.language.as_deref(), Some("markdown"));
}

#[test]
fn test_count_text() {
    let registry = RegistryBuilder::with_builtin().build();
    let counts = count_text(&registry, None, Some(Path::new("a.c")), "int x; // c\n// d\n").unwrap();
    assert_eq!(counts, LineCounts::new(1, 1, 0));

    let counts = count_text(&registry, Some("python"), Some(Path::new("a.c")), "// d\n").unwrap();
    assert_eq!(counts, LineCounts::new(1, 0, 0));

    assert!(count_text(&registry, None, Some(Path::new("a.nothing")), "x").is_none());
    assert!(count_text(&registry, Some("nothing"), None, "x").is_none());
}
