use ntfind::output::{self, OutputFormat};
use ntfind::{FindResult, FinderBuilder, MemoryDirectory, MemoryEntry, find_with_source};
use std::fs;
use tempfile::tempdir;
#[test]
fn integration_memory_flow() {
    let source = MemoryDirectory::new([
        MemoryEntry::file("main.rs", 12),
        MemoryEntry::directory("src"),
        MemoryEntry::file("README.md", 300),
    ]);
    let options = FinderBuilder::new(r"C:\project\").build();
    let result = find_with_source(source, &options, "*").unwrap();
    assert_eq!(result.pattern, "*");
    assert_eq!(result.entries.len(), 3);
    assert_eq!(result.entries[0].path.to_str(), Some(r"C:\project\main.rs"));
    assert!(result.entries[1].is_directory);
    assert_eq!(result.entries[2].length, 300);

    let dir = tempdir().unwrap();
    let out = dir
        .path()
        .join("result")
        .with_extension(OutputFormat::Json.extension());
    assert_eq!(out.file_name().and_then(|n| n.to_str()), Some("result.json"));
    output::write_result_to_file(&result, OutputFormat::Json, &out, true).unwrap();
    let parsed: FindResult = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(parsed.entries, result.entries);

    let text = output::format_result(&result, OutputFormat::Text, false).unwrap();
    assert!(text.contains("3 matches"));
    let markdown = output::format_result(&result, OutputFormat::Markdown, false).unwrap();
    assert!(markdown.contains("| README.md | file | 300 |"));
}
#[cfg(windows)]
#[test]
fn integration_native_flow() {
    use ntfind::{FileFinder, FileSystemEntry, FinderError, find};

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
    fs::write(dir.path().join("notes.txt"), "hello world").unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    let root = dir.path().to_str().unwrap().to_owned();
    let options = FinderBuilder::new(root.as_str()).build();

    let result = find(&options, "*.TXT").unwrap();
    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].name, "notes.txt");
    assert_eq!(result.entries[0].length, 11);
    assert!(result.entries[0].path.ends_with("notes.txt"));

    let mut finder = FileFinder::open(&options, |entry: &FileSystemEntry<'_>| {
        (!entry.file_name().is_dot_entry()).then(|| entry.file_name().to_string_lossy())
    })
    .unwrap();
    let mut names: Vec<String> = finder.matches("*").collect::<Result<_, _>>().unwrap();
    names.sort();
    assert_eq!(names, ["main.rs", "notes.txt", "src"]);
    finder.close().unwrap();

    assert!(find(&options, "*.exe").unwrap().entries.is_empty());

    let missing = FinderBuilder::new(format!(r"{root}\missing")).build();
    assert!(matches!(find(&missing, "*"), Err(FinderError::Open { .. })));
}
