//! File loading tests

mod common;

use common::test_helpers::Workspace;
use gpt_reviewer::{ReviewError, load_numbered_file};

#[tokio::test]
async fn test_two_line_file() {
    let workspace = Workspace::new();
    let path = workspace.write_source("pair.txt", "a\nb\n");

    let source = load_numbered_file(&path).await.unwrap();
    assert_eq!(source.content, "1: a\n2: b\n");
    assert_eq!(source.line_count, 2);
}

#[tokio::test]
async fn test_every_line_is_prefixed_in_order() {
    let workspace = Workspace::new();
    let lines: Vec<String> = (0..120)
        .map(|i| format!("    let value_{i} = {i} * 2; // note: {i}"))
        .collect();
    let path = workspace.write_source("long.rs", &format!("{}\n", lines.join("\n")));

    let source = load_numbered_file(&path).await.unwrap();
    let numbered: Vec<&str> = source.content.lines().collect();

    assert_eq!(source.line_count, lines.len());
    assert_eq!(numbered.len(), lines.len());
    for (i, line) in numbered.iter().enumerate() {
        assert_eq!(*line, format!("{}: {}", i + 1, lines[i]));
    }
}

#[tokio::test]
async fn test_missing_final_newline() {
    let workspace = Workspace::new();
    let path = workspace.write_source("tail.py", "import os\nprint(os.name)");

    let source = load_numbered_file(&path).await.unwrap();
    assert_eq!(source.content, "1: import os\n2: print(os.name)");
}

#[tokio::test]
async fn test_empty_file() {
    let workspace = Workspace::new();
    let path = workspace.write_source("empty.txt", "");

    let source = load_numbered_file(&path).await.unwrap();
    assert_eq!(source.content, "");
    assert_eq!(source.line_count, 0);
}

#[tokio::test]
async fn test_nonexistent_path() {
    let workspace = Workspace::new();
    let missing = workspace.path().join("nope").join("..").join("missing.rs");

    match load_numbered_file(&missing).await {
        Err(ReviewError::FileNotFound { path }) => {
            assert_eq!(path, workspace.path().join("missing.rs"));
        }
        other => panic!("Expected FileNotFound, got {:?}", other),
    }
}
