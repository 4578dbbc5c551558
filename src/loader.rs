//! Source file loading
//!
//! Reads the file under review and prefixes every line with its 1-based line
//! number so the model can refer to locations.

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::{error, info};

use crate::error::{ReviewError, Result};

/// File content annotated with line numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedSource {
    /// Normalized path the content was read from
    pub path: PathBuf,
    /// `"{n}: {line}"` for every line, in file order
    pub content: String,
    pub line_count: usize,
}

/// Load `path` and number its lines.
///
/// Fails with [`ReviewError::FileNotFound`] when the normalized path is not an
/// existing regular file.
pub async fn load_numbered_file(path: &Path) -> Result<NumberedSource> {
    let normalized = normalize_path(path);

    let is_file = fs::metadata(&normalized)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false);
    if !is_file {
        error!("File {} not found", normalized.display());
        return Err(ReviewError::FileNotFound { path: normalized });
    }

    let raw = fs::read_to_string(&normalized).await?;
    let (content, line_count) = number_lines(&raw);

    info!("File {} loaded", normalized.display());
    Ok(NumberedSource {
        path: normalized,
        content,
        line_count,
    })
}

/// Prefix each line with its 1-based number. Line terminators are kept, with
/// `\r\n` and a lone `\r` both read as `\n`.
pub fn number_lines(text: &str) -> (String, usize) {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut numbered = String::with_capacity(text.len() + text.len() / 8);
    let mut count = 0;

    for line in text.split_inclusive('\n') {
        count += 1;
        numbered.push_str(&format!("{count}: {line}"));
    }

    (numbered, count)
}

/// Lexically collapse `.`, `..` and repeated separators without touching the
/// file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
