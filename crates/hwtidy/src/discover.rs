//! Input discovery: explicit files plus directory expansion.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;
use walkdir::WalkDir;

/// How deep directory arguments are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Only `.json` files directly inside the directory.
    TopLevel,
    /// The whole tree below the directory.
    Recursive,
}

/// Collect `.json` files from explicit paths and directories. The
/// result is sorted so multi-file runs are deterministic regardless of
/// filesystem enumeration order.
pub fn collect_json_files(paths: &[PathBuf], expansion: Expansion) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            if is_json(path) {
                files.push(path.clone());
            }
        } else if path.is_dir() {
            let walker = match expansion {
                Expansion::TopLevel => WalkDir::new(path).min_depth(1).max_depth(1),
                Expansion::Recursive => WalkDir::new(path).min_depth(1),
            };
            for entry in walker {
                let entry = entry?;
                if entry.file_type().is_file() && is_json(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            warn!(path = %path.display(), "input path does not exist, ignoring");
        }
    }
    files.sort();
    Ok(files)
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == "json")
}
