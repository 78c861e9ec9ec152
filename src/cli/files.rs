use anyhow::{Context, Result, bail};
use pbl_common::Language;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Every file under `dir`, at any depth, whose extension names a known
/// language. Paths are sorted.
pub fn resolve_files_deep(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("input directory {} does not exist", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.with_context(|| format!("failed to read directory {}", dir.display()))?;
        if entry.file_type().is_file() && Language::from_path(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// `path` relative to `root`, with `/` separators. This is the file name
/// the compiler and diagnostics use.
#[must_use]
pub fn relative_file_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Where the compiled form of `file` goes under `output_dir`.
#[must_use]
pub fn output_path(output_dir: &Path, file: &str) -> PathBuf {
    output_dir.join(file).with_extension("js")
}
