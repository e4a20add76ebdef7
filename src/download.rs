use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Resolve a name collision by appending `_copy`, `_copy2`, etc.
///
/// Returns a path that does not exist yet in the destination directory.
pub fn resolve_collision(dest: &Path) -> PathBuf {
    if !dest.exists() {
        return dest.to_path_buf();
    }

    let parent = dest.parent().unwrap_or(Path::new("."));
    let stem = dest
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = dest.extension().map(|e| e.to_string_lossy().to_string());

    for i in 1..=1000 {
        let suffix = if i == 1 {
            "_copy".to_string()
        } else {
            format!("_copy{}", i)
        };
        let new_name = match &ext {
            Some(e) => format!("{}{}.{}", stem, suffix, e),
            None => format!("{}{}", stem, suffix),
        };
        let candidate = parent.join(&new_name);
        if !candidate.exists() {
            return candidate;
        }
    }

    dest.to_path_buf()
}

/// Write fetched `content` for the remote file `name` into `dest_dir`.
///
/// Only the leaf of a qualified name is used. Existing files are never
/// overwritten. Returns the path written.
pub fn save_download(dest_dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let leaf = name.rsplit('/').next().unwrap_or(name);
    if leaf.is_empty() || leaf == "." || leaf == ".." {
        return Err(AppError::InvalidPath(format!("cannot save {:?}", name)));
    }

    let dest = resolve_collision(&dest_dir.join(leaf));
    fs::write(&dest, content)?;
    tracing::info!(path = %dest.display(), bytes = content.len(), "saved download");
    Ok(dest)
}
