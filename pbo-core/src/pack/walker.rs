use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{PboError, Result};

/// Every file under `root`, recursively, directories excluded.
///
/// Siblings are visited in file-name order so the same tree always yields
/// the same sequence. Symlinks are listed under their own name when they
/// resolve to a file; links to directories are not descended into.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    // A missing root is left to walkdir, which reports it as a walk error.
    if let Ok(md) = fs::metadata(root) {
        if !md.is_dir() {
            return Err(PboError::NotADirectory(root.to_path_buf()));
        }
    }

    let mut files = Vec::new();
    for e in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let e = e.map_err(|e| PboError::Walk {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;
        let ft = e.file_type();
        if ft.is_dir() {
            continue;
        }
        if ft.is_symlink() {
            match fs::metadata(e.path()) {
                Ok(md) if md.is_dir() => {
                    debug!(path = %e.path().display(), "directory link not followed");
                    continue;
                }
                Ok(md) if !md.is_file() => {
                    return Err(PboError::Unsupported(e.into_path()));
                }
                // dangling links stay listed; opening them reports the error
                _ => {}
            }
        } else if !ft.is_file() {
            return Err(PboError::Unsupported(e.into_path()));
        }
        debug!(path = %e.path().display(), "enumerated");
        files.push(e.into_path());
    }
    Ok(files)
}

/// `path` expressed relative to `root`, using the platform separator.
pub fn rel_name(root: &Path, path: &Path) -> Result<String> {
    let rel = path.strip_prefix(root).map_err(|_| PboError::Outside {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    })?;
    rel.to_str()
        .map(str::to_owned)
        .ok_or_else(|| PboError::NonUtf8Path(rel.to_string_lossy().into_owned()))
}
