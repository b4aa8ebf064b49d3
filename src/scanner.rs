use crate::error::SweepError;
use crate::types::ScanResult;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use walkdir::WalkDir;

/// Make sure `root` exists and is a directory before anything is listed.
pub fn check_root(root: &Path) -> Result<(), SweepError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(SweepError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(SweepError::PathNotFound(root.to_path_buf()))
        }
        Err(e) => Err(SweepError::Io(e)),
    }
}

/// List files and folders under `root`.
///
/// With `include_subfolders` the whole tree is walked (symlinks are not
/// followed), otherwise only the immediate children are classified. Both
/// lists keep traversal order. Unreadable entries are logged and skipped.
pub fn scan(root: &Path, include_subfolders: bool) -> Result<ScanResult, SweepError> {
    check_root(root)?;

    let result = if include_subfolders {
        walk_tree(root)
    } else {
        list_children(root)?
    };

    log::info!(
        "Scanned {}: {} files, {} folders",
        root.display(),
        result.files.len(),
        result.folders.len()
    );
    Ok(result)
}

fn walk_tree(root: &Path) -> ScanResult {
    let mut result = ScanResult::default();

    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        let is_dir = if entry.path_is_symlink() {
            // Not descended into, but a link to a directory is still a folder.
            fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
        } else {
            entry.file_type().is_dir()
        };

        if is_dir {
            result.folders.push(entry.into_path());
        } else {
            result.files.push(entry.into_path());
        }
    }

    result
}

fn list_children(root: &Path) -> Result<ScanResult, SweepError> {
    let mut result = ScanResult::default();

    for entry in fs::read_dir(root)? {
        let path = match entry {
            Ok(e) => e.path(),
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {e}", root.display());
                continue;
            }
        };

        // Follows symlinks, so a link to a file counts as a file.
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => result.files.push(path),
            Ok(meta) if meta.is_dir() => result.folders.push(path),
            Ok(_) => log::debug!("Ignoring special file {}", path.display()),
            Err(e) => log::warn!("Skipping {}: {e}", path.display()),
        }
    }

    Ok(result)
}
