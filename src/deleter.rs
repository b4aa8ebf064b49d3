use crate::error::SweepError;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct DeletionReport {
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, SweepError)>,
}

impl DeletionReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Remove every path, continuing past failures.
///
/// Directories are removed only when empty; nothing is removed recursively.
/// Symlinks are removed themselves, never their targets.
#[must_use]
pub fn delete(paths: &[PathBuf]) -> DeletionReport {
    let mut report = DeletionReport::default();

    for path in paths {
        delete_into(&mut report, path);
    }

    log::info!(
        "Deleted {} of {} items",
        report.succeeded.len(),
        paths.len()
    );
    report
}

/// Remove the scanned folders that are empty now, deepest first.
///
/// A parent emptied by removing its children is removed too. Folders that
/// still hold something are left alone and not reported.
#[must_use]
pub fn prune_empty_folders(folders: &[PathBuf]) -> DeletionReport {
    let mut ordered = folders.to_vec();
    ordered.sort_by_key(|p| std::cmp::Reverse(p.components().count()));

    let mut report = DeletionReport::default();
    for path in &ordered {
        if is_empty_dir(path) {
            delete_into(&mut report, path);
        } else {
            log::debug!("Keeping non-empty folder {}", path.display());
        }
    }

    log::info!("Pruned {} empty folders", report.succeeded.len());
    report
}

fn delete_into(report: &mut DeletionReport, path: &Path) {
    match remove_one(path) {
        Ok(()) => {
            log::debug!("Deleted {}", path.display());
            report.succeeded.push(path.to_path_buf());
        }
        Err(source) => {
            let err = SweepError::Deletion {
                path: path.to_path_buf(),
                source,
            };
            log::warn!("{err}");
            report.failed.push((path.to_path_buf(), err));
        }
    }
}

fn remove_one(path: &Path) -> std::io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deletes_files_and_empty_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("old.dat");
        let empty = dir.path().join("empty");
        fs::write(&file, "bytes").unwrap();
        fs::create_dir(&empty).unwrap();

        let report = delete(&[file.clone(), empty.clone()]);
        assert!(report.is_clean());
        assert_eq!(report.succeeded, vec![file.clone(), empty.clone()]);
        assert!(!file.exists());
        assert!(!empty.exists());
    }

    #[test]
    fn test_missing_path_reported_and_batch_continues() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let present = dir.path().join("present.txt");
        fs::write(&present, "x").unwrap();

        let report = delete(&[missing.clone(), present.clone()]);
        assert_eq!(report.succeeded, vec![present.clone()]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, missing);
        assert!(matches!(
            report.failed[0].1,
            SweepError::Deletion { ref source, .. } if source.kind() == std::io::ErrorKind::NotFound
        ));
        assert!(!present.exists());
    }

    #[test]
    fn test_non_empty_dir_is_refused() {
        let dir = tempdir().unwrap();
        let full = dir.path().join("full");
        fs::create_dir(&full).unwrap();
        fs::write(full.join("keep.txt"), "keep").unwrap();

        let report = delete(&[full.clone()]);
        assert!(report.succeeded.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert!(full.join("keep.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_removed_not_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target_dir");
        let link = dir.path().join("link");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inner.txt"), "x").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let report = delete(&[link.clone()]);
        assert!(report.is_clean());
        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.join("inner.txt").exists());
    }

    #[test]
    fn test_prune_empty_folders_deepest_first() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let outer = root.join("outer");
        let inner = outer.join("inner");
        let busy = root.join("busy");
        fs::create_dir_all(&inner).unwrap();
        fs::create_dir(&busy).unwrap();
        fs::write(busy.join("data.bin"), "x").unwrap();

        let report = prune_empty_folders(&[outer.clone(), busy.clone(), inner.clone()]);
        assert!(report.is_clean());
        assert_eq!(report.succeeded, vec![inner.clone(), outer.clone()]);
        assert!(!outer.exists());
        assert!(busy.exists());
    }
}
