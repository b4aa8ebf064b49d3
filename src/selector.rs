use crate::error::SweepError;
use crate::types::{Candidate, FileEntry};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Share of the measured total to free, validated to lie in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percent(f64);

impl Percent {
    pub fn new(value: f64) -> Result<Self, SweepError> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(Percent(value))
        } else {
            Err(SweepError::InvalidPercent(value.to_string()))
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whole bytes that may be selected out of `total`.
    #[must_use]
    pub fn budget(self, total: u64) -> u64 {
        let raw = (total as f64 * self.0 / 100.0).floor();
        (raw as u64).min(total)
    }
}

impl FromStr for Percent {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SweepError::InvalidPercent(s.to_string());
        let value: f64 = s.trim().parse().map_err(|_| invalid())?;
        Percent::new(value).map_err(|_| invalid())
    }
}

/// Parser used for the `--percent` flag and the config file.
pub fn parse_percent(s: &str) -> Result<Percent, SweepError> {
    s.parse()
}

#[derive(Debug, Default)]
pub struct Selection {
    /// Stalest first.
    pub candidates: Vec<Candidate>,
    pub total_size: u64,
    pub budget: u64,
    pub skipped: Vec<(PathBuf, SweepError)>,
}

impl Selection {
    #[must_use]
    pub fn selected_size(&self) -> u64 {
        self.candidates.iter().map(|c| c.entry.size).sum()
    }
}

/// Size and access time of `path` itself.
///
/// Symlinks are not followed: a link is measured as the link, which is what
/// deleting it frees.
pub fn measure(path: &Path) -> Result<FileEntry, SweepError> {
    let wrap = |source| SweepError::Metadata {
        path: path.to_path_buf(),
        source,
    };
    let meta = fs::symlink_metadata(path).map_err(wrap)?;
    let accessed: DateTime<Local> = meta.accessed().map_err(wrap)?.into();

    Ok(FileEntry {
        path: path.to_path_buf(),
        size: meta.len(),
        accessed,
    })
}

/// Measure `files` and propose the stalest ones for deletion.
///
/// Files whose metadata cannot be read are left out of both the total and the
/// selection and are reported in [`Selection::skipped`].
#[must_use]
pub fn select(files: &[PathBuf], percent: Percent) -> Selection {
    let mut entries = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();

    for path in files {
        match measure(path) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                log::warn!("{e}");
                skipped.push((path.clone(), e));
            }
        }
    }

    let mut selection = select_entries(entries, percent);
    selection.skipped = skipped;
    selection
}

/// Sorted greedy prefix over already measured entries.
///
/// Entries are ordered by access time, then path. They are taken in that order
/// while the running total stays within the budget; the first entry that does
/// not fit ends the selection, even if later entries are smaller. Nothing is
/// proposed at 0%, not even empty files.
#[must_use]
pub fn select_entries(mut entries: Vec<FileEntry>, percent: Percent) -> Selection {
    let total_size: u64 = entries.iter().map(|e| e.size).sum();
    let budget = percent.budget(total_size);

    if percent.value() == 0.0 {
        log::info!("Nothing selected at 0% of {total_size} bytes");
        return Selection {
            total_size,
            budget,
            ..Selection::default()
        };
    }

    entries.sort_by(|a, b| {
        a.accessed
            .cmp(&b.accessed)
            .then_with(|| a.path.cmp(&b.path))
    });

    let mut accumulated = 0u64;
    let mut candidates = Vec::new();

    for entry in entries {
        if accumulated + entry.size > budget {
            log::debug!(
                "Stopping at {} ({} bytes): budget of {budget} bytes reached",
                entry.path.display(),
                entry.size
            );
            break;
        }
        accumulated += entry.size;
        candidates.push(Candidate::from(entry));
    }

    log::info!(
        "Selected {} files, {accumulated} of {total_size} bytes (budget {budget})",
        candidates.len()
    );

    Selection {
        candidates,
        total_size,
        budget,
        skipped: Vec::new(),
    }
}
