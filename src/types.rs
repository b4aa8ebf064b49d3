use chrono::{DateTime, Local};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
    pub accessed: DateTime<Local>,
}

/// A file proposed for deletion, pending approval.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub entry: FileEntry,
}

impl Candidate {
    #[must_use]
    pub fn formatted_accessed(&self) -> String {
        crate::report::format_timestamp(self.entry.accessed)
    }
}

impl From<FileEntry> for Candidate {
    fn from(entry: FileEntry) -> Self {
        Candidate { entry }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    pub folders: Vec<PathBuf>,
}
