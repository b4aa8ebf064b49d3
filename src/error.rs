use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("invalid percentage '{0}': expected a number between 0 and 100")]
    InvalidPercent(String),

    #[error("no percentage given: pass --percent or set PERCENT in the config file")]
    MissingPercent,

    #[error("path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("cannot read metadata for {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot delete {}: {source}", path.display())]
    Deletion {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("review aborted: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SweepError {
    /// Errors raised before any filesystem work starts.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SweepError::InvalidPercent(_)
                | SweepError::MissingPercent
                | SweepError::PathNotFound(_)
                | SweepError::NotADirectory(_)
                | SweepError::Config { .. }
        )
    }
}
