use crate::error::SweepError;
use crate::selector::{Percent, parse_percent};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = ".stale_sweep";

/// Defaults read from a `KEY=value` file. Command-line flags win over these.
#[derive(Debug, Default, PartialEq)]
pub struct SweepConfig {
    pub percent: Option<Percent>,
    pub include_subfolders: bool,
    pub prune_empty_folders: bool,
}

impl SweepConfig {
    /// Load `explicit` if given, else `.stale_sweep` in the working directory.
    ///
    /// Only a missing default file falls back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SweepError> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        match fs::read_to_string(&path) {
            Ok(content) => {
                log::debug!("Loading config from {}", path.display());
                Self::parse(&content, &path)
            }
            Err(e) if e.kind() == ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(e) => Err(SweepError::Config {
                path,
                reason: e.to_string(),
            }),
        }
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, SweepError> {
        let mut map = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((k, v)) = line.split_once('=') {
                map.insert(k.trim(), v.trim().trim_matches('"'));
            }
        }

        let fail = |reason: String| SweepError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let percent = map
            .get("PERCENT")
            .map(|v| parse_percent(v))
            .transpose()
            .map_err(|e| fail(e.to_string()))?;

        let flag = |key: &str| -> Result<bool, SweepError> {
            match map.get(key) {
                None => Ok(false),
                Some(v) => parse_bool(v).ok_or_else(|| fail(format!("{key}: not a boolean: '{v}'"))),
            }
        };

        Ok(SweepConfig {
            percent,
            include_subfolders: flag("INCLUDE_SUBFOLDERS")?,
            prune_empty_folders: flag("PRUNE_EMPTY_FOLDERS")?,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
