mod config;
mod deleter;
mod error;
mod report;
mod review;
mod scanner;
mod selector;
mod types;

use clap::Parser;
use colored::Colorize;
use config::SweepConfig;
use dialoguer::{Confirm, MultiSelect};
use error::SweepError;
use review::Review;
use selector::{Percent, parse_percent};
use std::path::PathBuf;
use types::Candidate;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Propose the least recently accessed files for deletion until a share of the scanned space is freed",
    long_about = None
)]
struct Args {
    /// Directory to scan
    directory: PathBuf,

    /// Percentage of the scanned total to free (0-100)
    #[arg(long, short, value_parser = parse_percent)]
    percent: Option<Percent>,

    /// Include files in subfolders
    #[arg(long, short)]
    recursive: bool,

    /// Approve every proposed file without the interactive review
    #[arg(long, short)]
    yes: bool,

    /// Only show the proposal, delete nothing
    #[arg(long, short = 'n')]
    dry_run: bool,

    /// After deleting, remove scanned folders that were left empty
    #[arg(long)]
    prune_empty_folders: bool,

    /// Defaults file with KEY=value lines (default: ./.stale_sweep if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            std::process::exit(if e.is_validation() { 2 } else { 1 });
        }
    }
}

#[derive(Debug, PartialEq)]
struct Settings {
    percent: Percent,
    include_subfolders: bool,
    prune: bool,
}

/// Merge flags over config and check the directory. Runs before any scan.
fn resolve_settings(args: &Args, config: &SweepConfig) -> Result<Settings, SweepError> {
    let percent = args
        .percent
        .or(config.percent)
        .ok_or(SweepError::MissingPercent)?;
    scanner::check_root(&args.directory)?;

    Ok(Settings {
        percent,
        include_subfolders: args.recursive || config.include_subfolders,
        prune: args.prune_empty_folders || config.prune_empty_folders,
    })
}

fn run(args: &Args) -> Result<i32, SweepError> {
    let config = SweepConfig::load(args.config.as_deref())?;
    let Settings {
        percent,
        include_subfolders,
        prune,
    } = resolve_settings(args, &config)?;

    println!(
        "{}",
        format!(
            "=== Stale file sweep: {} ({}% of scanned space) ===",
            args.directory.display(),
            percent.value()
        )
        .cyan()
    );

    let scan = scanner::scan(&args.directory, include_subfolders)?;
    println!(
        "Found {} files and {} folders{}.",
        scan.files.len(),
        scan.folders.len(),
        if include_subfolders {
            " (including subfolders)"
        } else {
            ""
        }
    );

    let selection = selector::select(&scan.files, percent);
    report::print_candidates(&selection);
    report::print_skipped(&selection.skipped);

    if args.dry_run {
        println!("\n{}", "Dry run: nothing was deleted.".yellow());
        return Ok(0);
    }
    if selection.candidates.is_empty() {
        return Ok(0);
    }

    let approved = if args.yes {
        selection.candidates
    } else {
        review_interactively(selection.candidates)?
    };

    if approved.is_empty() {
        println!("\nNothing approved, no files deleted.");
        return Ok(0);
    }

    let paths: Vec<PathBuf> = approved.iter().map(|c| c.entry.path.clone()).collect();
    let mut outcome = deleter::delete(&paths);
    let freed = report::freed_bytes(&approved, &outcome);

    if prune {
        let pruned = deleter::prune_empty_folders(&scan.folders);
        println!("Removed {} empty folders.", pruned.succeeded.len());
        outcome.failed.extend(pruned.failed);
    }

    report::print_deletion_report(&outcome, freed);
    Ok(if outcome.is_clean() { 0 } else { 1 })
}

fn review_interactively(candidates: Vec<Candidate>) -> Result<Vec<Candidate>, SweepError> {
    let labels: Vec<String> = candidates
        .iter()
        .map(|c| {
            format!(
                "{}  ({}, last accessed {})",
                c.entry.path.display(),
                human_bytes::human_bytes(c.entry.size as f64),
                c.formatted_accessed()
            )
        })
        .collect();
    let defaults = vec![true; labels.len()];

    let chosen = MultiSelect::new()
        .with_prompt("Untick files to keep (space toggles, enter confirms)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    let mut review = Review::new(candidates);
    review.retain_indices(&chosen);

    if review.approved_count() == 0 {
        return Ok(Vec::new());
    }

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Delete {} files ({})?",
            review.approved_count(),
            human_bytes::human_bytes(review.approved_size() as f64)
        ))
        .default(false)
        .interact()?;

    Ok(if confirmed {
        review.into_approved()
    } else {
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("stale_sweep").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_bad_percent_rejected_by_parser() {
        for value in ["abc", "-5", "150"] {
            let result = Args::try_parse_from(["stale_sweep", ".", "--percent", value]);
            assert!(result.is_err(), "{value} should be rejected");
        }
    }

    #[test]
    fn test_missing_percent_rejected() {
        let dir = tempdir().unwrap();
        let args = parse(&[dir.path().to_str().unwrap()]);

        let err = resolve_settings(&args, &SweepConfig::default()).unwrap_err();
        assert!(matches!(err, SweepError::MissingPercent));
        assert!(err.is_validation());
    }

    #[test]
    fn test_missing_directory_rejected() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent");
        let args = parse(&[missing.to_str().unwrap(), "-p", "10"]);

        let err = resolve_settings(&args, &SweepConfig::default()).unwrap_err();
        assert!(matches!(err, SweepError::PathNotFound(ref p) if *p == missing));
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempdir().unwrap();
        let config = SweepConfig {
            percent: Some(Percent::new(80.0).unwrap()),
            include_subfolders: true,
            prune_empty_folders: false,
        };

        let args = parse(&[dir.path().to_str().unwrap(), "-p", "25", "--prune-empty-folders"]);
        let settings = resolve_settings(&args, &config).unwrap();
        assert_eq!(
            settings,
            Settings {
                percent: Percent::new(25.0).unwrap(),
                include_subfolders: true,
                prune: true,
            }
        );

        let args = parse(&[dir.path().to_str().unwrap()]);
        let settings = resolve_settings(&args, &config).unwrap();
        assert_eq!(settings.percent.value(), 80.0);
    }
}
