//! Run the workspace tests with snapshot cleanup.
//!
//! Golden layout tests use inline insta snapshots. When one of them fails, insta leaves a
//! `.pending-snap` file next to the test source (or a `.snap.new` file for file snapshots).
//! Stale pending files confuse `cargo insta review`, so they are removed before each run.
//!
//! ## Commands
//!
//! - `run` - Run all tests with cleanup
//! - `golden` - Run only the golden layout tests
//! - `clean` - Remove pending snapshot files
//! - `status` - Show pending snapshot files

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Subcommand;

/// Directories that may contain pending snapshots.
const SNAPSHOT_ROOTS: &[&str] = &["src", "screen-canvas-config/src"];

const PENDING_SUFFIXES: &[&str] = &[".pending-snap", ".snap.new"];

#[derive(Subcommand)]
pub enum Action {
    /// Run all tests with cleanup
    Run {
        /// Only run tests matching this filter
        #[arg(long, short)]
        filter: Option<String>,

        /// Don't remove pending snapshots before running
        #[arg(long)]
        no_pre_clean: bool,

        /// Remove pending snapshots after test failures
        #[arg(long)]
        post_clean: bool,

        /// Run tests in release mode
        #[arg(long)]
        release: bool,
    },
    /// Run only the golden layout tests
    Golden,
    /// Remove pending snapshot files
    Clean {
        /// Show what would be removed without removing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Show pending snapshot files
    Status,
}

pub fn run(action: Action) -> Result<()> {
    match action {
        Action::Run {
            filter,
            no_pre_clean,
            post_clean,
            release,
        } => run_tests(filter, no_pre_clean, post_clean, release),
        Action::Golden => run_golden(),
        Action::Clean { dry_run } => clean_pending(dry_run),
        Action::Status => show_status(),
    }
}

fn run_golden() -> Result<()> {
    println!("=== Golden layout tests ===\n");

    let pending = find_pending_files();
    if !pending.is_empty() {
        println!("Found {} pending snapshots from an earlier run", pending.len());
        println!("  Run: cargo xtask test-all clean\n");
    }

    let status = Command::new("cargo")
        .args(["test", "--lib", "--", "golden"])
        .status()
        .context("failed to run cargo test")?;

    if !status.success() {
        println!();
        println!("The rendered layout changed. To inspect:");
        println!("  1. Run 'cargo insta review' to see the diff");
        println!("  2. Accept only if the new layout is intended");
        bail!("golden tests failed");
    }

    println!("\nGolden tests pass");
    Ok(())
}

fn run_tests(
    filter: Option<String>,
    no_pre_clean: bool,
    post_clean: bool,
    release: bool,
) -> Result<()> {
    if !no_pre_clean {
        let removed = remove_pending_files()?;
        if removed > 0 {
            println!("Removed {removed} stale pending snapshots\n");
        }
    }

    let mut args = vec!["test", "--workspace"];
    if release {
        args.push("--release");
    }
    if let Some(filter) = &filter {
        args.push("--");
        args.push(filter);
    }

    println!("Running: cargo {}\n", args.join(" "));

    let start = Instant::now();
    let status = Command::new("cargo")
        .args(&args)
        .status()
        .context("failed to run cargo test")?;
    let duration = start.elapsed().as_secs_f64();

    println!();
    if status.success() {
        println!("All tests passed in {duration:.2}s");
        return Ok(());
    }

    let pending = find_pending_files();
    if !pending.is_empty() {
        println!("Found {} pending snapshots", pending.len());
        if post_clean {
            let removed = remove_pending_files()?;
            println!("Removed {removed} files (--post-clean)");
        } else {
            println!("  To view diffs: cargo insta review");
            println!("  To clean up: cargo xtask test-all clean");
        }
    }

    bail!("some tests failed (took {duration:.2}s)");
}

fn clean_pending(dry_run: bool) -> Result<()> {
    let files = find_pending_files();
    if files.is_empty() {
        println!("No pending snapshots found");
        return Ok(());
    }

    for path in &files {
        if dry_run {
            println!("  [dry-run] Would remove: {}", path.display());
        } else {
            println!("  Removing {}", path.display());
            std::fs::remove_file(path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
    }

    println!("\n{} {} files", if dry_run { "Would remove" } else { "Removed" }, files.len());
    Ok(())
}

fn show_status() -> Result<()> {
    let files = find_pending_files();
    if files.is_empty() {
        println!("No pending snapshots");
        return Ok(());
    }

    println!("Pending snapshots: {}\n", files.len());
    for path in &files {
        println!("  {}", path.display());
    }
    println!();
    println!("  View diffs: cargo insta review");
    println!("  Clean up: cargo xtask test-all clean");
    Ok(())
}

fn find_pending_files() -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in SNAPSHOT_ROOTS {
        collect_pending(Path::new(root), &mut files);
    }
    files.sort();
    files
}

fn collect_pending(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() {
            collect_pending(&path, files);
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if PENDING_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            files.push(path);
        }
    }
}

fn remove_pending_files() -> Result<usize> {
    let files = find_pending_files();
    for path in &files {
        std::fs::remove_file(path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
    }
    Ok(files.len())
}
