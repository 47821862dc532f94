//! Track Step Merge CLI Application
//!
//! Command-line front end for the track-step-reader library. It adds:
//! - TOML configuration with command-line overrides
//! - Progress reporting while files are read
//! - CSV report generation
//!
//! With no arguments it merges `out/*.root` into `out/merge.csv`, matching
//! the simulation's default output layout.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use track_step_reader::{discover_files, label_steps, MergeState, ReaderConfig, RootTrackReader};

mod config;
mod report;

/// Track Step Merge - consolidate simulation run files into one CSV table
#[derive(Parser, Debug)]
#[command(name = "track-step-cli")]
#[command(about = "Merge detector-simulation track files into a step-numbered CSV", long_about = None)]
#[command(version)]
struct Args {
    /// Glob pattern selecting the input ROOT files
    #[arg(short, long, value_name = "GLOB")]
    input: Option<String>,

    /// Output CSV file path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Name of the tree to read from each file
    #[arg(short, long, value_name = "NAME")]
    tree: Option<String>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Track Step Merge CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using reader library v{}", track_step_reader::VERSION);

    let settings = config::resolve_settings(&args)?;
    run_merge(&settings, &args)
}

/// Full pipeline: discover, scan, fold, label, report
fn run_merge(settings: &config::MergeSettings, args: &Args) -> Result<()> {
    if !args.quiet {
        println!("═══════════════════════════════════════════════");
        println!("  Track Step Merge");
        println!("═══════════════════════════════════════════════\n");
    }

    let files = discover_files(&settings.pattern)
        .with_context(|| format!("Failed to enumerate input files: {}", settings.pattern))?;

    if files.is_empty() {
        log::warn!("No input files match {}", settings.pattern);
    }

    let reader_config = ReaderConfig::new().with_tree_name(settings.tree.as_str());

    let progress = if args.quiet || args.no_progress {
        None
    } else {
        Some(merge_progress_bar(files.len() as u64))
    };

    // Files are read one at a time in enumeration order; a skipped file
    // (tree absent) contributes nothing and consumes no offset slot.
    let mut state = MergeState::new();
    let mut skipped = 0usize;

    for path in &files {
        if let Some(pb) = &progress {
            pb.set_message(display_name(path));
        }

        let scan = RootTrackReader::scan(path, &reader_config)
            .with_context(|| format!("Failed to read {:?}", path))?;
        if scan.is_absent() {
            skipped += 1;
        }
        state = state.fold(scan);

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let runs_merged = state.runs_merged();
    let labeled = label_steps(state.into_rows());

    report::write_csv(&settings.output, &labeled)
        .with_context(|| format!("Failed to write {:?}", settings.output))?;

    if !args.quiet {
        println!("📊 Merge Summary:");
        println!("  Files matched: {}", files.len());
        println!("  Files merged:  {}", runs_merged);
        println!("  Files skipped: {}", skipped);
        println!("  Rows written:  {}", labeled.len());
        println!("\n✓ Wrote {:?}", settings.output);
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn merge_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}",
        )
        .unwrap()
        .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    pb
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
