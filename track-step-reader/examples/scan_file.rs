//! Standalone track-file scanner
//!
//! Scans one simulation output file and prints the first rows plus summary
//! counts, without merging or step numbering.
//!
//! Usage:
//!   scan_file <run.root> [--tree <name>] [--limit <count>]

use std::env;
use std::path::PathBuf;
use track_step_reader::{ReaderConfig, RootTrackReader, TrackStep, TreeScan};

struct ScanStats {
    rows: usize,
    events: std::collections::HashSet<i64>,
    particle_types: std::collections::HashMap<String, usize>,
}

impl ScanStats {
    fn new() -> Self {
        Self {
            rows: 0,
            events: std::collections::HashSet::new(),
            particle_types: std::collections::HashMap::new(),
        }
    }

    fn record(&mut self, row: &TrackStep) {
        self.rows += 1;
        self.events.insert(row.event_id);
        *self.particle_types.entry(row.ptype.clone()).or_insert(0) += 1;
    }

    fn print_summary(&self) {
        println!("\n=== SCAN SUMMARY ===");
        println!("Rows extracted: {}", self.rows);
        println!("Distinct events: {}", self.events.len());
        println!("Particle types: {}", self.particle_types.len());

        let mut sorted: Vec<_> = self.particle_types.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(a.1));
        for (name, count) in sorted.iter().take(10) {
            println!("  {}: {} rows", name, count);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <run.root> [--tree <name>] [--limit <count>]", args[0]);
        std::process::exit(1);
    }

    let file = PathBuf::from(&args[1]);
    let mut tree_name = "event".to_string();
    let mut limit: usize = 10;

    // Parse arguments
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--tree" => {
                i += 1;
                if i < args.len() {
                    tree_name = args[i].clone();
                }
            }
            "--limit" => {
                i += 1;
                if i < args.len() {
                    limit = args[i].parse()?;
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    println!("=== Track File Scanner ===");
    println!("File: {:?}", file);
    println!("Tree: {}", tree_name);
    println!();

    let config = ReaderConfig::new().with_tree_name(tree_name.as_str());
    let rows = match RootTrackReader::scan(&file, &config)? {
        TreeScan::Absent => {
            println!("⚠ No '{}' tree in this file - it would be skipped by a merge", tree_name);
            return Ok(());
        }
        TreeScan::Rows(rows) => rows,
    };

    let mut stats = ScanStats::new();
    for (i, row) in rows.iter().enumerate() {
        stats.record(row);
        if i < limit {
            println!(
                "event {} track {} parent {} {} E={:.4} dE={:.4}",
                row.event_id, row.track_id, row.parent_id, row.ptype, row.energy, row.de
            );
        }
    }
    if rows.len() > limit {
        println!("... and {} more rows", rows.len() - limit);
    }

    stats.print_summary();

    Ok(())
}
