//! CSV report writer
//!
//! Writes the merged, step-numbered table to a single CSV file: one header
//! row with the ntuple column names plus `step`, no index column, one row
//! per retained record.

use anyhow::{Context, Result};
use std::path::Path;
use track_step_reader::{LabeledStep, STEP_COLUMNS};

/// Write the merged table to `path`, creating parent directories as needed.
///
/// The header row is emitted even when the table is empty.
pub fn write_csv(path: &Path, rows: &[LabeledStep]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {:?}", parent))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {:?}", path))?;

    if rows.is_empty() {
        // serialize() only writes the header once it sees a record
        let mut header: Vec<&str> = STEP_COLUMNS.to_vec();
        header.push("step");
        writer
            .write_record(&header)
            .context("Failed to write CSV header")?;
    }

    for row in rows {
        writer
            .serialize(row)
            .context("Failed to write CSV row")?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    log::info!("Wrote {} rows to {:?}", rows.len(), path);

    Ok(())
}
