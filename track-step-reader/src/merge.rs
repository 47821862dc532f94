//! Run-table aggregation
//!
//! Concatenates per-file row tables into one merged table, offsetting each
//! file's event identifiers so they stay unique across the whole run set.
//! The aggregation is an explicit fold: each scan outcome is threaded
//! through [`MergeState::fold`], which returns the next accumulator.

use crate::types::{TrackStep, TreeScan};

/// Event-ID offset applied per successfully-read file.
///
/// File at ordinal k (0-based, counted over successfully-read files only)
/// has `k * EVENT_ID_STRIDE` added to every row's eventID. Global uniqueness
/// holds only while no single file's native event count reaches the stride;
/// [`MergeState::fold`] logs a warning when a run table violates that.
pub const EVENT_ID_STRIDE: i64 = 10_000_000;

/// Fold accumulator for the merge: the table so far plus the count of
/// successfully-read files, which drives the next file's event-ID offset.
#[derive(Debug, Default)]
pub struct MergeState {
    rows: Vec<TrackStep>,
    runs_merged: usize,
}

impl MergeState {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one scan outcome into the accumulator.
    ///
    /// An absent tree leaves the state untouched - the file contributes no
    /// rows and consumes no offset slot. A present tree (even an empty one)
    /// consumes the next slot.
    pub fn fold(mut self, scan: TreeScan) -> Self {
        match scan {
            TreeScan::Absent => self,
            TreeScan::Rows(mut run) => {
                let offset = self.runs_merged as i64 * EVENT_ID_STRIDE;

                if let Some(max_id) = run.iter().map(|r| r.event_id).max() {
                    if max_id >= EVENT_ID_STRIDE {
                        log::warn!(
                            "Run {} has native eventID {} >= stride {}; merged IDs may collide",
                            self.runs_merged,
                            max_id,
                            EVENT_ID_STRIDE
                        );
                    }
                }

                for row in &mut run {
                    row.event_id += offset;
                }

                log::debug!(
                    "Merged run {} ({} rows, offset {})",
                    self.runs_merged,
                    run.len(),
                    offset
                );

                self.rows.append(&mut run);
                self.runs_merged += 1;
                self
            }
        }
    }

    /// Count of successfully-read files folded in so far
    pub fn runs_merged(&self) -> usize {
        self.runs_merged
    }

    /// Total rows accumulated so far
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Consume the accumulator, yielding the merged table
    pub fn into_rows(self) -> Vec<TrackStep> {
        self.rows
    }
}

/// Merge a sequence of scan outcomes into one table.
pub fn merge_scans(scans: impl IntoIterator<Item = TreeScan>) -> Vec<TrackStep> {
    scans
        .into_iter()
        .fold(MergeState::new(), MergeState::fold)
        .into_rows()
}
