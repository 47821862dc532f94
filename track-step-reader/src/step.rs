//! Step numbering
//!
//! A single forward pass over the merged table assigning each row its
//! 1-based position within a contiguous block of rows sharing the same
//! (ptype, eventID, trackID) triple.
//!
//! The pass assumes all rows of one track are adjacent in table order. That
//! holds because rows are appended in read order and never reordered, but it
//! is not enforced: if source data ever interleaves steps of the same track
//! discontinuously, each fragment restarts its count at 1.

use crate::types::{LabeledStep, TrackStep};

/// Assign step indices to a merged row sequence.
///
/// Every row starts at step 1; a row whose key triple equals its immediate
/// predecessor's gets the predecessor's step + 1.
pub fn label_steps(rows: Vec<TrackStep>) -> Vec<LabeledStep> {
    let mut labeled: Vec<LabeledStep> = Vec::with_capacity(rows.len());

    for row in rows {
        let step = match labeled.last() {
            Some(prev) if prev.same_track(&row) => prev.step + 1,
            _ => 1,
        };
        labeled.push(LabeledStep::new(row, step));
    }

    labeled
}
