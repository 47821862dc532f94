//! Core types for the track-step reader library
//!
//! This module defines the record types the reader emits when extracting
//! simulation output files. The reader is stateless and only produces row
//! tables - aggregation and step numbering are separate passes.

use serde::{Deserialize, Serialize};

/// Result type for reader operations
pub type Result<T> = std::result::Result<T, ReaderError>;

/// The columns extracted from each `event` tree, in table order.
///
/// These are the ntuple column names written by the detector simulation;
/// they double as the CSV header (with the derived `step` column appended).
pub const STEP_COLUMNS: [&str; 12] = [
    "Energy", "prex", "prey", "prez", "postx", "posty", "postz", "ptype", "eventID", "trackID",
    "parentID", "dE",
];

/// One recorded simulation step of one particle track.
///
/// This is a single row as read from the `event` tree, before any event-ID
/// offsetting or step numbering.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackStep {
    /// Kinetic energy at the pre-step point
    pub energy: f64,
    /// Pre-step position
    pub prex: f64,
    pub prey: f64,
    pub prez: f64,
    /// Post-step position
    pub postx: f64,
    pub posty: f64,
    pub postz: f64,
    /// Particle type name (integer-coded types are rendered as decimal text)
    pub ptype: String,
    /// Event identifier, unique within one file only
    pub event_id: i64,
    /// Track identifier, unique within one event
    pub track_id: i64,
    /// Identifier of the parent track (0 for primaries)
    pub parent_id: i64,
    /// Energy deposited over this step
    pub de: f64,
}

/// A [`TrackStep`] with its derived 1-based step index.
///
/// Produced by the step labeler after merging. The serde renames reproduce
/// the exact ntuple column names, so serializing a sequence of these with a
/// header-writing CSV writer yields the final output table directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledStep {
    #[serde(rename = "Energy")]
    pub energy: f64,
    pub prex: f64,
    pub prey: f64,
    pub prez: f64,
    pub postx: f64,
    pub posty: f64,
    pub postz: f64,
    pub ptype: String,
    #[serde(rename = "eventID")]
    pub event_id: i64,
    #[serde(rename = "trackID")]
    pub track_id: i64,
    #[serde(rename = "parentID")]
    pub parent_id: i64,
    #[serde(rename = "dE")]
    pub de: f64,
    /// 1-based position of this row within its contiguous track block
    pub step: u32,
}

impl LabeledStep {
    /// Attach a step index to an extracted record
    pub fn new(record: TrackStep, step: u32) -> Self {
        Self {
            energy: record.energy,
            prex: record.prex,
            prey: record.prey,
            prez: record.prez,
            postx: record.postx,
            posty: record.posty,
            postz: record.postz,
            ptype: record.ptype,
            event_id: record.event_id,
            track_id: record.track_id,
            parent_id: record.parent_id,
            de: record.de,
            step,
        }
    }

    /// True if `row` belongs to the same (ptype, eventID, trackID) block
    pub fn same_track(&self, row: &TrackStep) -> bool {
        self.ptype == row.ptype && self.event_id == row.event_id && self.track_id == row.track_id
    }
}

/// Outcome of scanning one input file.
///
/// A file whose expected tree is missing is not an error: it is skipped
/// entirely and must not consume an event-ID offset slot. The tag makes that
/// distinction structural instead of relying on a sentinel value.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeScan {
    /// The tree was present; rows are in file order, incomplete rows dropped
    Rows(Vec<TrackStep>),
    /// The expected tree is not among the file's stored objects
    Absent,
}

impl TreeScan {
    /// True if the expected tree was not found
    pub fn is_absent(&self) -> bool {
        matches!(self, TreeScan::Absent)
    }

    /// Number of extracted rows (0 for an absent tree)
    pub fn row_count(&self) -> usize {
        match self {
            TreeScan::Rows(rows) => rows.len(),
            TreeScan::Absent => 0,
        }
    }
}

/// Errors that can occur during extraction
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("Failed to open ROOT file: {0}")]
    FileOpen(String),

    #[error("Failed to read tree '{tree}': {detail}")]
    TreeRead { tree: String, detail: String },

    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    #[error("Unsupported type '{type_name}' for branch '{name}'")]
    UnsupportedBranchType { name: String, type_name: String },

    #[error("Failed to read branch '{name}': {detail}")]
    BranchRead { name: String, detail: String },

    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
