//! ROOT file extractor
//!
//! Reads the fixed column set from one `event` tree using the `oxyroot`
//! crate and assembles a row-per-record table.
//!
//! ## Behavior
//! - A file without the expected tree yields [`TreeScan::Absent`] - the
//!   caller skips it; this is not an error.
//! - A present tree missing one of the requested branches is a hard error.
//! - Rows with any missing field (a column shorter than the longest column,
//!   or a NaN in a float field) are dropped, not imputed.
//!
//! The whole tree is materialised in memory; input files are assumed small
//! enough for that.

use crate::config::ReaderConfig;
use crate::types::{ReaderError, Result, TrackStep, TreeScan};
use oxyroot::{Branch, Named, ReaderTree, RootFile};
use std::path::Path;

/// Extractor for simulation step trees stored in ROOT files
pub struct RootTrackReader;

impl RootTrackReader {
    /// Scan one input file for the configured tree.
    ///
    /// Returns `TreeScan::Absent` when the tree is not among the file's
    /// stored keys, otherwise the extracted rows in file order.
    pub fn scan(path: &Path, config: &ReaderConfig) -> Result<TreeScan> {
        log::info!("Opening ROOT file: {:?}", path);

        if !path.exists() {
            return Err(ReaderError::FileOpen(format!(
                "file not found: {:?}",
                path
            )));
        }

        let mut file = RootFile::open(path)
            .map_err(|e| ReaderError::FileOpen(format!("{:?}: {}", path, e)))?;

        // The tree-absent case is a skip, not a failure, so probe the key
        // list before attempting to read the tree.
        if !has_tree(&mut file, &config.tree_name) {
            log::warn!(
                "No '{}' tree in {:?}, file will be skipped",
                config.tree_name,
                path
            );
            return Ok(TreeScan::Absent);
        }

        let tree = file.get_tree(&config.tree_name).map_err(|e| ReaderError::TreeRead {
            tree: config.tree_name.clone(),
            detail: e.to_string(),
        })?;

        let columns = read_columns(&tree)?;
        let rows = assemble_rows(columns);
        log::debug!("Extracted {} rows from {:?}", rows.len(), path);

        Ok(TreeScan::Rows(rows))
    }
}

/// Check whether a TTree with the given name is among the file's keys
fn has_tree(file: &mut RootFile, tree_name: &str) -> bool {
    file.keys()
        .into_iter()
        .any(|key| key.class_name() == "TTree" && key.name() == tree_name)
}

/// Raw column vectors as read from the tree, before row assembly.
///
/// Columns may legitimately differ in length when the writer was cut short;
/// rows past the end of any column are treated as incomplete.
struct RawColumns {
    energy: Vec<f64>,
    prex: Vec<f64>,
    prey: Vec<f64>,
    prez: Vec<f64>,
    postx: Vec<f64>,
    posty: Vec<f64>,
    postz: Vec<f64>,
    ptype: Vec<String>,
    event_id: Vec<i64>,
    track_id: Vec<i64>,
    parent_id: Vec<i64>,
    de: Vec<f64>,
}

impl RawColumns {
    fn max_len(&self) -> usize {
        [
            self.energy.len(),
            self.prex.len(),
            self.prey.len(),
            self.prez.len(),
            self.postx.len(),
            self.posty.len(),
            self.postz.len(),
            self.ptype.len(),
            self.event_id.len(),
            self.track_id.len(),
            self.parent_id.len(),
            self.de.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    /// Assemble row `i`, or `None` if any field is missing
    fn row(&self, i: usize) -> Option<TrackStep> {
        Some(TrackStep {
            energy: float_at(&self.energy, i)?,
            prex: float_at(&self.prex, i)?,
            prey: float_at(&self.prey, i)?,
            prez: float_at(&self.prez, i)?,
            postx: float_at(&self.postx, i)?,
            posty: float_at(&self.posty, i)?,
            postz: float_at(&self.postz, i)?,
            ptype: self.ptype.get(i)?.clone(),
            event_id: self.event_id.get(i).copied()?,
            track_id: self.track_id.get(i).copied()?,
            parent_id: self.parent_id.get(i).copied()?,
            de: float_at(&self.de, i)?,
        })
    }
}

/// A NaN counts as a missing value, same as a short column
fn float_at(column: &[f64], i: usize) -> Option<f64> {
    column.get(i).copied().filter(|v| !v.is_nan())
}

/// Build the row table, dropping rows with any missing field
fn assemble_rows(columns: RawColumns) -> Vec<TrackStep> {
    let total = columns.max_len();
    let mut rows = Vec::with_capacity(total);
    let mut dropped = 0usize;

    for i in 0..total {
        match columns.row(i) {
            Some(row) => rows.push(row),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::warn!("Dropped {} incomplete rows", dropped);
    }

    rows
}

fn read_columns(tree: &ReaderTree) -> Result<RawColumns> {
    let branches: Vec<&Branch> = tree.branches().collect();

    Ok(RawColumns {
        energy: read_float_column(&branches, "Energy")?,
        prex: read_float_column(&branches, "prex")?,
        prey: read_float_column(&branches, "prey")?,
        prez: read_float_column(&branches, "prez")?,
        postx: read_float_column(&branches, "postx")?,
        posty: read_float_column(&branches, "posty")?,
        postz: read_float_column(&branches, "postz")?,
        ptype: read_text_column(&branches, "ptype")?,
        event_id: read_id_column(&branches, "eventID")?,
        track_id: read_id_column(&branches, "trackID")?,
        parent_id: read_id_column(&branches, "parentID")?,
        de: read_float_column(&branches, "dE")?,
    })
}

fn find_branch<'t>(branches: &[&'t Branch], name: &str) -> Result<&'t Branch> {
    branches
        .iter()
        .copied()
        .find(|b| b.name() == name)
        .ok_or_else(|| ReaderError::BranchNotFound(name.to_string()))
}

/// Scalar storage kinds the reader accepts for numeric columns
#[derive(Clone, Copy)]
enum ScalarKind {
    F32,
    F64,
    I32,
    I64,
    U32,
}

/// Map a ROOT item type name onto a supported scalar kind.
///
/// The simulation writes every numeric column as double (identifiers
/// included), but re-productions with integer ID columns exist, so both are
/// accepted. Vector-valued branches are not.
fn scalar_kind(type_name: &str) -> Option<ScalarKind> {
    let lower = type_name.to_ascii_lowercase();
    if lower.contains("vector") {
        return None;
    }
    match lower.as_str() {
        "float" | "float_t" | "float32_t" => Some(ScalarKind::F32),
        "double" | "double_t" | "double32_t" => Some(ScalarKind::F64),
        "int" | "int_t" | "int32_t" => Some(ScalarKind::I32),
        "long" | "long64_t" | "int64_t" => Some(ScalarKind::I64),
        "unsigned int" | "uint_t" | "uint32_t" => Some(ScalarKind::U32),
        _ => None,
    }
}

fn is_text_type(type_name: &str) -> bool {
    let lower = type_name.to_ascii_lowercase();
    lower.contains("string") || lower.contains("char")
}

fn branch_read_error(name: &str, err: impl std::fmt::Display) -> ReaderError {
    // The oxyroot error type is not public; keep the rendered message
    ReaderError::BranchRead {
        name: name.to_string(),
        detail: err.to_string(),
    }
}

/// Read a numeric branch as f64 regardless of its stored width
fn read_float_column(branches: &[&Branch], name: &str) -> Result<Vec<f64>> {
    let branch = find_branch(branches, name)?;
    let type_name = branch.item_type_name();
    let kind = scalar_kind(&type_name).ok_or_else(|| ReaderError::UnsupportedBranchType {
        name: name.to_string(),
        type_name: type_name.to_string(),
    })?;

    let values = match kind {
        ScalarKind::F32 => branch
            .as_iter::<f32>()
            .map_err(|e| branch_read_error(name, e))?
            .map(|v| v as f64)
            .collect(),
        ScalarKind::F64 => branch
            .as_iter::<f64>()
            .map_err(|e| branch_read_error(name, e))?
            .collect(),
        ScalarKind::I32 => branch
            .as_iter::<i32>()
            .map_err(|e| branch_read_error(name, e))?
            .map(|v| v as f64)
            .collect(),
        ScalarKind::I64 => branch
            .as_iter::<i64>()
            .map_err(|e| branch_read_error(name, e))?
            .map(|v| v as f64)
            .collect(),
        ScalarKind::U32 => branch
            .as_iter::<u32>()
            .map_err(|e| branch_read_error(name, e))?
            .map(|v| v as f64)
            .collect(),
    };

    Ok(values)
}

/// Read an identifier branch as i64.
///
/// Identifier columns stored as doubles (the simulation's own layout) are
/// truncated back to their integral value.
fn read_id_column(branches: &[&Branch], name: &str) -> Result<Vec<i64>> {
    Ok(read_float_column(branches, name)?
        .into_iter()
        .map(|v| v as i64)
        .collect())
}

/// Read the particle-type branch as text.
///
/// Accepts string storage (the simulation writes particle names) and
/// integer-coded storage, which is rendered as decimal text.
fn read_text_column(branches: &[&Branch], name: &str) -> Result<Vec<String>> {
    let branch = find_branch(branches, name)?;
    let type_name = branch.item_type_name();

    if is_text_type(&type_name) {
        return Ok(branch
            .as_iter::<String>()
            .map_err(|e| branch_read_error(name, e))?
            .collect());
    }

    if scalar_kind(&type_name).is_some() {
        return Ok(read_float_column(branches, name)?
            .into_iter()
            .map(|v| {
                if v.fract() == 0.0 {
                    format!("{}", v as i64)
                } else {
                    v.to_string()
                }
            })
            .collect());
    }

    Err(ReaderError::UnsupportedBranchType {
        name: name.to_string(),
        type_name: type_name.to_string(),
    })
}
