//! End-to-end merge behavior over real ROOT files.
//!
//! Fixtures are written into temp dirs with oxyroot's writer, then pushed
//! through the scan → fold → label pipeline.

use oxyroot::{RootFile, WriterTree};
use std::path::Path;
use track_step_reader::{
    label_steps, MergeState, ReaderConfig, ReaderError, RootTrackReader, TreeScan,
    EVENT_ID_STRIDE,
};

struct FixtureRow {
    ptype: &'static str,
    event_id: i64,
    track_id: i64,
}

fn fixture_row(ptype: &'static str, event_id: i64, track_id: i64) -> FixtureRow {
    FixtureRow {
        ptype,
        event_id,
        track_id,
    }
}

/// Write a fixture file the way the simulation does: one tree, all numeric
/// columns stored as doubles (identifiers included), ptype as strings.
fn write_fixture(path: &Path, tree_name: &str, rows: &[FixtureRow]) {
    let mut file = RootFile::create(path).expect("create fixture file");
    let mut tree = WriterTree::new(tree_name);

    let n = rows.len();
    let float_col = |base: f64| -> Vec<f64> { (0..n).map(|i| base + i as f64).collect() };

    tree.new_branch("Energy".to_string(), float_col(1.0).into_iter());
    tree.new_branch("prex".to_string(), float_col(0.25).into_iter());
    tree.new_branch("prey".to_string(), float_col(0.5).into_iter());
    tree.new_branch("prez".to_string(), float_col(0.75).into_iter());
    tree.new_branch("postx".to_string(), float_col(1.25).into_iter());
    tree.new_branch("posty".to_string(), float_col(1.5).into_iter());
    tree.new_branch("postz".to_string(), float_col(1.75).into_iter());

    let ptype: Vec<String> = rows.iter().map(|r| r.ptype.to_string()).collect();
    tree.new_branch("ptype".to_string(), ptype.into_iter());

    let event_id: Vec<f64> = rows.iter().map(|r| r.event_id as f64).collect();
    tree.new_branch("eventID".to_string(), event_id.into_iter());
    let track_id: Vec<f64> = rows.iter().map(|r| r.track_id as f64).collect();
    tree.new_branch("trackID".to_string(), track_id.into_iter());
    let parent_id: Vec<f64> = vec![0.0; n];
    tree.new_branch("parentID".to_string(), parent_id.into_iter());
    tree.new_branch("dE".to_string(), float_col(0.125).into_iter());

    tree.write(&mut file).expect("write fixture tree");
    file.close().expect("close fixture file");
}

fn scan(path: &Path) -> TreeScan {
    RootTrackReader::scan(path, &ReaderConfig::new()).expect("scan fixture")
}

#[test]
fn two_file_offset_and_step_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let file_a = dir.path().join("run_a.root");
    let file_b = dir.path().join("run_b.root");

    // Both files carry the same (ptype, eventID, trackID) triple; the
    // offset must keep their blocks apart after merging.
    write_fixture(
        &file_a,
        "event",
        &[fixture_row("1", 5, 1), fixture_row("1", 5, 1)],
    );
    write_fixture(&file_b, "event", &[fixture_row("1", 5, 1)]);

    let state = MergeState::new().fold(scan(&file_a)).fold(scan(&file_b));
    assert_eq!(state.runs_merged(), 2);

    let labeled = label_steps(state.into_rows());
    assert_eq!(labeled.len(), 3);

    let ids: Vec<i64> = labeled.iter().map(|l| l.event_id).collect();
    assert_eq!(ids, vec![5, 5, 5 + EVENT_ID_STRIDE]);

    let steps: Vec<u32> = labeled.iter().map(|l| l.step).collect();
    assert_eq!(steps, vec![1, 2, 1]);
}

#[test]
fn wrong_tree_name_is_skipped_without_offset_slot() {
    let dir = tempfile::tempdir().unwrap();
    let good_a = dir.path().join("run_a.root");
    let stray = dir.path().join("calib.root");
    let good_b = dir.path().join("run_b.root");

    write_fixture(&good_a, "event", &[fixture_row("neutron", 1, 1)]);
    write_fixture(&stray, "calibration", &[fixture_row("neutron", 9, 9)]);
    write_fixture(&good_b, "event", &[fixture_row("neutron", 2, 1)]);

    let stray_scan = scan(&stray);
    assert!(stray_scan.is_absent());

    let state = MergeState::new()
        .fold(scan(&good_a))
        .fold(stray_scan)
        .fold(scan(&good_b));

    // The stray file contributes nothing and does not advance the ordinal
    assert_eq!(state.runs_merged(), 2);
    let ids: Vec<i64> = state.into_rows().iter().map(|r| r.event_id).collect();
    assert_eq!(ids, vec![1, 2 + EVENT_ID_STRIDE]);
}

#[test]
fn missing_branch_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.root");

    // Tree is present but lacks the dE branch
    let mut file = RootFile::create(&path).expect("create fixture file");
    let mut tree = WriterTree::new("event");
    tree.new_branch("Energy".to_string(), vec![1.0f64].into_iter());
    tree.new_branch("prex".to_string(), vec![0.1f64].into_iter());
    tree.new_branch("prey".to_string(), vec![0.2f64].into_iter());
    tree.new_branch("prez".to_string(), vec![0.3f64].into_iter());
    tree.new_branch("postx".to_string(), vec![0.4f64].into_iter());
    tree.new_branch("posty".to_string(), vec![0.5f64].into_iter());
    tree.new_branch("postz".to_string(), vec![0.6f64].into_iter());
    tree.new_branch("ptype".to_string(), vec!["neutron".to_string()].into_iter());
    tree.new_branch("eventID".to_string(), vec![1.0f64].into_iter());
    tree.new_branch("trackID".to_string(), vec![1.0f64].into_iter());
    tree.new_branch("parentID".to_string(), vec![0.0f64].into_iter());
    tree.write(&mut file).expect("write fixture tree");
    file.close().expect("close fixture file");
    // Drop the writer handle so its on-Drop header flush lands on disk before
    // we reopen the file, mirroring what write_fixture does implicitly.
    drop(file);

    let result = RootTrackReader::scan(&path, &ReaderConfig::new());
    assert!(matches!(result, Err(ReaderError::BranchNotFound(ref name)) if name == "dE"));
}

#[test]
fn extracted_values_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.root");

    write_fixture(
        &path,
        "event",
        &[fixture_row("neutron", 3, 2), fixture_row("gamma", 4, 1)],
    );

    let rows = match scan(&path) {
        TreeScan::Rows(rows) => rows,
        TreeScan::Absent => panic!("tree should be present"),
    };

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].ptype, "neutron");
    assert_eq!(rows[0].event_id, 3);
    assert_eq!(rows[0].track_id, 2);
    assert_eq!(rows[0].parent_id, 0);
    assert_eq!(rows[0].energy, 1.0);
    assert_eq!(rows[0].de, 0.125);
    assert_eq!(rows[1].ptype, "gamma");
    assert_eq!(rows[1].event_id, 4);
    assert_eq!(rows[1].energy, 2.0);
    assert_eq!(rows[1].prex, 1.25);
}

#[test]
fn nonexistent_file_is_an_error() {
    let result = RootTrackReader::scan(Path::new("no_such_run.root"), &ReaderConfig::new());
    assert!(matches!(result, Err(ReaderError::FileOpen(_))));
}

#[test]
fn configured_tree_name_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calib.root");
    write_fixture(&path, "calibration", &[fixture_row("neutron", 1, 1)]);

    let config = ReaderConfig::new().with_tree_name("calibration");
    let scan = RootTrackReader::scan(&path, &config).expect("scan fixture");
    assert_eq!(scan.row_count(), 1);
}
