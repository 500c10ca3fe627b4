use std::fs;
use std::time::Duration;

use conway::{Config, Grid, LifeProgram, RuleEngine, RunState, SparseSnapshot, snapshot};
use program::{
    DEFAULT_BACKGROUND, DrawOp, Harness, HarnessConfig, LogLevel, Logger, Options,
    RecordingSurface,
};

fn quiet() -> Logger {
    Logger::new("Program", LogLevel::Fatal)
}

fn options(pairs: &[(&str, &str)]) -> Options {
    pairs.iter().map(|&(k, v)| (k.to_string(), v.to_string())).collect()
}

fn fast_harness(program: LifeProgram) -> Harness {
    let config = HarnessConfig { frame_period: Duration::from_millis(1), ..HarnessConfig::default() };
    Harness::new(Box::new(program), config)
}

#[test]
fn lone_cell_dies_in_first_generation() {
    let config = Config { size: 5, step: Duration::from_millis(5), ..Config::default() };
    let mut program = LifeProgram::new(config, quiet());
    program.grid_mut().set_cell(2, 2, true).unwrap();

    let mut harness = fast_harness(program);
    harness.start().unwrap();
    for _ in 0..500 {
        harness.update().unwrap();
        if harness.status_line().starts_with("generation 1 ") {
            break;
        }
    }
    assert!(harness.status_line().starts_with("generation 1 | 0 alive | running"));
}

#[test]
fn import_places_exactly_listed_cells() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("corners.grid");
    fs::write(&path, "[[0,0],[9,9]]").unwrap();

    let program = LifeProgram::from_options(
        &options(&[("size", "10"), ("file", path.to_str().unwrap())]),
        &quiet(),
    );
    let grid = program.grid();
    for x in 0..10 {
        for y in 0..10 {
            let expected = (x, y) == (0, 0) || (x, y) == (9, 9);
            assert_eq!(grid.is_alive(x, y), expected, "({x}, {y})");
        }
    }
}

#[test]
fn out_of_range_pairs_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("wide.grid");
    fs::write(&path, "[[1,1],[10,2],[2,-3],[3,3]]").unwrap();

    let mut program = LifeProgram::new(Config { size: 10, ..Config::default() }, quiet());
    let report = program.import_file(&path).unwrap();
    assert_eq!(report.applied, 2);
    assert_eq!(report.skipped, vec![(10, 2), (2, -3)]);
    assert_eq!(program.grid().alive_cells().collect::<Vec<_>>(), vec![(1, 1), (3, 3)]);
}

#[test]
fn malformed_file_still_launches() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.grid");
    fs::write(&path, "{\"alive\": [[1,1]]}").unwrap();

    let program = LifeProgram::from_options(
        &options(&[("size", "8"), ("pattern", "blinker"), ("file", path.to_str().unwrap())]),
        &quiet(),
    );
    // Pattern seeded before the failed import is untouched.
    assert_eq!(program.grid().alive_count(), 3);

    let mut harness = fast_harness(program);
    harness.start().unwrap();
    harness.update().unwrap();
}

#[test]
fn missing_file_still_launches() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.grid");
    let program = LifeProgram::from_options(&options(&[("file", path.to_str().unwrap())]), &quiet());
    assert_eq!(program.grid().alive_count(), 0);
    assert_eq!(program.grid().size(), 100);
}

#[test]
fn oversized_grid_still_launches() {
    let program = LifeProgram::from_options(&options(&[("size", "4294967297")]), &quiet());
    assert_eq!(program.grid().size(), 100);
}

#[test]
fn hold_waits_for_explicit_run() {
    let config = Config { size: 6, step: Duration::from_millis(1), hold: true, ..Config::default() };
    let mut program = LifeProgram::new(config, quiet());
    program.grid_mut().set_cell(3, 3, true).unwrap();

    let mut harness = fast_harness(program);
    harness.start().unwrap();
    for _ in 0..5 {
        harness.update().unwrap();
    }
    assert_eq!(harness.status_line().split(" | ").take(3).collect::<Vec<_>>(), ["generation 0", "1 alive", "hold"]);

    harness.key_pressed(egui::Key::Space);
    for _ in 0..500 {
        harness.update().unwrap();
        if harness.status_line().starts_with("generation 1 ") {
            break;
        }
    }
    assert!(harness.status_line().starts_with("generation 1 | 0 alive | running"));
}

#[test]
fn run_state_starts_held() {
    let mut program = LifeProgram::new(Config { size: 4, ..Config::default() }, quiet());
    assert_eq!(program.state(), RunState::Hold);
    program.run();
    program.run();
    assert_eq!(program.state(), RunState::Running);
}

#[test]
fn draw_clears_then_renders_grid() {
    let config = Config { size: 10, pattern: Some("glider"), ..Config::default() };
    let mut harness = fast_harness(LifeProgram::new(config, quiet()));
    harness.start().unwrap();
    harness.update().unwrap();

    let mut surface = RecordingSurface::new(100.0, 100.0);
    harness.draw(&mut surface).unwrap();
    assert_eq!(surface.ops[0], DrawOp::Fill(DEFAULT_BACKGROUND));
    let lines = surface.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count();
    assert_eq!(lines, 22);
    assert_eq!(surface.filled_rects().count(), 5);
}

#[test]
fn save_path_defaults_to_game_grid() {
    let program = LifeProgram::new(Config::default(), quiet());
    assert_eq!(program.save_path(), std::path::PathBuf::from(snapshot::FILE_NAME));
}

#[test]
fn export_import_files_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("toad.grid");

    let source = LifeProgram::new(Config { size: 12, pattern: Some("toad"), ..Config::default() }, quiet());
    assert_eq!(source.export_file(&path).unwrap(), 6);

    let mut copy = LifeProgram::new(Config { size: 12, ..Config::default() }, quiet());
    copy.import_file(&path).unwrap();
    assert_eq!(
        copy.grid().alive_cells().collect::<Vec<_>>(),
        source.grid().alive_cells().collect::<Vec<_>>()
    );
    assert_eq!(SparseSnapshot::read_file(&path).unwrap(), snapshot::export(source.grid()));
}

#[test]
fn import_merges_into_stepped_grid() {
    let mut grid = Grid::new(5);
    for (x, y) in [(2, 1), (2, 2), (2, 3)] {
        grid.set_cell(x, y, true).unwrap();
    }
    RuleEngine::default().step(&mut grid);

    let extra = SparseSnapshot { cells: vec![(0, 0), (2, 2)] };
    snapshot::import(&extra, &mut grid);
    assert_eq!(grid.alive_cells().collect::<Vec<_>>(), vec![(0, 0), (1, 2), (2, 2), (3, 2)]);
}
