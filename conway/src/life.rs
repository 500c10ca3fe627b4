// life.rs - Conway's Game of Life as a harness program

use std::fmt;
use std::path::{Path, PathBuf};

use egui::Key;
use program::{Context, IntervalScheduler, Logger, Options, Program, Surface};

use crate::config::{Config, DEFAULT_STEP};
use crate::grid::{Grid, GridError};
use crate::patterns;
use crate::render::{self, Camera, RenderStyle};
use crate::rules::{RuleEngine, RuleSet, StepStats};
use crate::snapshot::{self, FILE_NAME, ImportReport, SnapshotError, SparseSnapshot};

/// Name of the interval that paces generations.
pub const STEP_INTERVAL: &str = "step";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Hold,
    Running,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunState::Hold    => "hold",
            RunState::Running => "running",
        })
    }
}

pub struct LifeProgram {
    config: Config,
    logger: Logger,
    grid: Grid,
    engine: RuleEngine,
    intervals: IntervalScheduler,
    camera: Camera,
    style: RenderStyle,
    state: RunState,
    generation: u64,
    last_stats: StepStats,
}

impl LifeProgram {
    pub fn new(config: Config, logger: Logger) -> Self {
        let mut program = Self {
            grid: Grid::new(config.size),
            engine: RuleEngine::default(),
            intervals: IntervalScheduler::new(),
            camera: Camera::default(),
            style: RenderStyle::default(),
            state: RunState::Hold,
            generation: 0,
            last_stats: StepStats::default(),
            config,
            logger,
        };
        program.arm_step_interval();
        program.logger.debug(format_args!("Grid size: {0}x{0}", program.grid.size()));

        if let Some(name) = program.config.pattern {
            program.seed_pattern(name);
        }
        if let Some(path) = program.config.file.clone() {
            program.logger.info(format_args!("Importing grid from file: {}", path.display()));
            if let Err(err) = program.import_file(&path) {
                program.logger.error(format_args!("Error importing grid: {err}"));
            }
        }
        program
    }

    /// Builds the program straight from raw options, logging as `ConwayProgram`.
    pub fn from_options(options: &Options, logger: &Logger) -> Self {
        let logger = logger.scoped("ConwayProgram");
        let config = Config::from_options(options, &logger);
        Self::new(config, logger)
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.engine = RuleEngine::new(rules);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }

    /// `Hold -> Running`. Re-anchors the step interval so the first
    /// generation comes a full period after starting.
    pub fn run(&mut self) {
        if self.state == RunState::Running {
            return;
        }
        self.arm_step_interval();
        self.state = RunState::Running;
        self.logger.debug("Simulation running.");
    }

    /// Advances one generation regardless of state or timers.
    pub fn step(&mut self) -> StepStats {
        let stats = self.engine.step(&mut self.grid);
        self.generation += 1;
        self.last_stats = stats;
        let count = self.intervals.interval_count(STEP_INTERVAL).unwrap_or(self.generation);
        self.logger.debug(format_args!(
            "[{count}] cells updated: {} (born {}, died {}, ratio {:.2})",
            stats.changed(),
            stats.born,
            stats.died,
            stats.ratio(),
        ));
        stats
    }

    /// Merges a snapshot file into the grid. A file that cannot be read or
    /// parsed leaves the grid untouched.
    pub fn import_file(&mut self, path: &Path) -> Result<ImportReport, SnapshotError> {
        let snapshot = SparseSnapshot::read_file(path)?;
        let report = snapshot::import(&snapshot, &mut self.grid);
        for &(x, y) in &report.skipped {
            self.warn_out_of_bounds(x, y);
        }
        self.logger.debug(format_args!("Imported {} cells", report.applied));
        Ok(report)
    }

    pub fn export_file(&self, path: &Path) -> Result<usize, SnapshotError> {
        let snapshot = snapshot::export(&self.grid);
        snapshot.write_file(path)?;
        Ok(snapshot.len())
    }

    /// Where the save key writes: the configured `file`, else `game.grid`.
    pub fn save_path(&self) -> PathBuf {
        self.config.file.clone().unwrap_or_else(|| PathBuf::from(FILE_NAME))
    }

    fn save(&self) {
        let path = self.save_path();
        match self.export_file(&path) {
            Ok(count) => self.logger.info(format_args!("Exported {count} cells to {}", path.display())),
            Err(err) => self.logger.error(format_args!("Error exporting grid: {err}")),
        }
    }

    fn seed_pattern(&mut self, name: &str) {
        let Some(pattern) = patterns::find(name) else {
            self.logger.warning(format_args!("Unknown pattern: {name}"));
            return;
        };
        for (x, y) in pattern.place_centered(&mut self.grid) {
            self.warn_out_of_bounds(x, y);
        }
        self.logger.debug(format_args!("Seeded pattern: {}", pattern.name));
    }

    fn arm_step_interval(&mut self) {
        if self.config.step.is_zero() {
            self.logger.warning(format_args!("Step must be non-zero; using {DEFAULT_STEP:?}"));
            self.config.step = DEFAULT_STEP;
        }
        if let Err(err) = self.intervals.set_interval(STEP_INTERVAL, self.config.step, true) {
            self.logger.error(err);
        }
    }

    fn warn_out_of_bounds(&self, x: i64, y: i64) {
        let err = GridError::OutOfBounds { x, y, size: self.grid.size() };
        self.logger.warning(format_args!("{err}"));
    }

    fn pan(&mut self, columns: f32, rows: f32) {
        self.camera.pan(columns * self.style.scale, rows * self.style.scale);
    }
}

impl Program for LifeProgram {
    fn intervals_mut(&mut self) -> &mut IntervalScheduler {
        &mut self.intervals
    }

    fn start(&mut self, _ctx: &mut Context) {
        if self.config.hold {
            self.logger.info("Holding. Press Space to start.");
        } else {
            self.run();
        }
    }

    fn update(&mut self, _ctx: &mut Context) -> anyhow::Result<()> {
        if self.state == RunState::Hold {
            return Ok(());
        }
        if self.intervals.check_interval(STEP_INTERVAL) {
            self.step();
        }
        Ok(())
    }

    fn draw(&mut self, _ctx: &mut Context, surface: &mut dyn Surface) -> anyhow::Result<()> {
        let ops = render::plan(&self.grid, self.camera, surface.size(), &self.style);
        surface.apply_all(&ops);
        Ok(())
    }

    fn key_pressed(&mut self, _ctx: &mut Context, key: Key) {
        match key {
            Key::ArrowLeft  => self.pan(-1.0, 0.0),
            Key::ArrowRight => self.pan(1.0, 0.0),
            Key::ArrowUp    => self.pan(0.0, -1.0),
            Key::ArrowDown  => self.pan(0.0, 1.0),
            Key::Space      => self.run(),
            Key::S          => self.save(),
            _ => {}
        }
    }

    fn status_line(&self) -> Option<String> {
        Some(format!(
            "generation {} | {} alive | {}",
            self.generation,
            self.grid.alive_count(),
            self.state,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use program::{LogLevel, RecordingSurface};
    use std::time::Duration;

    fn quiet() -> Logger {
        Logger::new("ConwayProgram", LogLevel::Fatal)
    }

    fn config(size: usize) -> Config {
        Config { size, step: Duration::from_millis(100), ..Config::default() }
    }

    #[test]
    fn starts_in_hold() {
        let program = LifeProgram::new(config(5), quiet());
        assert_eq!(program.state(), RunState::Hold);
        assert_eq!(program.intervals.interval_count(STEP_INTERVAL), Some(0));
    }

    #[test]
    fn steps_only_when_interval_fires() {
        let mut program = LifeProgram::new(config(5), quiet());
        program.grid_mut().set_cell(2, 2, true).unwrap();
        program.run();

        program.intervals.advance_to(Duration::from_millis(50));
        assert!(!program.intervals.check_interval(STEP_INTERVAL));
        assert_eq!(program.generation(), 0);

        program.intervals.advance_to(Duration::from_millis(100));
        assert!(program.intervals.check_interval(STEP_INTERVAL));
        program.step();
        assert_eq!(program.generation(), 1);
        assert_eq!(program.grid().alive_count(), 0);
        assert_eq!(program.last_stats(), StepStats { born: 0, died: 1 });
    }

    #[test]
    fn arrows_pan_one_cell() {
        let mut program = LifeProgram::new(config(5), quiet());
        program.pan(1.0, 0.0);
        program.pan(0.0, -1.0);
        assert_eq!(program.camera(), Camera { pan_x: 10.0, pan_y: -10.0 });
    }

    #[test]
    fn zero_step_falls_back_to_default() {
        let program = LifeProgram::new(Config { step: Duration::ZERO, ..config(5) }, quiet());
        assert_eq!(program.config().step, DEFAULT_STEP);
        assert_eq!(program.intervals.get(STEP_INTERVAL).map(|i| i.period), Some(DEFAULT_STEP));
    }

    #[test]
    fn unknown_pattern_leaves_grid_empty() {
        let mut program = LifeProgram::new(config(10), quiet());
        program.seed_pattern("spaceship");
        assert_eq!(program.grid().alive_count(), 0);
    }

    #[test]
    fn draw_renders_alive_cells() {
        let mut program = LifeProgram::new(Config { pattern: Some("blinker"), ..config(9) }, quiet());
        let mut surface = RecordingSurface::new(90.0, 90.0);
        let ops = render::plan(program.grid(), program.camera(), surface.size(), &program.style);
        surface.apply_all(&ops);
        assert_eq!(surface.filled_rects().count(), 3);
        program.run();
        assert_eq!(program.status_line().unwrap(), "generation 0 | 3 alive | running");
    }
}
