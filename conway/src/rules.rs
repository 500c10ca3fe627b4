// rules.rs - Neighbor-count rule evaluation

use crate::grid::{ALIVE, CellSource, Grid};

/// Neighbor offsets of the Moore neighborhood
const NEIGHBORS: [(i64, i64); 8] = [
    (-1,-1),(-1, 0),(-1, 1),( 0,-1),
    ( 1,-1),( 1, 0),( 1, 1),( 0, 1),
];

/// Ratio reported when nothing died during a step
pub const RATIO_SENTINEL: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellUpdateOutcome {
    Unchanged,
    Born,
    Died,
}

/// A set of neighbor counts, 0 through 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountSet([bool; 9]);

impl CountSet {
    pub fn contains(&self, count: usize) -> bool {
        self.0.get(count).copied().unwrap_or(false)
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        (0..9).filter(|&n| self.0[n])
    }
}

impl FromIterator<usize> for CountSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = [false; 9];
        for count in iter.into_iter().filter(|&n| n < 9) {
            set[count] = true;
        }
        Self(set)
    }
}

/// Two trigger sets: `on` flips an alive cell off, `off` flips a dead
/// cell on. Everything else stays as it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    pub on: CountSet,
    pub off: CountSet,
}

impl Default for RuleSet {
    /// Conway's B3/S23.
    fn default() -> Self {
        Self {
            on: [0, 1, 4, 5, 6, 7, 8].into_iter().collect(),
            off: [3].into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepStats {
    pub born: usize,
    pub died: usize,
}

impl StepStats {
    pub fn changed(&self) -> usize {
        self.born + self.died
    }

    /// born / died, or [`RATIO_SENTINEL`] when nothing died.
    pub fn ratio(&self) -> f64 {
        if self.died == 0 {
            RATIO_SENTINEL
        } else {
            self.born as f64 / self.died as f64
        }
    }

    fn record(&mut self, outcome: CellUpdateOutcome) {
        match outcome {
            CellUpdateOutcome::Born      => self.born += 1,
            CellUpdateOutcome::Died      => self.died += 1,
            CellUpdateOutcome::Unchanged => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleEngine {
    pub rules: RuleSet,
}

impl RuleEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn live_neighbors(cells: &impl CellSource, x: i64, y: i64) -> usize {
        NEIGHBORS
            .iter()
            .filter(|&&(dx, dy)| cells.get_cell(x + dx, y + dy) == ALIVE)
            .count()
    }

    pub fn evaluate_cell(&self, cells: &impl CellSource, x: i64, y: i64) -> CellUpdateOutcome {
        let count = Self::live_neighbors(cells, x, y);
        match (cells.get_cell(x, y) == ALIVE, count) {
            (true, n) if self.rules.on.contains(n)   => CellUpdateOutcome::Died,
            (false, n) if self.rules.off.contains(n) => CellUpdateOutcome::Born,
            _                                        => CellUpdateOutcome::Unchanged,
        }
    }

    /// One generation: evaluate every cell against the current buffer,
    /// write the next buffer, swap.
    pub fn step(&self, grid: &mut Grid) -> StepStats {
        let size = grid.size();
        let mut stats = StepStats::default();
        let mut frame = grid.begin_step();
        for x in 0..size {
            for y in 0..size {
                let outcome = self.evaluate_cell(&frame, x as i64, y as i64);
                stats.record(outcome);
                let alive = match outcome {
                    CellUpdateOutcome::Born      => true,
                    CellUpdateOutcome::Died      => false,
                    CellUpdateOutcome::Unchanged => continue,
                };
                frame.set_next_at(x, y, alive);
            }
        }
        frame.commit();
        stats
    }
}
