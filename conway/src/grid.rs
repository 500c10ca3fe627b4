// grid.rs - Double-buffered cell grid for Conway's Game of Life

use thiserror::Error;

pub const DEFAULT_SIZE: usize = 100;              // Cells per side unless configured
pub const MAX_SIZE: usize = 10_000;               // Largest side accepted from options

pub const ALIVE: u8 = 1;
pub const DEAD: u8 = 0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("cell out of bounds: {x}, {y} in [{size}x{size}]")]
    OutOfBounds { x: i64, y: i64, size: usize },
}

/// Read access to cell state. Anything outside the grid reads as dead.
pub trait CellSource {
    fn size(&self) -> usize;

    fn get_cell(&self, x: i64, y: i64) -> u8;
}

fn index(size: usize, x: i64, y: i64) -> Option<usize> {
    let in_range = |v: i64| v >= 0 && (v as u64) < size as u64;
    (in_range(x) && in_range(y)).then(|| x as usize * size + y as usize)
}

/// An N×N grid with a current and a next buffer. Outside code only ever
/// sees the current buffer; a [`StepFrame`] writes the next one and swaps
/// them on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    buffers: [Vec<u8>; 2],
    front: usize,                                 // Index of the current buffer
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            buffers: [vec![DEAD; size * size], vec![DEAD; size * size]],
            front: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get_cell(&self, x: i64, y: i64) -> u8 {
        index(self.size, x, y).map_or(DEAD, |i| self.buffers[self.front][i])
    }

    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.get_cell(x, y) == ALIVE
    }

    /// Writes straight into the current buffer.
    pub fn set_cell(&mut self, x: i64, y: i64, alive: bool) -> Result<(), GridError> {
        let i = index(self.size, x, y).ok_or(GridError::OutOfBounds { x, y, size: self.size })?;
        self.buffers[self.front][i] = if alive { ALIVE } else { DEAD };
        Ok(())
    }

    pub fn clear(&mut self) {
        self.buffers[self.front].fill(DEAD);
    }

    pub fn alive_count(&self) -> usize {
        self.buffers[self.front].iter().filter(|&&cell| cell == ALIVE).count()
    }

    /// Alive coordinates, x-major then y.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.buffers[self.front]
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == ALIVE)
            .map(move |(i, _)| (i / size, i % size))
    }

    /// Opens a step. The next buffer starts as a copy of the current one,
    /// so only changed cells need writing.
    pub fn begin_step(&mut self) -> StepFrame<'_> {
        let [first, second] = &mut self.buffers;
        let (current, next) = if self.front == 0 { (first, second) } else { (second, first) };
        next.copy_from_slice(current);
        StepFrame {
            size: self.size,
            current: current.as_slice(),
            next: next.as_mut_slice(),
            front: &mut self.front,
        }
    }
}

impl CellSource for Grid {
    fn size(&self) -> usize {
        self.size
    }

    fn get_cell(&self, x: i64, y: i64) -> u8 {
        Grid::get_cell(self, x, y)
    }
}

/// One in-progress step: reads hit the current buffer, writes hit the next.
/// Dropping the frame without [`StepFrame::commit`] discards the writes.
pub struct StepFrame<'a> {
    size: usize,
    current: &'a [u8],
    next: &'a mut [u8],
    front: &'a mut usize,
}

impl StepFrame<'_> {
    pub fn set_next(&mut self, x: i64, y: i64, alive: bool) -> Result<(), GridError> {
        let i = index(self.size, x, y).ok_or(GridError::OutOfBounds { x, y, size: self.size })?;
        self.next[i] = if alive { ALIVE } else { DEAD };
        Ok(())
    }

    /// Writes a cell known to be on the grid, e.g. from a `0..size` loop.
    pub fn set_next_at(&mut self, x: usize, y: usize, alive: bool) {
        debug_assert!(x < self.size && y < self.size, "({x}, {y}) outside [{0}x{0}]", self.size);
        self.next[x * self.size + y] = if alive { ALIVE } else { DEAD };
    }

    /// Swaps buffers: what was written becomes current.
    pub fn commit(self) {
        *self.front ^= 1;
    }
}

impl CellSource for StepFrame<'_> {
    fn size(&self) -> usize {
        self.size
    }

    fn get_cell(&self, x: i64, y: i64) -> u8 {
        index(self.size, x, y).map_or(DEAD, |i| self.current[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_reads_are_dead() {
        let mut grid = Grid::new(4);
        for x in 0..4 {
            for y in 0..4 {
                grid.set_cell(x, y, true).unwrap();
            }
        }
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (-1, -1), (4, 4), (i64::MIN, i64::MAX)] {
            assert_eq!(grid.get_cell(x, y), DEAD, "({x}, {y})");
        }
        assert_eq!(grid.alive_count(), 16);
    }

    #[test]
    fn set_cell_out_of_bounds_is_rejected() {
        let mut grid = Grid::new(3);
        assert_eq!(
            grid.set_cell(3, 1, true),
            Err(GridError::OutOfBounds { x: 3, y: 1, size: 3 })
        );
        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn step_reads_current_until_commit() {
        let mut grid = Grid::new(3);
        grid.set_cell(1, 1, true).unwrap();

        let mut frame = grid.begin_step();
        frame.set_next(1, 1, false).unwrap();
        frame.set_next(0, 2, true).unwrap();
        assert_eq!(frame.get_cell(1, 1), ALIVE);
        assert_eq!(frame.get_cell(0, 2), DEAD);
        frame.commit();

        assert!(!grid.is_alive(1, 1));
        assert!(grid.is_alive(0, 2));
    }

    #[test]
    fn set_next_at_matches_checked_setter() {
        let mut grid = Grid::new(4);
        let mut frame = grid.begin_step();
        frame.set_next_at(3, 0, true);
        frame.set_next(0, 3, true).unwrap();
        frame.commit();
        assert_eq!(grid.alive_cells().collect::<Vec<_>>(), vec![(0, 3), (3, 0)]);
    }

    #[test]
    fn uncommitted_step_is_discarded() {
        let mut grid = Grid::new(3);
        grid.set_cell(2, 2, true).unwrap();
        {
            let mut frame = grid.begin_step();
            frame.set_next(2, 2, false).unwrap();
        }
        assert!(grid.is_alive(2, 2));

        // Next step starts from current, not from the abandoned writes.
        let frame = grid.begin_step();
        frame.commit();
        assert!(grid.is_alive(2, 2));
    }

    #[test]
    fn alive_cells_are_x_major() {
        let mut grid = Grid::new(5);
        grid.set_cell(3, 0, true).unwrap();
        grid.set_cell(0, 4, true).unwrap();
        grid.set_cell(0, 1, true).unwrap();
        let cells: Vec<_> = grid.alive_cells().collect();
        assert_eq!(cells, vec![(0, 1), (0, 4), (3, 0)]);
    }
}
