// patterns.rs - Named seed patterns, as (x, y) offsets from their top-left corner

use crate::grid::Grid;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i64, i64)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "pulsar",
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "gosper-gun",
        cells: &[
            (24, 0), (22, 1), (24, 1), (12, 2), (13, 2), (20, 2),
            (21, 2), (34, 2), (35, 2), (11, 3), (15, 3), (20, 3),
            (21, 3), (34, 3), (35, 3), (0, 4), (1, 4), (10, 4),
            (16, 4), (20, 4), (21, 4), (0, 5), (1, 5), (10, 5),
            (14, 5), (16, 5), (17, 5), (22, 5), (24, 5), (10, 6),
            (16, 6), (24, 6), (11, 7), (15, 7), (12, 8), (13, 8),
        ],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    /// Bounding box as (width, height).
    pub fn extent(&self) -> (i64, i64) {
        self.cells
            .iter()
            .fold((0, 0), |(w, h), &(x, y)| (w.max(x + 1), h.max(y + 1)))
    }

    /// Sets the pattern's cells alive with its corner at `origin`. Cells that
    /// fall off the grid are returned instead of written.
    pub fn place(&self, grid: &mut Grid, origin: (i64, i64)) -> Vec<(i64, i64)> {
        self.cells
            .iter()
            .map(|&(dx, dy)| (origin.0 + dx, origin.1 + dy))
            .filter(|&(x, y)| grid.set_cell(x, y, true).is_err())
            .collect()
    }

    pub fn place_centered(&self, grid: &mut Grid) -> Vec<(i64, i64)> {
        let (width, height) = self.extent();
        let size = grid.size() as i64;
        self.place(grid, ((size - width) / 2, (size - height) / 2))
    }
}
