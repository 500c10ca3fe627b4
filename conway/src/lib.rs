//! Conway's Game of Life on a fixed, non-wrapping N×N grid.
//!
//! [`grid::Grid`] keeps two buffers so a generation is always computed from
//! one consistent snapshot; [`rules::RuleEngine`] scans it; [`snapshot`]
//! moves alive cells in and out as `[[x, y], ...]` JSON; [`render`] turns
//! the grid into draw calls; [`life::LifeProgram`] ties it all to the
//! program harness.

pub mod config;
pub mod grid;
pub mod life;
pub mod patterns;
pub mod render;
pub mod rules;
pub mod snapshot;

pub use config::Config;
pub use grid::{CellSource, Grid, GridError};
pub use life::{LifeProgram, RunState};
pub use rules::{CellUpdateOutcome, RuleEngine, RuleSet, StepStats};
pub use snapshot::{ImportReport, SnapshotError, SparseSnapshot};
