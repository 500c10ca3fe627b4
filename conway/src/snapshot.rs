// snapshot.rs - Sparse (alive cells only) grid snapshots

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::Grid;

/// Default snapshot file for exports without a configured `file`.
pub const FILE_NAME: &str = "game.grid";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot from {path:?}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write snapshot to {path:?}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid grid data, expected a list of [x, y] pairs: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Alive cells as `(x, y)` pairs. On disk: `[[3,4],[3,5],[4,4]]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SparseSnapshot {
    pub cells: Vec<(i64, i64)>,
}

/// What an import did. Skipped pairs were outside the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub applied: usize,
    pub skipped: Vec<(i64, i64)>,
}

impl SparseSnapshot {
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn read_file(path: &Path) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path)
            .map_err(|source| SnapshotError::Read { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }

    pub fn write_file(&self, path: &Path) -> Result<(), SnapshotError> {
        let text = self.to_json()?;
        fs::write(path, text)
            .map_err(|source| SnapshotError::Write { path: path.to_path_buf(), source })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Every alive cell of the current buffer, x-major then y.
pub fn export(grid: &Grid) -> SparseSnapshot {
    SparseSnapshot {
        cells: grid.alive_cells().map(|(x, y)| (x as i64, y as i64)).collect(),
    }
}

/// Marks each listed cell alive. Existing alive cells are kept; pairs
/// outside the grid are skipped and reported.
pub fn import(snapshot: &SparseSnapshot, grid: &mut Grid) -> ImportReport {
    let mut report = ImportReport::default();
    for &(x, y) in &snapshot.cells {
        match grid.set_cell(x, y, true) {
            Ok(()) => report.applied += 1,
            Err(_) => report.skipped.push((x, y)),
        }
    }
    report
}
