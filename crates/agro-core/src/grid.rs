//! Planting grid: a fixed-size row-major matrix of species cells.

use crate::{color_for, SpeciesKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fill color for cells nothing has been planted in.
pub const EMPTY_CELL_COLOR: &str = "#e5e7eb";

/// What occupies a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    #[default]
    Empty,
    Tree,
    Crop,
}

impl CellKind {
    /// Species category, `None` for empty cells.
    pub fn species(self) -> Option<SpeciesKind> {
        match self {
            CellKind::Empty => None,
            CellKind::Tree => Some(SpeciesKind::Tree),
            CellKind::Crop => Some(SpeciesKind::Crop),
        }
    }
}

impl From<SpeciesKind> for CellKind {
    fn from(kind: SpeciesKind) -> Self {
        match kind {
            SpeciesKind::Tree => CellKind::Tree,
            SpeciesKind::Crop => CellKind::Crop,
        }
    }
}

/// One grid square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub struct Cell {
    #[serde(rename = "type")]
    pub kind: CellKind,
    /// Species name; empty for empty cells.
    #[serde(default)]
    pub label: String,
    /// Hex render color.
    #[serde(default)]
    pub color: String,
}

impl Cell {
    pub fn empty() -> Self {
        Self {
            kind: CellKind::Empty,
            label: String::new(),
            color: EMPTY_CELL_COLOR.to_string(),
        }
    }

    /// A planted cell colored from its label.
    pub fn planted(kind: SpeciesKind, label: impl Into<String>) -> Self {
        let label = label.into();
        let color = color_for(&label, kind).to_string();
        Self {
            kind: kind.into(),
            label,
            color,
        }
    }

    pub fn tree(label: impl Into<String>) -> Self {
        Self::planted(SpeciesKind::Tree, label)
    }

    pub fn crop(label: impl Into<String>) -> Self {
        Self::planted(SpeciesKind::Crop, label)
    }

    pub fn is_empty(&self) -> bool {
        self.kind == CellKind::Empty
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

/// Distinct species shown in a legend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub kind: CellKind,
    pub label: String,
    pub color: String,
}

/// Grid shape and addressing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Rectangular planting grid.
///
/// Dimensions are fixed at construction; edits replace cell contents only.
/// Serialized as a list of rows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct PlantingGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl PlantingGrid {
    /// A grid of empty cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, Cell::empty())
    }

    /// A grid with every cell set to `cell`. A zero dimension yields the empty grid.
    pub fn filled(rows: usize, cols: usize, cell: Cell) -> Self {
        if rows == 0 || cols == 0 {
            return Self::default();
        }
        Self {
            rows,
            cols,
            cells: vec![cell; rows * cols],
        }
    }

    /// Build from nested rows; all rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Ok(Self::default());
        }
        let mut cells = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(GridError::Ragged {
                    row: i,
                    expected: n_cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.contains(row, col) {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if self.contains(row, col) {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Replace one cell in place.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GridError> {
        if !self.contains(row, col) {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.cells[row * self.cols + col] = cell;
        Ok(())
    }

    /// Copy of this grid with one cell replaced.
    pub fn with_cell(&self, row: usize, col: usize, cell: Cell) -> Result<Self, GridError> {
        let mut next = self.clone();
        next.set(row, col, cell)?;
        Ok(next)
    }

    /// Cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / cols, i % cols, cell))
    }

    /// Slice of one row.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Number of cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }

    /// Distinct labeled species in first-seen row-major order.
    pub fn legend(&self) -> Vec<LegendEntry> {
        let mut out: Vec<LegendEntry> = Vec::new();
        for cell in &self.cells {
            if cell.label.is_empty() {
                continue;
            }
            if out
                .iter()
                .any(|e| e.kind == cell.kind && e.label == cell.label)
            {
                continue;
            }
            let color = match (cell.color.is_empty(), cell.kind.species()) {
                (true, Some(kind)) => color_for(&cell.label, kind).to_string(),
                _ => cell.color.clone(),
            };
            out.push(LegendEntry {
                kind: cell.kind,
                label: cell.label.clone(),
                color,
            });
        }
        out
    }
}

impl TryFrom<Vec<Vec<Cell>>> for PlantingGrid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<PlantingGrid> for Vec<Vec<Cell>> {
    fn from(grid: PlantingGrid) -> Self {
        if grid.cols == 0 {
            return Vec::new();
        }
        grid.cells.chunks(grid.cols).map(<[Cell]>::to_vec).collect()
    }
}
