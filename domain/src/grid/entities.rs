//! Grid domain entities

use crate::core::error::DomainError;
use crate::grid::position::Position;
use serde::{Deserialize, Serialize};

/// Smallest accepted grid dimension.
pub const MIN_DIMENSION: i32 = 5;
/// Largest accepted grid dimension; keeps generation and search tractable.
pub const MAX_DIMENSION: i32 = 500;

/// What a cell is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Wall,
    Path,
    Entry,
    Exit,
}

impl CellKind {
    /// Walkable cells are everything except walls.
    pub fn is_walkable(&self) -> bool {
        !matches!(self, CellKind::Wall)
    }
}

/// A single grid cell: its kind plus whether an agent has probed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub discovered: bool,
}

impl Cell {
    fn wall() -> Self {
        Self {
            kind: CellKind::Wall,
            discovered: false,
        }
    }
}

/// Status of a position as reported to the exploring agent.
///
/// Entry reports as `Path` — it is walkable and carries no distinct
/// status in the probe vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    Path,
    Wall,
    Exit,
    OutOfBounds,
}

impl CellStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellStatus::Path => "path",
            CellStatus::Wall => "wall",
            CellStatus::Exit => "exit",
            CellStatus::OutOfBounds => "out_of_bounds",
        }
    }
}

impl std::fmt::Display for CellStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The maze grid (Entity).
///
/// Owns a dense row-major array of cells and tracks the single entry and
/// exit positions. Invariant: exactly one cell has kind `Entry` and exactly
/// one has kind `Exit`, and both positions are in bounds.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    entry: Position,
    exit: Position,
}

impl Grid {
    /// Create an all-wall grid with entry at (1, 0) and exit at
    /// (width-2, height-1), the positions the generator attaches to.
    pub fn new(width: i32, height: i32) -> Result<Self, DomainError> {
        let range = MIN_DIMENSION..=MAX_DIMENSION;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(DomainError::InvalidDimensions { width, height });
        }

        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::wall(); (width * height) as usize],
            entry: Position::new(1, 0),
            exit: Position::new(width - 2, height - 1),
        };
        let entry_idx = grid.index(grid.entry);
        grid.cells[entry_idx].kind = CellKind::Entry;
        let exit_idx = grid.index(grid.exit);
        grid.cells[exit_idx].kind = CellKind::Exit;
        Ok(grid)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn entry(&self) -> Position {
        self.entry
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    pub fn cell_at(&self, pos: Position) -> Result<&Cell, DomainError> {
        if !self.in_bounds(pos) {
            return Err(DomainError::OutOfRange(pos));
        }
        Ok(&self.cells[self.index(pos)])
    }

    /// Status of a position in the probe vocabulary.
    ///
    /// Never fails: out-of-bounds positions report `OutOfBounds`.
    pub fn status_of(&self, pos: Position) -> CellStatus {
        match self.cell_at(pos) {
            Err(_) => CellStatus::OutOfBounds,
            Ok(cell) => match cell.kind {
                CellKind::Wall => CellStatus::Wall,
                CellKind::Exit => CellStatus::Exit,
                CellKind::Path | CellKind::Entry => CellStatus::Path,
            },
        }
    }

    /// Move the entry to `pos`, retagging the previous entry cell to `Path`.
    pub fn set_entry(&mut self, pos: Position) -> Result<(), DomainError> {
        if !self.in_bounds(pos) {
            return Err(DomainError::OutOfRange(pos));
        }
        let previous = self.index(self.entry);
        self.cells[previous].kind = CellKind::Path;
        let next = self.index(pos);
        self.cells[next].kind = CellKind::Entry;
        self.entry = pos;
        Ok(())
    }

    /// Move the exit to `pos`, retagging the previous exit cell to `Path`.
    pub fn set_exit(&mut self, pos: Position) -> Result<(), DomainError> {
        if !self.in_bounds(pos) {
            return Err(DomainError::OutOfRange(pos));
        }
        let previous = self.index(self.exit);
        self.cells[previous].kind = CellKind::Path;
        let next = self.index(pos);
        self.cells[next].kind = CellKind::Exit;
        self.exit = pos;
        Ok(())
    }

    /// Flip a cell between `Wall` and `Path`. No-op on entry/exit cells.
    pub fn toggle(&mut self, pos: Position) -> Result<(), DomainError> {
        if !self.in_bounds(pos) {
            return Err(DomainError::OutOfRange(pos));
        }
        let idx = self.index(pos);
        match self.cells[idx].kind {
            CellKind::Wall => self.cells[idx].kind = CellKind::Path,
            CellKind::Path => self.cells[idx].kind = CellKind::Wall,
            CellKind::Entry | CellKind::Exit => {}
        }
        Ok(())
    }

    /// Mark a cell as probed by the agent.
    pub fn mark_discovered(&mut self, pos: Position) -> Result<(), DomainError> {
        if !self.in_bounds(pos) {
            return Err(DomainError::OutOfRange(pos));
        }
        let idx = self.index(pos);
        self.cells[idx].discovered = true;
        Ok(())
    }

    /// Clear all discovered flags. Called at the start of each solve attempt.
    pub fn reset_discovered(&mut self) {
        for cell in &mut self.cells {
            cell.discovered = false;
        }
    }

    pub(crate) fn set_kind(&mut self, pos: Position, kind: CellKind) {
        let idx = self.index(pos);
        self.cells[idx].kind = kind;
    }
}
