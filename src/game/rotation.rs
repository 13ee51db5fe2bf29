//! Rotating the grid by quarter turns and letting tokens fall back into place.

use crate::error::RotationError;

use super::{Cell, Grid, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// +1 quarter turn
    Clockwise,
    /// -1 quarter turn
    Anticlockwise,
    /// +2 quarter turns
    HalfTurn,
}

impl Rotation {
    pub fn quarter_turns(self) -> i32 {
        match self {
            Rotation::Clockwise => 1,
            Rotation::Anticlockwise => -1,
            Rotation::HalfTurn => 2,
        }
    }

    /// Dimensions after rotating a `rows`×`cols` grid.
    pub fn rotated_dims(self, rows: usize, cols: usize) -> (usize, usize) {
        match self {
            Rotation::Clockwise | Rotation::Anticlockwise => (cols, rows),
            Rotation::HalfTurn => (rows, cols),
        }
    }

    /// Where (`row`, `col`) of a `rows`×`cols` grid lands after rotating.
    pub fn map(self, rows: usize, cols: usize, row: usize, col: usize) -> (usize, usize) {
        match self {
            Rotation::Clockwise => (col, rows - 1 - row),
            Rotation::Anticlockwise => (cols - 1 - col, row),
            Rotation::HalfTurn => (rows - 1 - row, cols - 1 - col),
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = RotationError;

    fn try_from(quarter_turns: i32) -> Result<Self, Self::Error> {
        match quarter_turns {
            1 => Ok(Rotation::Clockwise),
            -1 => Ok(Rotation::Anticlockwise),
            2 => Ok(Rotation::HalfTurn),
            other => Err(RotationError::InvalidQuarterTurns(other)),
        }
    }
}

/// One token's fall after a rotation: its cell in the rotated, unsettled grid
/// (`from_*`) and its cell once settled (`to_*`). Only `from_row` and
/// `to_row` can differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relocation {
    pub from_row: usize,
    pub from_col: usize,
    pub to_row: usize,
    pub to_col: usize,
    pub player: Player,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationResult {
    pub grid: Grid,
    /// Ordered by `from_row` descending, then `from_col` ascending.
    pub relocations: Vec<Relocation>,
}

/// Geometric rotation only. The result generally has floating tokens; pass it
/// through [`settle`] before using it as a game grid.
pub fn rotate(grid: &Grid, rotation: Rotation) -> Grid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let (new_rows, new_cols) = rotation.rotated_dims(rows, cols);
    let mut rotated = Grid::new(new_rows, new_cols);
    for row in 0..rows {
        for col in 0..cols {
            let cell = grid.at(row, col);
            if !cell.is_empty() {
                let (r, c) = rotation.map(rows, cols, row, col);
                rotated.set(r, c, cell);
            }
        }
    }
    rotated
}

/// Compact every column to the bottom, keeping the vertical order of tokens.
pub fn settle(grid: &Grid) -> Grid {
    settle_tracked(grid).0
}

/// Settle and report every token's fall, visiting tokens bottom row first and
/// left to right within a row.
fn settle_tracked(grid: &Grid) -> (Grid, Vec<Relocation>) {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut settled = Grid::new(rows, cols);
    let mut falls = Vec::with_capacity(grid.token_count());
    // Next free row from the bottom, per column
    let mut floor = vec![rows; cols];

    for row in (0..rows).rev() {
        for (col, next) in floor.iter_mut().enumerate() {
            if let Cell::Owned(player) = grid.at(row, col) {
                *next -= 1;
                settled.set(*next, col, Cell::Owned(player));
                falls.push(Relocation {
                    from_row: row,
                    from_col: col,
                    to_row: *next,
                    to_col: col,
                    player,
                });
            }
        }
    }

    (settled, falls)
}

/// Rotate, settle, and list every token's relocation.
pub fn rotate_and_settle(grid: &Grid, quarter_turns: i32) -> Result<RotationResult, RotationError> {
    let rotation = Rotation::try_from(quarter_turns)?;
    Ok(apply(grid, rotation))
}

/// Infallible form of [`rotate_and_settle`] for an already-validated rotation.
pub fn apply(grid: &Grid, rotation: Rotation) -> RotationResult {
    let rotated = rotate(grid, rotation);
    let (settled, relocations) = settle_tracked(&rotated);

    tracing::debug!(
        rotation = rotation.quarter_turns(),
        rows = settled.rows(),
        cols = settled.cols(),
        "rotated and settled grid"
    );

    RotationResult {
        grid: settled,
        relocations,
    }
}
